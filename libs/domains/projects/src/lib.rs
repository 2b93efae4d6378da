//! Projects Domain
//!
//! CRUD over projects, each carrying an ordered list of embedded members.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← identity checks → validation → store
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Mapper    │  ← Project ⇄ StoredProject
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + in-memory and Postgres implementations
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_projects::{
//!     handlers,
//!     repository::InMemoryProjectRepository,
//!     service::ProjectService,
//! };
//!
//! let repository = InMemoryProjectRepository::new();
//! let service = ProjectService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod mapper;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{ProjectError, ProjectResult};
pub use handlers::ApiDoc;
pub use identity::IdentityViolation;
pub use mapper::{ProjectMapper, StoredMember, StoredProject};
pub use models::{Project, ProjectMember, Pronouns};
pub use postgres::PgProjectRepository;
pub use repository::{InMemoryProjectRepository, ProjectRepository};
pub use service::ProjectService;
