//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the invitation repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Transactions where the port demands them**: provisioning writes users,
//!   drafts and share codes in one transaction.
//! - **Strongly typed errors**: Every Diesel and pool failure is mapped to
//!   the port's error enum.
//!
//! # Example
//!
//! ```no_run
//! use invitation_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/invitations")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_invitation_image_repository;
mod diesel_invitation_repository;
mod diesel_template_repository;
mod diesel_user_provisioning_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_invitation_image_repository::DieselInvitationImageRepository;
pub use diesel_invitation_repository::DieselInvitationRepository;
pub use diesel_template_repository::DieselTemplateRepository;
pub use diesel_user_provisioning_repository::DieselUserProvisioningRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
