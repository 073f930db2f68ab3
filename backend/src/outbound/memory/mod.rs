//! In-process adapters for running without PostgreSQL.
//!
//! [`InMemoryStore`] implements every persistence port over a single lock so
//! provisioning stays atomic and share codes stay unique, mirroring the
//! constraints the relational schema enforces.

mod store;

pub use store::InMemoryStore;
