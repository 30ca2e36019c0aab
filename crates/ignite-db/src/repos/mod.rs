//! Repository modules implementing operations for all Ignite entities.
//!
//! Each module adds methods to `IgniteService` via `impl IgniteService` blocks.
//! Public mutations wrap a `*_tx` body in [`IgniteService::write_tx`]; the
//! bodies never open transactions themselves so they can be composed.
//!
//! [`IgniteService::write_tx`]: crate::service::IgniteService

pub mod audit;
pub mod comment;
pub mod deliverable;
pub mod member;
pub mod milestone;
pub mod progression;
pub mod readiness;
pub mod report;
pub mod startup;
