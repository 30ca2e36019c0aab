//! Entity structs for all Ignite domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `ignite-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod audit;
mod comment;
mod deliverable;
mod member;
mod milestone;
mod readiness;
mod report;
mod startup;

pub use audit::AuditEntry;
pub use comment::Comment;
pub use deliverable::Deliverable;
pub use member::StartupMember;
pub use milestone::Milestone;
pub use readiness::ReadinessItem;
pub use report::ProgressReport;
pub use startup::Startup;
