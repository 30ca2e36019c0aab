pub mod audit;
pub mod comment;
pub mod deliverable;
pub mod dispatch;
pub mod member;
pub mod milestone;
pub mod progress;
pub mod readiness;
pub mod report;
pub mod shared;
pub mod startup;
