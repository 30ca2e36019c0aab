mod comment;
mod deliverable;
mod member;
mod milestone;
mod readiness;
mod report;
mod startup;

pub use comment::CommentCommands;
pub use deliverable::DeliverableCommands;
pub use member::MemberCommands;
pub use milestone::MilestoneCommands;
pub use readiness::ReadinessCommands;
pub use report::ReportCommands;
pub use startup::StartupCommands;
