//! ID prefix constants.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`, generated in SQL by
//! `IgniteDb::generate_id`.

pub const PREFIX_STARTUP: &str = "stp";
pub const PREFIX_MEMBER: &str = "mbr";
pub const PREFIX_MILESTONE: &str = "mil";
pub const PREFIX_DELIVERABLE: &str = "dlv";
pub const PREFIX_READINESS: &str = "rdy";
pub const PREFIX_COMMENT: &str = "cmt";
pub const PREFIX_REPORT: &str = "rpt";
pub const PREFIX_AUDIT: &str = "aud";

/// All known prefixes, in entity ownership order.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_STARTUP,
    PREFIX_MEMBER,
    PREFIX_MILESTONE,
    PREFIX_DELIVERABLE,
    PREFIX_READINESS,
    PREFIX_COMMENT,
    PREFIX_REPORT,
    PREFIX_AUDIT,
];
