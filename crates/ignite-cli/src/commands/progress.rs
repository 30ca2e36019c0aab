use ignite_core::entities::Milestone;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct NextResponse {
    startup_id: String,
    progress_percent: u8,
    current_milestone: Option<Milestone>,
}

/// Handle `ignite progress`.
pub async fn handle_progress(
    startup: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let progress = ctx.service.startup_progress(startup).await?;
    output(&progress, flags.format)
}

/// Handle `ignite next`.
pub async fn handle_next(startup: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let current_milestone = ctx.service.current_actionable_milestone(startup).await?;
    let progress_percent = ctx.service.progress_percent(startup).await?;
    output(
        &NextResponse {
            startup_id: startup.to_string(),
            progress_percent,
            current_milestone,
        },
        flags.format,
    )
}
