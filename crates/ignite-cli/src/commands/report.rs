use ignite_db::repos::report::NewProgressReport;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ignite report`.
pub async fn handle(
    action: &ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReportCommands::Submit {
            startup,
            title,
            description,
            achievements,
            challenges,
            next_steps,
        } => {
            let report = NewProgressReport {
                title: title.clone(),
                description: description.clone(),
                achievements: achievements.clone(),
                challenges: challenges.clone(),
                next_steps: next_steps.clone(),
            };
            let submitted = ctx
                .service
                .submit_progress_report(&ctx.actor, startup, &report)
                .await?;
            output(&submitted, flags.format)
        }
        ReportCommands::List { startup } => {
            let reports = match startup {
                Some(startup) => ctx.service.list_progress_reports(startup).await?,
                None => {
                    ctx.service
                        .list_recent_reports(ctx.limit(None, flags))
                        .await?
                }
            };
            output(&reports, flags.format)
        }
    }
}
