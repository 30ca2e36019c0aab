use ignite_core::entities::AuditEntry;
use ignite_core::enums::{AuditAction, EntityType};
use ignite_db::repos::audit::AuditFilter;

use crate::cli::root_commands::AuditArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ignite audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = AuditFilter {
        entity_type: args
            .entity_type
            .as_deref()
            .map(|raw| parse_enum::<EntityType>(raw, "entity type"))
            .transpose()?,
        entity_id: args.entity_id.clone(),
        action: args
            .action
            .as_deref()
            .map(|raw| parse_enum::<AuditAction>(raw, "action"))
            .transpose()?,
        actor_id: args.by.clone(),
        limit: Some(ctx.limit(None, flags)),
    };
    let entries = ctx.service.query_audit(&filter).await?;

    match flags.format {
        OutputFormat::Raw => {
            print!("{}", to_ndjson(&entries)?);
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Table => output(&entries, flags.format),
    }
}

fn to_ndjson(entries: &[AuditEntry]) -> anyhow::Result<String> {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&serde_json::to_string(entry)?);
        out.push('\n');
    }
    Ok(out)
}
