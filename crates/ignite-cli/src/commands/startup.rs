use ignite_core::enums::StartupStage;
use ignite_db::repos::startup::NewStartup;
use ignite_db::updates::startup::StartupUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StartupCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::{output, output_ack};

/// Handle `ignite startup`.
pub async fn handle(
    action: &StartupCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        StartupCommands::Create {
            name,
            owner,
            description,
            industry,
            stage,
            email,
            contact,
        } => {
            let stage = stage
                .as_deref()
                .map(|raw| parse_enum::<StartupStage>(raw, "stage"))
                .transpose()?
                .unwrap_or_default();
            let new = NewStartup {
                name: name.clone(),
                owner_id: owner.clone(),
                description: description.clone(),
                industry: industry.clone(),
                stage,
                email: email.clone(),
                contact_number: contact.clone(),
            };
            let startup = ctx
                .service
                .create_startup(&ctx.actor, &new, &ctx.config.program)
                .await?;
            output(&startup, flags.format)
        }
        StartupCommands::Update {
            id,
            name,
            description,
            industry,
            stage,
            email,
            contact,
        } => {
            let mut builder = StartupUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            if let Some(industry) = industry {
                builder = builder.industry(Some(industry.clone()));
            }
            if let Some(stage) = stage {
                builder = builder.stage(parse_enum(stage, "stage")?);
            }
            if let Some(email) = email {
                builder = builder.email(Some(email.clone()));
            }
            if let Some(contact) = contact {
                builder = builder.contact_number(Some(contact.clone()));
            }
            let startup = ctx
                .service
                .update_startup(&ctx.actor, id, builder.build())
                .await?;
            output(&startup, flags.format)
        }
        StartupCommands::Get { id } => output(&ctx.service.get_startup(id).await?, flags.format),
        StartupCommands::List { user } => {
            let startups = match user {
                Some(user) => ctx.service.list_startups_for_user(user).await?,
                None => ctx.service.list_startups(ctx.limit(None, flags)).await?,
            };
            output(&startups, flags.format)
        }
        StartupCommands::Delete { id } => {
            ctx.service.delete_startup(&ctx.actor, id).await?;
            output_ack("deleted", id, flags.format)
        }
    }
}
