use std::path::Path;

use anyhow::Context;
use ignite_config::IgniteConfig;
use ignite_core::enums::Role;
use ignite_core::identity::Actor;
use ignite_db::service::IgniteService;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;

/// Shared resources for one CLI invocation.
pub struct AppContext {
    pub service: IgniteService,
    pub config: IgniteConfig,
    pub actor: Actor,
}

impl AppContext {
    /// Open the database named by `--db` or the config, creating its parent
    /// directory when needed.
    pub async fn init(config: IgniteConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db_path = flags.db.clone().unwrap_or_else(|| config.database.path.clone());
        if db_path != ":memory:"
            && let Some(parent) = Path::new(&db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let service = IgniteService::new_local(&db_path)
            .await
            .with_context(|| format!("failed to open database at {db_path}"))?;
        let role: Role = parse_enum(&flags.role, "role")?;
        let actor = Actor::new(flags.actor.clone(), role);
        tracing::debug!(db = %db_path, actor = %actor.actor_id, role = %actor.role, "context ready");

        Ok(Self {
            service,
            config,
            actor,
        })
    }

    /// List limit after applying the configured default.
    pub fn limit(&self, local: Option<u32>, flags: &GlobalFlags) -> u32 {
        crate::commands::shared::limit::effective_limit(
            local,
            flags.limit,
            self.config.general.default_limit,
        )
    }
}
