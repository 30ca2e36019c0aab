//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use ignite_config::{ConfigError, IgniteConfig};
use pretty_assertions::assert_eq;

#[test]
fn loads_database_and_general_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/ignite/state.db"

[general]
default_limit = 50
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(IgniteConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = IgniteConfig::from_figment(&figment).expect("config loads");

        assert_eq!(config.database.path, "/var/lib/ignite/state.db");
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.program.milestones.len(), 4);
        Ok(())
    });
}

#[test]
fn program_template_replaces_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[[program.milestones]]
title = "Problem validation"
deliverables = ["Customer interviews", "Problem statement"]

[[program.milestones]]
title = "Solution validation"
description = "Prototype in front of users"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(IgniteConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = IgniteConfig::from_figment(&figment).expect("config loads");

        let milestones = &config.program.milestones;
        assert_eq!(milestones.len(), 2);
        assert_eq!(milestones[0].title, "Problem validation");
        assert_eq!(
            milestones[0].deliverables,
            vec!["Customer interviews".to_string(), "Problem statement".to_string()]
        );
        assert_eq!(
            milestones[1].description.as_deref(),
            Some("Prototype in front of users")
        );
        assert!(milestones[1].deliverables.is_empty());
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".ignite")?;
        jail.create_file(
            ".ignite/config.toml",
            r#"
[database]
path = "local.db"
"#,
        )?;

        let config = IgniteConfig::load().expect("config loads");
        assert_eq!(config.database.path, "local.db");
        Ok(())
    });
}

#[test]
fn invalid_program_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[[program.milestones]]
title = "Discovery"
deliverables = ["Report", "Report"]
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(IgniteConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = IgniteConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
