use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `ignite` binary.
#[derive(Debug, Parser)]
#[command(name = "ignite", version, about = "Ignite - startup milestone progression")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides [database] path)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Id of the user performing the command
    #[arg(long = "as", global = true, default_value = "operator")]
    pub actor: String,

    /// Role of the acting user: super_admin, admin, incubatee
    #[arg(long, global = true, default_value = "incubatee")]
    pub role: String,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
            actor: self.actor.clone(),
            role: self.role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{DeliverableCommands, StartupCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "ignite",
            "--format",
            "table",
            "--limit",
            "10",
            "--verbose",
            "next",
            "stp-1",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Next { ref startup } if startup == "stp-1"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["ignite", "progress", "stp-1", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Progress { .. }));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["ignite", "--format", "xml", "next", "stp-1"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn actor_defaults_to_unprivileged_incubatee() {
        let cli = Cli::try_parse_from(["ignite", "next", "stp-1"]).expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.actor, "operator");
        assert_eq!(flags.role, "incubatee");
        assert_eq!(flags.db, None);
    }

    #[test]
    fn acting_user_flags() {
        let cli = Cli::try_parse_from([
            "ignite",
            "--as",
            "usr-founder",
            "--role",
            "incubatee",
            "--db",
            "/tmp/ignite.db",
            "deliverable",
            "attach",
            "dlv-1",
            "--slot",
            "incubatee",
            "--file",
            "files/deck.pdf",
        ])
        .expect("cli should parse");
        let flags = cli.global_flags();
        assert_eq!(flags.actor, "usr-founder");
        assert_eq!(flags.role, "incubatee");
        assert_eq!(flags.db.as_deref(), Some("/tmp/ignite.db"));
        match cli.command {
            Commands::Deliverable {
                action: DeliverableCommands::Attach { id, slot, file },
            } => {
                assert_eq!(id, "dlv-1");
                assert_eq!(slot, "incubatee");
                assert_eq!(file, "files/deck.pdf");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn startup_create_parses_optional_profile() {
        let cli = Cli::try_parse_from([
            "ignite",
            "startup",
            "create",
            "--name",
            "Acme",
            "--owner",
            "usr-founder",
            "--industry",
            "Robotics",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::Startup {
                action: StartupCommands::Create {
                    name,
                    owner,
                    industry,
                    stage,
                    ..
                },
            } => {
                assert_eq!(name, "Acme");
                assert_eq!(owner, "usr-founder");
                assert_eq!(industry.as_deref(), Some("Robotics"));
                assert_eq!(stage, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
