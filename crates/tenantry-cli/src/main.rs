use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tenantry_cli::{commands, render};
use tenantry_observability::init_console_logging;
use tenantry_rbac::ensure_catalog;
use tracing::error;

#[derive(Parser)]
#[command(name = "tenantry-cli")]
#[command(about = "Tenantry CLI - Inspect roles and permissions, evaluate access offline", long_about = None)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the permission catalog, groups, implications and roles for consistency
    Verify,
    /// List catalog permissions
    Permissions {
        /// Only list permissions of this group
        #[arg(short = 'g', long)]
        group: Option<String>,
    },
    /// List permission groups
    Groups,
    /// List the default roles
    Roles,
    /// Show one default role
    Role {
        /// Role key, e.g. `editor`
        key: String,
    },
    /// Print the hierarchy level of a role key (0 when unknown)
    Level {
        /// Role key
        key: String,
    },
    /// Expand permissions through the manage aliases
    Expand {
        /// Permissions to expand
        #[arg(required = true)]
        permissions: Vec<String>,
    },
    /// Narrow permissions to what API-token scopes allow
    Filter {
        /// Comma separated token scopes
        #[arg(short = 's', long, value_delimiter = ',')]
        scopes: Vec<String>,

        /// Permissions to filter
        #[arg(required = true)]
        permissions: Vec<String>,
    },
    /// Resolve the effective permissions of a membership or API token
    Effective {
        /// Role key of the membership or token
        #[arg(short = 'r', long)]
        role: String,

        /// Evaluate as an API token with these comma separated scopes
        #[arg(short = 's', long, value_delimiter = ',')]
        scopes: Option<Vec<String>>,

        /// Stored membership permissions overriding the role defaults
        #[arg(short = 'p', long = "permission", conflicts_with = "scopes")]
        permissions: Option<Vec<String>>,

        /// Report which of these permissions are missing
        #[arg(long = "require")]
        required: Vec<String>,
    },
    /// Check whether one role may assign another
    CanAssign {
        /// Role of the member doing the assignment
        actor: String,
        /// Role being assigned
        target: String,
    },
}

fn main() {
    dotenv().ok();
    init_console_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!(error = %e, "Command failed");
        eprintln!("\n❌ {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let json = cli.json;

    if !matches!(cli.command, Commands::Verify) {
        ensure_catalog()?;
    }

    let output = match cli.command {
        Commands::Verify => render(&commands::verify()?, json)?,
        Commands::Permissions { group } => render(&commands::permissions(group.as_deref())?, json)?,
        Commands::Groups => render(&commands::groups(), json)?,
        Commands::Roles => render(&commands::roles(), json)?,
        Commands::Role { key } => render(&commands::role(&key)?, json)?,
        Commands::Level { key } => render(&commands::level(&key), json)?,
        Commands::Expand { permissions } => render(&commands::expand(&permissions), json)?,
        Commands::Filter {
            scopes,
            permissions,
        } => render(&commands::filter(&permissions, &scopes), json)?,
        Commands::Effective {
            role,
            scopes,
            permissions,
            required,
        } => render(
            &commands::effective(&role, scopes.as_deref(), permissions.as_deref(), &required),
            json,
        )?,
        Commands::CanAssign { actor, target } => {
            render(&commands::can_assign(&actor, &target), json)?
        }
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_filter_scopes_are_comma_separated() {
        let cli = Cli::parse_from(["tenantry-cli", "filter", "-s", "read,write", "content:view"]);
        match cli.command {
            Commands::Filter { scopes, permissions } => {
                assert_eq!(scopes, vec!["read", "write"]);
                assert_eq!(permissions, vec!["content:view"]);
            }
            _ => panic!("expected filter command"),
        }
    }

    #[test]
    fn test_scopes_and_stored_permissions_conflict() {
        let result = Cli::try_parse_from([
            "tenantry-cli",
            "effective",
            "--role",
            "editor",
            "--scopes",
            "read",
            "--permission",
            "content:view",
        ]);
        assert!(result.is_err());
    }
}
