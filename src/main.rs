use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use certdesk::cli::{
    handle_audit_command, handle_certificate_command, handle_export_command,
    handle_prefix_command, handle_reference_command, handle_user_command, AuditCommands,
    CertificateCommands, ExportCommands, PrefixCommands, ReferenceCommands, UserCommands,
};
use certdesk::config::{paths::CertPaths, settings::Settings};
use certdesk::models::RequestContext;
use certdesk::storage::{initialize_storage, needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "certdesk",
    version,
    about = "Terminal-based quality-certificate records management",
    long_about = "certdesk manages quality-certificate records: number allocation \
                  under yearly prefixes, edition tracking, printing, cancellation, \
                  search, and export, with a full append-only audit trail."
)]
struct Cli {
    /// Acting user id (recorded in the audit trail)
    #[arg(long, global = true, env = "CERTDESK_USER", default_value = "admin")]
    user: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Certificate lifecycle commands
    #[command(subcommand, alias = "cert")]
    Certificate(CertificateCommands),

    /// Year-prefix administration
    #[command(subcommand)]
    Prefix(PrefixCommands),

    /// User account administration
    #[command(subcommand)]
    User(UserCommands),

    /// Part register and lookup list administration
    #[command(subcommand, alias = "ref")]
    Reference(ReferenceCommands),

    /// Export search results as CSV or JSON
    #[command(subcommand)]
    Export(ExportCommands),

    /// Inspect the audit trail
    #[command(subcommand)]
    Audit(AuditCommands),

    /// Initialize a fresh data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = CertPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing certdesk at: {}", paths.base_dir().display());
            initialize_storage(&storage)?;
            settings.save(&paths)?;
            println!("Initialization complete.");
            println!();
            println!("A default 'admin' user has been created. Next steps:");
            println!("  certdesk prefix add <year> <code>   assign this year's prefix");
            println!("  certdesk user add <id> <name>       add staff accounts");
            println!("  certdesk reference add-part <no>    register product numbers");
            return Ok(());
        }

        Some(Commands::Config) => {
            println!("certdesk configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Page size:               {}", settings.page_size);
            println!("  Date format:             {}", settings.date_format);
            println!(
                "  Allow cancelled update:  {}",
                settings.allow_cancelled_update
            );
            return Ok(());
        }

        _ => {}
    }

    if needs_initialization(&paths) {
        bail!("certdesk has not been initialized. Run 'certdesk init' first.");
    }

    storage.load_all()?;
    let user = storage.users.get_required(&cli.user)?;
    let ctx = RequestContext::for_user(&user);

    match cli.command {
        Some(Commands::Certificate(cmd)) => {
            handle_certificate_command(&storage, &settings, &ctx, cmd)?;
        }
        Some(Commands::Prefix(cmd)) => {
            handle_prefix_command(&storage, &ctx, cmd)?;
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, &ctx, cmd)?;
        }
        Some(Commands::Reference(cmd)) => {
            handle_reference_command(&storage, &ctx, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit(cmd)) => {
            handle_audit_command(&storage, cmd)?;
        }
        Some(Commands::Init) | Some(Commands::Config) => unreachable!(),
        None => {
            println!("certdesk - quality-certificate records management");
            println!();
            println!("Run 'certdesk --help' for usage information.");
        }
    }

    Ok(())
}
