use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use fileregex_cli::setup::{self, InstallOutcome, UpgradeOutcome};
use fileregex_core::mimetypes::BuiltinMimetypeCatalog;

#[derive(Parser)]
#[command(name = "fileregex-cli")]
#[command(about = "Fileregex CLI - Install and maintenance tools for the file regex validator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations and seed the default accepted mimetypes
    Install,
    /// Run migrations and upgrade stored settings
    Upgrade {
        /// Treat the installation as this version instead of the recorded one
        #[arg(long)]
        from_version: Option<i64>,
    },
    /// Print the accepted mimetypes setting
    ShowMimetypes,
    /// Replace the accepted mimetypes with the default list
    ResetMimetypes {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    fileregex_observability::basic_logging::init_basic_console_logging();

    let cli = Cli::parse();
    let pool = fileregex_db::init_db_pool().await;
    let catalog = BuiltinMimetypeCatalog;

    match cli.command {
        Commands::Install => handle_install(&pool, &catalog).await,
        Commands::Upgrade { from_version } => handle_upgrade(&pool, &catalog, from_version).await,
        Commands::ShowMimetypes => handle_show_mimetypes(&pool).await,
        Commands::ResetMimetypes { yes } => handle_reset_mimetypes(&pool, &catalog, yes).await,
    }
}

async fn migrate(pool: &sqlx::PgPool) {
    if let Err(e) = setup::run_migrations(pool).await {
        eprintln!("\n❌ Error running migrations: {}", e);
        std::process::exit(1);
    }
}

async fn handle_install(pool: &sqlx::PgPool, catalog: &BuiltinMimetypeCatalog) {
    migrate(pool).await;

    match setup::install(pool, catalog).await {
        Ok(InstallOutcome::Seeded(value)) => {
            println!("✅ Installed. Accepted mimetypes:\n{}", value);
        }
        Ok(InstallOutcome::AlreadyConfigured) => {
            println!("✅ Installed. Existing accepted mimetypes kept.");
        }
        Err(e) => {
            eprintln!("\n❌ Error installing: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_upgrade(
    pool: &sqlx::PgPool,
    catalog: &BuiltinMimetypeCatalog,
    from_version: Option<i64>,
) {
    migrate(pool).await;

    match setup::upgrade(pool, catalog, from_version).await {
        Ok(UpgradeOutcome::Reseeded { from }) => {
            println!("✅ Upgraded from {}. Accepted mimetypes reset to the defaults.", from);
        }
        Ok(UpgradeOutcome::UpToDate { version }) => {
            println!("✅ Already up to date (version {}).", version);
        }
        Ok(UpgradeOutcome::Installed(_)) => {
            println!("✅ No previous installation found, installed.");
        }
        Err(e) => {
            eprintln!("\n❌ Error upgrading: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_show_mimetypes(pool: &sqlx::PgPool) {
    match setup::current_mimetypes(pool).await {
        Ok(Some(value)) if value.trim().is_empty() => println!("(empty - all types accepted)"),
        Ok(Some(value)) => println!("{}", value),
        Ok(None) => println!("(not set - run `fileregex-cli install`)"),
        Err(e) => {
            eprintln!("\n❌ Error reading mimetypes: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_reset_mimetypes(pool: &sqlx::PgPool, catalog: &BuiltinMimetypeCatalog, yes: bool) {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Replace the accepted mimetypes with the default list?")
            .default(false)
            .interact()
            .unwrap_or(false);

    if !confirmed {
        println!("Aborted.");
        return;
    }

    match setup::reset_mimetypes(pool, catalog).await {
        Ok(value) => println!("✅ Accepted mimetypes reset:\n{}", value),
        Err(e) => {
            eprintln!("\n❌ Error resetting mimetypes: {}", e);
            std::process::exit(1);
        }
    }
}
