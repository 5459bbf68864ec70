use anyhow::Result;
use clap::{Parser, Subcommand};

use acceptance::cli::{handle_draft_command, handle_history_command, handle_save_command};
use acceptance::config::{paths::AcceptancePaths, settings::Settings};
use acceptance::storage::Storage;

#[derive(Parser)]
#[command(
    name = "acceptance",
    version,
    about = "Reconcile and save vehicle service acceptance data",
    long_about = "acceptance-cli loads an acceptance export into a draft, lets you \
                  reconcile it position by position (duplicate, delete, add services \
                  to work groups, edit rows) and saves the result as one batch."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and settings
    Init,

    #[command(flatten)]
    Draft(acceptance::cli::DraftCommands),

    /// Save the draft as one accepted batch
    Save,

    /// Show accepted batches
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Show the audit trail instead of batches
        #[arg(long)]
        audit: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = AcceptancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing acceptance-cli at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'acceptance upload <file.csv>' to load acceptance data.");
        }
        Some(Commands::Draft(cmd)) => {
            handle_draft_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Save) => {
            handle_save_command(&storage)?;
        }
        Some(Commands::History { limit, audit }) => {
            handle_history_command(&storage, limit, audit)?;
        }
        Some(Commands::Config) => {
            println!("acceptance-cli Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:          {}", settings.currency_symbol);
            println!("  Date format:              {}", settings.date_format);
            println!("  Default transaction kind: {}", settings.default_transaction_kind);
            println!("  Confirm deletes:          {}", settings.confirm_deletes);
        }
        None => {
            println!("acceptance-cli - reconcile vehicle service acceptance data");
            println!();
            println!("Run 'acceptance --help' for usage information.");
        }
    }

    Ok(())
}
