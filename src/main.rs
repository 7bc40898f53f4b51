use anyhow::Result;
use clap::{Parser, Subcommand};

use ledgerbook::backend::{Backend, LocalBackend};
use ledgerbook::cli::{
    handle_archive_command, handle_export_command, handle_note_command, handle_report_command,
    handle_settings_command, handle_transaction_command, ArchiveCommands, ExportCommands,
    NoteCommands, ReportCommands, SettingsCommands, TransactionCommands,
};
use ledgerbook::config::{paths::LedgerPaths, settings::Settings};
use ledgerbook::logging::init_tracing;
use ledgerbook::storage::init::needs_initialization;

#[derive(Parser)]
#[command(
    name = "ledgerbook",
    version,
    about = "Personal income and expense ledger",
    long_about = "Ledgerbook keeps a ledger of dated income and expense entries, \
                  free-form notes and a month archive that can be exported as a \
                  printable document per year or per month."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the ledger store
    Init,

    /// Show current configuration and paths
    Config,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Note commands
    #[command(subcommand)]
    Note(NoteCommands),

    /// Settings commands
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Month archive commands
    #[command(subcommand)]
    Archive(ArchiveCommands),

    /// Report commands
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export commands
    #[command(subcommand)]
    Export(ExportCommands),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;

    let Some(command) = cli.command else {
        println!("Ledgerbook - personal income and expense ledger");
        println!();
        println!("Run 'ledgerbook --help' for usage information.");
        return Ok(());
    };

    let first_run = needs_initialization(&paths);
    let backend = LocalBackend::open(paths.clone())?;

    match command {
        Commands::Init => {
            let settings = Settings::load_or_create(&paths)?;
            settings.save(&paths)?;
            if first_run {
                println!("Initialized Ledgerbook at: {}", paths.base_dir().display());
            } else {
                println!("Ledgerbook already initialized at: {}", paths.base_dir().display());
            }
            println!("Install date: {}", backend.get_install_date()?);
            println!("Currency:     {}", backend.get_currency()?);
            println!("Language:     {}", backend.get_language()?);
        }
        Commands::Config => {
            let settings = Settings::load_or_create(&paths)?;
            println!("Ledgerbook Configuration");
            println!("========================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Archive directory: {}", paths.archive_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Date format: {}", settings.date_format);
            println!("  Rounding:    {}", settings.rounding);
            match &settings.fonts_dir {
                Some(dir) => println!("  Fonts:       {}", dir.display()),
                None => println!("  Fonts:       built-in"),
            }
        }
        Commands::Transaction(cmd) => handle_transaction_command(&backend, &paths, cmd)?,
        Commands::Note(cmd) => handle_note_command(&backend, &paths, cmd)?,
        Commands::Settings(cmd) => handle_settings_command(&backend, &paths, cmd)?,
        Commands::Archive(cmd) => handle_archive_command(&backend, &paths, cmd)?,
        Commands::Report(cmd) => handle_report_command(&backend, &paths, cmd)?,
        Commands::Export(cmd) => handle_export_command(&backend, &paths, cmd)?,
    }

    Ok(())
}
