use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_ledger::cli::{handle_expense_command, run_interactive, ExpenseCommands};
use expense_ledger::config::{LedgerPaths, Settings, LEDGER_DIR_ENV};
use expense_ledger::services::ExpenseService;
use expense_ledger::storage::CsvExpenseStore;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense ledger",
    long_about = "Record what you spend in a fixed set of categories, correct \
                  mistakes, and see totals per category. Data lives in a CSV \
                  file; `expense serve` exposes the same ledger over HTTP."
)]
struct Cli {
    /// Base directory for the ledger and settings
    #[arg(long, global = true, env = LEDGER_DIR_ENV)]
    dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Work with the ledger from an interactive menu
    Menu,

    /// Serve the ledger over HTTP
    Serve {
        /// Address to bind (overrides settings)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides settings)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show current configuration and paths
    Config {
        /// Write the effective settings to the config file
        #[arg(long)]
        write: bool,
    },
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_service(paths: &LedgerPaths) -> Result<ExpenseService<CsvExpenseStore>> {
    let ledger_file = paths.ledger_file();
    ExpenseService::open(CsvExpenseStore::new(&ledger_file))
        .with_context(|| format!("Failed to open ledger at {}", ledger_file.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let mut service = open_service(&paths)?;
            handle_expense_command(&mut service, &settings, cmd)?;
        }
        Some(Commands::Menu) => {
            let mut service = open_service(&paths)?;
            let stdin = std::io::stdin();
            run_interactive(&mut service, &settings, stdin.lock(), std::io::stdout())?;
        }
        Some(Commands::Serve { bind, port }) => {
            let mut server = settings.server.clone();
            if let Some(bind) = bind {
                server.bind = bind;
            }
            if let Some(port) = port {
                server.port = port;
            }

            let service = open_service(&paths)?;
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(async {
                let address = server.address();
                let listener = tokio::net::TcpListener::bind(&address)
                    .await
                    .with_context(|| format!("Failed to bind {}", address))?;
                expense_ledger::api::run_with_listener(service, listener).await?;
                Ok::<(), anyhow::Error>(())
            })?;
        }
        Some(Commands::Config { write }) => {
            if write {
                paths.ensure_directories()?;
                settings.save(&paths)?;
                println!("Wrote {}", paths.settings_file().display());
                println!();
            }

            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Log level:       {}", settings.log_level);
            println!("  Server address:  {}", settings.server.address());
        }
        None => {
            println!("Expense Ledger - track what you spend");
            println!();
            println!("Run 'expense menu' for the interactive menu, or");
            println!("'expense --help' for usage information.");
        }
    }

    Ok(())
}
