//! hornero - terminal admin dashboard for a bakery.
//!
//! Usage:
//!   hornero                          # store in ./hornero.json, log to ./hornero.log
//!   hornero --data /srv/bakery.json  # custom store
//!   hornero --user caja -n 10        # prefill the login, 10 rows per page

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use hornero::backend::{Client, FileBackend};
use hornero::session::Session;
use hornero::table::RowsPerPage;
use hornero::tui::App;

/// Terminal admin dashboard for bakery records.
#[derive(Parser)]
#[command(name = "hornero", about = "Bakery admin dashboard")]
struct Args {
    /// JSON record store. Created with demo data when missing.
    #[arg(long, env = "HORNERO_DATA", default_value = "hornero.json")]
    data: PathBuf,

    /// Rows per page: 5, 10 or 25.
    #[arg(short = 'n', long, env = "HORNERO_ROWS_PER_PAGE", default_value = "5")]
    rows_per_page: RowsPerPage,

    /// Log file (the terminal belongs to the UI).
    #[arg(long, env = "HORNERO_LOG", default_value = "hornero.log")]
    log_file: PathBuf,

    /// Log level for hornero targets; RUST_LOG adds more directives.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Admin password used when seeding a new store.
    #[arg(long, env = "HORNERO_ADMIN_PASSWORD", default_value = "admin", hide_env_values = true)]
    admin_password: String,

    /// Prefill the login user.
    #[arg(short, long)]
    user: Option<String>,

    /// Input poll interval in milliseconds.
    #[arg(long, default_value_t = 250)]
    tick: u64,
}

fn init_tracing(path: &Path, level: &str) -> Result<(), String> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open log file '{}': {}", path.display(), e))?;
    let directive = format!("hornero={}", level)
        .parse::<Directive>()
        .map_err(|e| format!("invalid log level '{}': {}", level, e))?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing(&args.log_file, &args.log_level) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let backend = match FileBackend::open(&args.data, &args.admin_password) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error opening store '{}': {}", args.data.display(), e);
            std::process::exit(1);
        }
    };
    info!(
        data = %args.data.display(),
        rows_per_page = %args.rows_per_page,
        "starting"
    );

    let client = Client::new(Box::new(backend), Session::new());
    let app = App::new(client, args.rows_per_page, args.user);

    if let Err(e) = app.run(Duration::from_millis(args.tick.max(10))) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
    info!("bye");
}
