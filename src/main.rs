use clap::Parser;
use glyphcast::cli::{self, Args};

/// Load .env file and configure logging.
///
/// Existing environment variables win over `.env` entries.
/// `RUST_LOG` controls verbosity, default `warn`.
fn init_env() {
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

#[tokio::main]
async fn main() {
    init_env();

    let args = Args::parse();
    if let Err(e) = cli::run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
