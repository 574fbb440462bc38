use clap::Parser;
use sghm_forms::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env if present so SGHM_* overrides apply before config is read
    let _ = dotenvy::dotenv();

    let config = sghm_forms::config::config();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.output.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    if !sghm_forms::is_production!() {
        tracing::debug!("Running sghm in {:?} mode", config.environment);
    }

    let cli = Cli::parse();

    if let Err(e) = sghm_forms::cli::run(cli) {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
