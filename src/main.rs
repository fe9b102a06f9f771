use blog_api::cli::{self, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match cli::load_and_merge_config(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::init_logger_from_settings(&settings) {
        eprintln!("Logger initialization error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = cli::execute_command(&cli, settings).await {
        tracing::error!(error = %e, detail = %e.detail(), "Command failed");
        eprintln!("Error: {}", e.detail());
        std::process::exit(1);
    }

    Ok(())
}
