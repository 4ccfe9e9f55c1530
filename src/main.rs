use clap::Parser;
use rocketchat_user_export::utils::{logger, validation::Validate};
use rocketchat_user_export::{
    CliConfig, ExportConfig, ExportEngine, ExportError, ExportSummary, LocalStorage,
    RocketChatClient,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match run(&cli).await {
        Ok(summary) => {
            println!(
                "Completed export and written as {} to \"{}\".",
                summary.format, summary.path
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Export failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("error: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &CliConfig) -> Result<ExportSummary, ExportError> {
    tracing::info!("📁 Loading configuration from: {}", cli.config);
    let mut config = ExportConfig::from_file(&cli.config)?;
    cli.apply_to(&mut config);
    config.validate()?;
    tracing::debug!("Export config: {:?}", config);

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let format = config.format();
    let client = RocketChatClient::new(config.base_url());
    let storage = LocalStorage::default();
    let engine = ExportEngine::new_with_monitoring(client, storage, config, cli.monitor);

    engine.run(format).await
}
