use clap::Parser;
use sloview_testdata::config::LogFormat;
use sloview_testdata::core::summary::summarize;
use sloview_testdata::utils::logger;
use sloview_testdata::{parse_descriptor, server, CliConfig, Result, Settings};

async fn check_document(settings: &Settings) -> Result<()> {
    let loader = settings.source.clone().into_loader();
    tracing::info!("🔍 Checking {}", loader.describe());

    let text = loader.load().await?;
    let descriptor = parse_descriptor(&text)?;

    println!("✅ {} is a valid descriptor", loader.describe());
    print!("{}", summarize(&descriptor));
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match cli.to_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(settings.verbose),
        LogFormat::Json => logger::init_json_logger(settings.verbose),
    }
    tracing::debug!("Resolved settings: {:?}", settings);

    let result = if cli.check {
        check_document(&settings).await
    } else {
        server::serve(settings).await
    };

    if let Err(e) = result {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}
