use clap::Parser;
use lead_outreach::utils::{logger, validation::Validate};
use lead_outreach::{CliConfig, LocalStorage, OutreachEngine, OutreachError, OutreachPipeline};

fn fail(e: &OutreachError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting lead-outreach");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let pipeline = match OutreachPipeline::new(LocalStorage::new(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(&e),
    };
    let engine = OutreachEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✓ CSV updated successfully!");
            println!("✓ Saved to: {}", output_path);
        }
        Err(e) => fail(&e),
    }
}
