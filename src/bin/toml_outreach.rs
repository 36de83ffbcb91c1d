use clap::Parser;
use lead_outreach::core::prompt::build_prompt;
use lead_outreach::core::{ConfigProvider, Pipeline};
use lead_outreach::utils::{logger, validation::Validate};
use lead_outreach::{LocalStorage, OutreachEngine, OutreachError, OutreachPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-outreach")]
#[command(about = "Lead outreach drafting driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "outreach.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Dry run - load the leads and show the first prompt without calling the API
    #[arg(long)]
    dry_run: bool,
}

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

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  📥 Input: {}", config.input_path());
    tracing::info!("  🌐 Endpoint: {}", config.api_endpoint());
    let policy = config.retry_policy();
    tracing::info!(
        "  🔁 Retries: {} attempts, {}s linear backoff step",
        policy.max_attempts,
        policy.backoff_step.as_secs()
    );
    tracing::info!("  ⏱️ Throttle: {:?} between leads", config.throttle_delay());
    tracing::info!(
        "  📁 Output: {}/{} {:?}{}",
        config.output_path(),
        config.output_name(),
        config.output_formats(),
        if config.compress_output() { " + zip" } else { "" }
    );
}

async fn perform_dry_run<P: Pipeline>(pipeline: &P) -> Result<(), OutreachError> {
    let sheet = pipeline.extract().await?;
    tracing::info!("🔍 Would process {} leads", sheet.len());

    match sheet.rows.first() {
        Some(row) => {
            println!("--- Prompt for {} ---", row.lead.name);
            println!("{}", build_prompt(&row.lead));
        }
        None => println!("The lead list is empty."),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based lead outreach");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    let pipeline = match OutreachPipeline::new(LocalStorage::new(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(&e),
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No API calls will be made");
        if let Err(e) = perform_dry_run(&pipeline).await {
            fail(&e);
        }
        return;
    }

    let engine = OutreachEngine::new(pipeline);
    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Outreach drafts generated!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => fail(&e),
    }
}
