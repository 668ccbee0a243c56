use anyhow::Context;
use clap::Parser;
use company_enrich::utils::{logger, validation::Validate};
use company_enrich::{
    CliConfig, CompanyProfileRecord, EnrichConfig, EnrichmentEngine, JsonFileSink, ProfileSink,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting company-enrich");

    // 載入配置：有檔案用檔案，否則讀環境變數
    let mut config = match &cli.config {
        Some(path) => EnrichConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => EnrichConfig::from_env(),
    };
    if let Some(output_path) = &cli.output_path {
        config.output.path = output_path.clone();
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let query = cli.query();
    let engine = EnrichmentEngine::from_config(&config);

    if cli.survey {
        let survey = engine.survey(&query).await;
        println!("{}", serde_json::to_string_pretty(&survey)?);
        return Ok(());
    }

    let profile = engine.enrich(&query).await;
    println!("{}", serde_json::to_string_pretty(&profile)?);

    if !profile.success() {
        eprintln!("❌ No data found for {}", query.name);
        std::process::exit(2);
    }

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - profile not written");
        return Ok(());
    }

    let record = CompanyProfileRecord::from_profile(&query.name, &profile);
    let sink = JsonFileSink::new(&config.output.path);
    let written = sink.save(&record).await?;

    tracing::info!("📁 Profile saved to: {}", written);
    println!("📁 Profile saved to: {}", written);

    Ok(())
}
