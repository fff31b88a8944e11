use clap::Parser;
use pd_policies::utils::logger;
use pd_policies::{CliConfig, PolicyFetcher, ReqwestGetter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting pd-policies CLI");

    let resolved = match config.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };
    tracing::debug!(
        "Fetching policies for '{}' with settings {:?}",
        resolved.domain,
        resolved.settings
    );

    let getter = ReqwestGetter::from_settings(&resolved.settings);
    let fetcher = PolicyFetcher::new(getter, &resolved.settings);

    match fetcher
        .get_escalation_policies(&resolved.token, &resolved.domain)
        .await
    {
        Ok(policies) => {
            tracing::info!("✅ Fetched {} escalation policies", policies.len());
            println!("{}", serde_json::to_string_pretty(&policies)?);
        }
        Err(failure) => {
            let (partial, e) = failure.into_parts();
            tracing::error!(
                "❌ Fetch failed after {} policies: {} (Category: {:?})",
                partial.len(),
                e,
                e.category()
            );
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
