use clap::Parser;
use stack_init::utils::error::{ErrorSeverity, InitError};
use stack_init::utils::logger;
use stack_init::{CliConfig, TemplateEngine, TomlConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting stack-init");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match execute(&cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "Initialization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2, // 配置錯誤
                ErrorSeverity::High => 1,   // 範本內容錯誤
                ErrorSeverity::Critical => 3, // 寫入中斷或系統錯誤
            };
            std::process::exit(exit_code);
        }
    }
}

async fn execute(cli: &CliConfig) -> Result<(), InitError> {
    let target_dir = stack_init::resolve_target_dir(&cli.target_dir).await?;
    tracing::info!("Target directory: {}", target_dir.display());

    let mut config = TomlConfig::discover(&target_dir, cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let engine = stack_init::template_engine(&target_dir, config)?;

    if cli.dry_run {
        tracing::info!("DRY RUN MODE - No files will be written");
        perform_dry_run(&engine).await?;
        return Ok(());
    }

    let written = engine.run().await?;
    for path in &written {
        tracing::debug!("Updated {}", path);
    }

    tracing::info!(
        "Initialized '{}' ({} files updated)",
        engine.pipeline().project_name(),
        written.len()
    );
    stack_init::print_next_steps();
    Ok(())
}

async fn perform_dry_run(engine: &TemplateEngine) -> Result<(), InitError> {
    let rendered = engine.plan().await?;

    println!("Would initialize '{}':", engine.pipeline().project_name());
    for rendered_file in &rendered.files {
        println!(
            "  {} ({} placeholder replacements)",
            rendered_file.file.path, rendered_file.replacements
        );
    }

    Ok(())
}
