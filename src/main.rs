use anyhow::Context;
use clap::Parser;
use gcode_splicer::core::{ConfigProvider, Prompt};
use gcode_splicer::utils::error::ErrorSeverity;
use gcode_splicer::utils::prompt::{AssumeYes, ConsolePrompt};
use gcode_splicer::utils::{logger, validation::Validate};
use gcode_splicer::{CliConfig, LocalStorage, SpliceEngine, SpliceError, SplicePipeline};

fn main() -> anyhow::Result<()> {
    // 參數錯誤用退出碼 1，2 只留給拒絕覆寫
    let args = CliConfig::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            std::process::exit(1);
        }
        e.exit()
    });

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting gcode-splicer");

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        fail(&e);
    }

    if config.yes {
        run(config, AssumeYes)
    } else {
        run(config, ConsolePrompt)
    }
}

fn run<P: Prompt>(config: CliConfig, prompt: P) -> anyhow::Result<()> {
    let dry_run = config.dry_run;
    tracing::info!(
        "Splicing {} files into {} from layer {}",
        config.input_files().len(),
        config.output_file(),
        config.start_layer()
    );

    let pipeline = SplicePipeline::new(LocalStorage::default(), config, prompt);
    let engine = SpliceEngine::new(pipeline);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        let plan = engine.dry_run().unwrap_or_else(|e| fail(&e));
        let json = serde_json::to_string_pretty(&plan).context("failed to serialize splice plan")?;
        println!("{}", json);
        return Ok(());
    }

    match engine.run() {
        Ok(summary) => {
            tracing::info!(
                "✅ Spliced {} files ({} layers, {} per file) into {} lines",
                summary.documents,
                summary.layer_count,
                summary.layers_per_document,
                summary.output_lines
            );
            println!("✅ Output saved to: {}", summary.output_path.display());
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &SpliceError) -> ! {
    tracing::error!(
        "❌ Splice failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
