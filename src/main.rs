use anyhow::Context;
use clap::Parser;
use small_charts::domain::ports::ConfigProvider;
use small_charts::utils::error::ErrorSeverity;
use small_charts::utils::logger;
use small_charts::utils::validation::{validate_required_field, Validate};
use small_charts::{ChartEngine, ChartError, CliConfig, LocalStorage, TomlConfig};

fn exit_code(e: &ChartError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: ChartError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

fn list_folder(folder: &str) {
    let files = LocalStorage::new(folder).list_files().unwrap_or_else(|e| fail(e));
    println!("📁 {}", folder);
    for file in files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let marker = match small_charts::ExtractorKind::from_path(&file) {
            Ok(kind) => kind.extension(),
            Err(_) => "-",
        };
        println!("  {:<8} {}", marker, name);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };
    cli.apply_to(&mut config);

    let verbose = cli.verbose || config.verbose();
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting small-charts");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
        tracing::debug!("Effective config: {:?}", config);
    }

    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        fail(e);
    }

    if let Some(folder) = cli.list.as_deref() {
        list_folder(folder);
        return Ok(());
    }

    let input = match (&config.input.path, config.input.folder.as_deref()) {
        (None, Some(folder)) => {
            list_folder(folder);
            return Ok(());
        }
        (path, _) => validate_required_field("input.path", path)
            .unwrap_or_else(|e| fail(e))
            .clone(),
    };

    let mut engine = ChartEngine::from_config(&config).with_monitoring(cli.monitor);
    if let Err(e) = engine.select_file(&input) {
        fail(e);
    }

    let surface = engine.surface();
    println!(
        "✅ {} ({} categories, {:?})",
        surface.title().unwrap_or("chart"),
        surface.category_count(),
        surface.color_mode()
    );
    for point in engine.series() {
        println!("  {:<24} {}", point.label, point.value);
    }

    if let Some(output) = config.output_path() {
        let storage = LocalStorage::new(".");
        engine
            .export(&storage, output)
            .with_context(|| format!("exporting chart to {}", output))?;
        println!("📁 Chart saved to: {}", output);
    }

    engine.log_summary();
    Ok(())
}
