use anyhow::Result;
use rusqlite::Connection;
use small_charts::core::registry::Registry;
use small_charts::domain::ports::ConfigProvider;
use small_charts::{
    ChartEngine, ChartError, ChartKind, ColorMode, DataPoint, LocalStorage, TomlConfig,
};
use tempfile::TempDir;

fn sample_folder() -> Result<TempDir> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("sales.csv"), "Key,Value\nnorth,4\nsouth,6\nnorth,1\n")?;
    std::fs::write(
        dir.path().join("survey.json"),
        r#"{"data": [{"key": "yes", "value": 12}, {"key": "no", "value": 3}]}"#,
    )?;
    std::fs::write(dir.path().join("readme.txt"), "not data")?;

    let conn = Connection::open(dir.path().join("weather.sqlite"))?;
    conn.execute_batch(
        "CREATE TABLE temperature (ts TEXT, value REAL);
         INSERT INTO temperature VALUES ('02.01.2023 12:00', -1.5);
         INSERT INTO temperature VALUES ('01.01.2023 08:00', 2);
         INSERT INTO temperature VALUES ('01.01.2023 20:00', 4);",
    )?;
    Ok(dir)
}

#[test]
fn test_end_to_end_every_format_and_chart_kind() -> Result<()> {
    let dir = sample_folder()?;
    let files = LocalStorage::new(dir.path()).list_files()?;
    assert_eq!(files.len(), 4);

    let mut engine = ChartEngine::new();
    let mut charted = 0;
    for file in &files {
        match engine.select_file(file) {
            Ok(series) => {
                assert!(!series.is_empty());
                charted += 1;
            }
            Err(ChartError::UnsupportedFormat { extension }) => {
                assert_eq!(extension, "txt");
                continue;
            }
            Err(other) => panic!("unexpected error for {:?}: {}", file, other),
        }

        for kind in [ChartKind::Pie, ChartKind::HorizontalBar, ChartKind::Bar] {
            engine.set_chart_kind(kind)?;
            assert_eq!(engine.surface().kind(), Some(kind));
            assert_eq!(engine.surface().category_count(), engine.series().len());
        }
    }
    assert_eq!(charted, 3);

    // The last supported file stays selected after the unsupported one.
    assert_eq!(
        engine.series(),
        &[DataPoint::new("01.01.2023", 3.0), DataPoint::new("02.01.2023", -1.5)]
    );
    Ok(())
}

#[test]
fn test_export_to_local_storage() -> Result<()> {
    let data = sample_folder()?;
    let out = TempDir::new()?;

    let config = TomlConfig::from_toml_str(
        r#"
[chart]
kind = "pie"
monochrome = true

[output]
path = "charts/survey.json"
"#,
    )?;

    let mut engine = ChartEngine::from_config(&config);
    engine.select_file(data.path().join("survey.json"))?;
    let output = config.output_path().unwrap_or("chart.json");
    engine.export(&LocalStorage::new(out.path()), output)?;

    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path().join(output))?)?;
    assert_eq!(exported["kind"], "pie");
    assert_eq!(exported["color_mode"], "monochrome");
    assert_eq!(exported["series"][0]["type"], "pie");
    assert_eq!(exported["series"][0]["slices"][0]["label"], "yes");
    assert_eq!(exported["options"]["animation"], true);
    Ok(())
}

#[test]
fn test_color_toggle_does_not_reextract() -> Result<()> {
    let dir = sample_folder()?;
    let path = dir.path().join("sales.csv");

    let mut engine = ChartEngine::new();
    engine.select_file(&path)?;
    let renders = engine.surface().render_count();

    // Changing the file on disk must not leak into the chart on a colour toggle.
    std::fs::write(&path, "Key,Value\nchanged,1\n")?;
    engine.set_color_mode(ColorMode::Monochrome);

    assert_eq!(engine.surface().render_count(), renders);
    assert_eq!(engine.series().len(), 3);
    assert_eq!(engine.series()[0].label, "north");
    Ok(())
}

#[test]
fn test_rendering_without_registered_options_is_reported() -> Result<()> {
    let dir = sample_folder()?;
    let mut engine = ChartEngine::with_registry(Registry::new());

    let err = engine.select_file(dir.path().join("sales.csv")).unwrap_err();

    assert!(matches!(err, ChartError::UnregisteredCapability { .. }));
    assert_eq!(err.user_friendly_message(), "Unable to create the chart object");
    assert!(!engine.is_rendered());
    Ok(())
}
