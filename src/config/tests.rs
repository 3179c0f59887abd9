use super::*;
use crate::input::router::RouterSettings;
use tempfile::TempDir;

#[test]
fn empty_file_yields_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.keyboard.repeat_initial_delay_ms, 250);
    assert_eq!(config.keyboard.repeat_tick_rate_ms, 70);
    assert_eq!(config.mouse.double_click_time_ms, 250);
    assert_eq!(config.mouse.drag_start_distance, 0.0);
    assert_eq!(config.mouse.click_drag_distance, 40.0);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config: Config = toml::from_str(
        r#"
        [mouse]
        double_click_time_ms = 400
        "#,
    )
    .unwrap();

    assert_eq!(config.mouse.double_click_time_ms, 400);
    assert_eq!(config.mouse.click_drag_distance, 40.0);
    assert_eq!(config.keyboard, KeyboardConfig::default());
}

#[test]
fn out_of_range_values_are_clamped() {
    let mut config = Config::default();
    config.keyboard.repeat_initial_delay_ms = 9000;
    config.keyboard.repeat_tick_rate_ms = 0;
    config.mouse.double_click_time_ms = 10_000;
    config.mouse.drag_start_distance = -5.0;
    config.mouse.click_drag_distance = 5000.0;

    config.validate_and_clamp();

    assert_eq!(config.keyboard.repeat_initial_delay_ms, 5000);
    assert_eq!(config.keyboard.repeat_tick_rate_ms, 1);
    assert_eq!(config.mouse.double_click_time_ms, 2000);
    assert_eq!(config.mouse.drag_start_distance, 0.0);
    assert_eq!(config.mouse.click_drag_distance, 1000.0);
}

#[test]
fn click_drag_distance_never_undercuts_drag_start() {
    let mut config = Config::default();
    config.mouse.drag_start_distance = 30.0;
    config.mouse.click_drag_distance = 10.0;

    config.validate_and_clamp();

    assert_eq!(config.mouse.click_drag_distance, 30.0);
}

#[test]
fn save_and_load_from_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.keyboard.repeat_tick_rate_ms = 33;
    config.mouse.drag_start_distance = 4.0;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn invalid_toml_reports_the_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[keyboard\nrepeat").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{err}").contains("Failed to parse config"));
}

#[test]
fn settings_follow_config() {
    let mut config = Config::default();
    config.keyboard.repeat_initial_delay_ms = 500;
    config.mouse.click_drag_distance = 12.5;

    let settings = RouterSettings::from(&config);
    assert_eq!(settings.repeat_initial_delay, 500.0);
    assert_eq!(settings.repeat_tick_rate, 70.0);
    assert_eq!(settings.click_drag_distance, 12.5);
    assert_eq!(RouterSettings::from(&Config::default()), RouterSettings::default());
}

#[test]
fn schema_lists_both_sections() {
    let schema = serde_json::to_value(Config::json_schema()).unwrap();
    let properties = &schema["properties"];
    assert!(properties.get("keyboard").is_some());
    assert!(properties.get("mouse").is_some());
}
