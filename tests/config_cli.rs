use std::fs;
use std::io::Cursor;

use pump_power_calculator::{
    app::{self, AppError},
    config,
    i18n::Translator,
    pump::ValidationError,
    ui_cli::CliArgs,
};

#[test]
fn missing_config_is_written_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let cfg = config::load_or_default_at(&path).expect("default config");
    assert!(path.exists());
    assert_eq!(cfg.defaults.efficiency_percent, 70);
    assert_eq!(cfg.path, path);

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[defaults]"), "{written}");
    assert!(written.contains("fluid_density = 1000.0"), "{written}");
}

#[test]
fn saved_settings_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pump.toml");
    let mut cfg = config::load_or_default_at(&path).unwrap();
    cfg.language = "ko".into();
    cfg.defaults.head = 12.5;
    cfg.save().unwrap();

    let back = config::load_or_default_at(&path).unwrap();
    assert_eq!(back.language, "ko");
    assert_eq!(back.defaults.head, 12.5);
}

#[test]
fn broken_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "show_gauge = [").unwrap();
    assert!(matches!(
        config::load_or_default_at(&path),
        Err(config::ConfigError::Serde(_))
    ));
}

fn run_captured(args: &CliArgs, tr: &Translator) -> (Result<(), AppError>, String) {
    let cfg = config::Config::default();
    let mut input = Cursor::new("");
    let mut out = Vec::new();
    let res = app::run_with(args, &cfg, tr, &mut input, &mut out);
    (res, String::from_utf8(out).unwrap())
}

#[test]
fn cli_prints_power_and_gauge_for_valid_flags() {
    let tr = Translator::new("en");
    let args = CliArgs {
        flow: Some(3600.0),
        head: Some(1.0),
        efficiency: Some(100),
        ..CliArgs::default()
    };
    let (res, printed) = run_captured(&args, &tr);
    assert!(res.is_ok());
    assert!(printed.contains("Required Pump Power: 9.81 kW"), "{printed}");
    assert!(printed.contains("Pump Power (kW)"), "{printed}");
    let bar = format!("[{}{}{}]", "=".repeat(13), "#".repeat(14), ".".repeat(13));
    assert!(printed.contains(&bar), "{printed}");
    assert!(printed.contains("Formula Used: P = ρ·g·Q·H / η"), "{printed}");
}

#[test]
fn cli_no_gauge_flag_hides_bar() {
    let tr = Translator::new("en");
    let args = CliArgs {
        flow: Some(3600.0),
        head: Some(1.0),
        efficiency: Some(100),
        no_gauge: true,
        ..CliArgs::default()
    };
    let (res, printed) = run_captured(&args, &tr);
    assert!(res.is_ok());
    assert!(!printed.contains("Pump Power (kW)"), "{printed}");
    assert!(!printed.contains('['), "{printed}");
}

#[test]
fn cli_zero_head_is_a_validation_warning() {
    let tr = Translator::new("en");
    let args = CliArgs {
        head: Some(0.0),
        ..CliArgs::default()
    };
    let (res, printed) = run_captured(&args, &tr);
    let err = res.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(
        printed.contains("⚠ Please enter valid input values to calculate pump power."),
        "{printed}"
    );
    assert!(!printed.contains("Required Pump Power"), "{printed}");
}

#[test]
fn cli_reports_clamped_efficiency() {
    let tr = Translator::new("en");
    let args = CliArgs {
        efficiency: Some(0),
        no_gauge: true,
        ..CliArgs::default()
    };
    let (res, printed) = run_captured(&args, &tr);
    assert!(res.is_ok());
    assert!(
        printed.contains("Pump Efficiency (%) adjusted to the allowed range: 1"),
        "{printed}"
    );
}

#[test]
fn errors_follow_selected_language() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "show_gauge = [").unwrap();
    let err = AppError::from(config::load_or_default_at(&path).unwrap_err());

    let en = err.localized(&Translator::new("en"));
    assert!(en.starts_with("Config parse error: "), "{en}");
    assert!(!en.contains("설정"), "{en}");
    let ko = err.localized(&Translator::new("ko"));
    assert!(ko.starts_with("설정 파싱 오류: "), "{ko}");

    let err = AppError::from(ValidationError::NonPositiveHead);
    assert_eq!(
        err.localized(&Translator::new("en")),
        "Input error: Head must be greater than 0."
    );
    assert_eq!(
        err.localized(&Translator::new("ko")),
        "입력 오류: 양정은 0보다 커야 합니다."
    );
}

#[test]
fn language_pack_overrides_builtin_strings() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("en.toml"),
        "[gauge]\ntitle = \"Shaft power gauge\"\n",
    )
    .unwrap();
    let pack = dir.path().to_str().unwrap();
    let tr = Translator::new_with_pack("en-us", Some(pack));
    assert_eq!(tr.t("gauge.title"), "Shaft power gauge");
    assert_eq!(tr.t("formula.title"), "Formula Used");
}
