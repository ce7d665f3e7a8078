use clap::Parser;
use pump_power_calculator::{app, config, i18n, telemetry, ui_cli::CliArgs};

/// CLI 엔트리 포인트. 설정을 로드한 뒤 계산을 한 번 실행한다.
fn main() {
    telemetry::init_tracing("warn");
    let args = CliArgs::parse();

    // 설정이 깨져 있어도 오류 메시지는 선택된 언어로 낸다.
    let cfg = config::load_or_default_at(&args.config);
    let cfg_lang = cfg.as_ref().ok().map(|c| c.language.as_str());
    let lang = i18n::resolve_language(&args.lang, cfg_lang);
    let pack_dir = cfg
        .as_ref()
        .ok()
        .and_then(|c| c.language_pack_dir.as_deref());
    let tr = i18n::Translator::new_with_pack(&lang, pack_dir);
    tracing::debug!(lang = tr.language_code(), "cli started");

    let result = cfg
        .map_err(app::AppError::from)
        .and_then(|cfg| app::run(&args, &cfg, &tr));
    if let Err(err) = result {
        // 입력 경고는 app::run에서 이미 출력했다.
        if !matches!(err, app::AppError::Validation(_)) {
            tracing::error!(%err, "pump power calculation failed");
            eprintln!("{}", err.localized(&tr));
        }
        std::process::exit(err.exit_code());
    }
}
