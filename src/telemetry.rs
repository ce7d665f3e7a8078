use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 로그 구독자를 설치한다. `RUST_LOG`가 없으면 기본 필터를 쓴다.
/// 로그는 stderr로 보내 CLI 결과 출력과 섞이지 않게 한다.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
    if let Err(err) = result {
        eprintln!("tracing init skipped: {err}");
    }
}
