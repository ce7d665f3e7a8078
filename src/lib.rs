//! 펌프 축동력 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod pump;
pub mod telemetry;
pub mod ui_cli;
