use std::io::{self, BufRead, Write};

use crate::config::{Config, ConfigError};
use crate::i18n::{keys, Translator};
use crate::pump::{self, ValidationError};
use crate::ui_cli::{self, CliArgs};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 계산 불가 입력
    Validation(ValidationError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Validation(e) => write!(f, "입력 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        AppError::Validation(value)
    }
}

impl AppError {
    /// 프로세스 종료 코드. 입력 경고는 2, 그 밖의 오류는 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) => 2,
            AppError::Io(_) | AppError::Config(_) => 1,
        }
    }

    /// 선택된 언어로 오류 메시지를 만든다. 하위 라이브러리 메시지는 그대로 붙인다.
    pub fn localized(&self, tr: &Translator) -> String {
        match self {
            AppError::Io(e) => format!("{}: {e}", tr.t(keys::ERROR_IO)),
            AppError::Config(ConfigError::Io(e)) => format!("{}: {e}", tr.t(keys::ERROR_CONFIG)),
            AppError::Config(ConfigError::Serde(e)) => {
                format!("{}: {e}", tr.t(keys::ERROR_CONFIG_PARSE))
            }
            AppError::Config(ConfigError::Serialize(e)) => {
                format!("{}: {e}", tr.t(keys::ERROR_CONFIG_SERIALIZE))
            }
            AppError::Validation(v) => {
                format!("{}: {}", tr.t(keys::ERROR_INPUT), tr.t(v.message_key()))
            }
        }
    }
}

/// CLI 계산을 한 번 실행한다. 표준 입출력을 쓴다.
pub fn run(args: &CliArgs, config: &Config, tr: &Translator) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    run_with(args, config, tr, &mut input, &mut out)
}

/// 입력 수집 → 범위 보정 → 계산 → 출력. 입력 경고는 `out`에 쓰고 `Validation` 오류로 반환한다.
pub fn run_with<R: BufRead, W: Write>(
    args: &CliArgs,
    config: &Config,
    tr: &Translator,
    input: &mut R,
    out: &mut W,
) -> Result<(), AppError> {
    let defaults = args.merge_over(config.defaults);
    let raw = if args.interactive {
        ui_cli::prompt_parameters_from(tr, defaults, input, out)?
    } else {
        defaults
    };
    let params = raw.clamped();
    ui_cli::report_clamped(tr, &raw, &params, out)?;

    match pump::compute(params) {
        Ok(power) => {
            let show_gauge = config.show_gauge && !args.no_gauge;
            ui_cli::print_result(tr, params, power, show_gauge, out)?;
            Ok(())
        }
        Err(err) => {
            ui_cli::print_warning(tr, out)?;
            Err(err.into())
        }
    }
}
