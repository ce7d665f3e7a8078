use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::app::AppError;
use crate::i18n::{keys, Translator};
use crate::pump::{self, formula, GaugeModel, PowerKw, PumpParameters};

const GAUGE_WIDTH: usize = 40;

/// 명령행 인자.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "pump_power_calculator_cli", version, about = "Pump shaft power calculator")]
pub struct CliArgs {
    /// 유체 밀도 [kg/m³]
    #[arg(long)]
    pub density: Option<f64>,
    /// 유량 [m³/h]
    #[arg(long)]
    pub flow: Option<f64>,
    /// 펌프 양정 [m]
    #[arg(long)]
    pub head: Option<f64>,
    /// 펌프 효율 [%] (1~100)
    #[arg(long)]
    pub efficiency: Option<u8>,
    /// 값을 하나씩 물어본다. 엔터만 치면 기본값을 쓴다.
    #[arg(short, long)]
    pub interactive: bool,
    /// 텍스트 게이지를 출력하지 않는다.
    #[arg(long)]
    pub no_gauge: bool,
    /// 언어 코드 (auto/ko/en)
    #[arg(short = 'L', long, default_value = "auto")]
    pub lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

impl CliArgs {
    /// 지정된 플래그만 기본값 위에 덮어쓴다.
    pub fn merge_over(&self, defaults: PumpParameters) -> PumpParameters {
        PumpParameters {
            fluid_density: self.density.unwrap_or(defaults.fluid_density),
            flow_rate: self.flow.unwrap_or(defaults.flow_rate),
            head: self.head.unwrap_or(defaults.head),
            efficiency_percent: self.efficiency.unwrap_or(defaults.efficiency_percent),
        }
    }
}

/// 주어진 입력 스트림에서 네 입력값을 읽는다. 빈 줄은 기본값, 숫자가 아니면 다시 묻는다.
pub fn prompt_parameters_from<R: BufRead, W: Write>(
    tr: &Translator,
    defaults: PumpParameters,
    input: &mut R,
    out: &mut W,
) -> Result<PumpParameters, AppError> {
    writeln!(out, "\n=== {} ===", tr.t(keys::APP_TITLE))?;
    writeln!(out, "{}", tr.t(keys::APP_SUBTITLE))?;
    Ok(PumpParameters {
        fluid_density: read_or_default(
            tr,
            keys::INPUT_DENSITY,
            defaults.fluid_density,
            input,
            out,
        )?,
        flow_rate: read_or_default(tr, keys::INPUT_FLOW, defaults.flow_rate, input, out)?,
        head: read_or_default(tr, keys::INPUT_HEAD, defaults.head, input, out)?,
        efficiency_percent: read_or_default(
            tr,
            keys::INPUT_EFFICIENCY,
            defaults.efficiency_percent,
            input,
            out,
        )?,
    })
}

fn read_or_default<T, R, W>(
    tr: &Translator,
    label_key: &str,
    default: T,
    input: &mut R,
    out: &mut W,
) -> Result<T, AppError>
where
    T: FromStr + std::fmt::Display + Copy,
    R: BufRead,
    W: Write,
{
    let prompt = tr.tf(
        keys::PROMPT_KEEP_DEFAULT,
        &[("label", tr.t(label_key).to_string()), ("default", default.to_string())],
    );
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut buf = String::new();
        if input.read_line(&mut buf)? == 0 {
            // 입력 끝(EOF)이면 기본값으로 진행한다.
            return Ok(default);
        }
        let s = buf.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<T>() {
            Ok(v) => return Ok(v),
            Err(_) => writeln!(out, "{}", tr.t(keys::ERROR_INVALID_NUMBER))?,
        }
    }
}

/// 범위 보정으로 바뀐 항목을 알린다.
pub fn report_clamped<W: Write>(
    tr: &Translator,
    raw: &PumpParameters,
    clamped: &PumpParameters,
    out: &mut W,
) -> io::Result<()> {
    for (label_key, value) in clamped_fields(raw, clamped) {
        tracing::warn!(field = label_key, value = %value, "input clamped to widget range");
        writeln!(
            out,
            "{}",
            tr.tf(
                keys::NOTICE_CLAMPED,
                &[("label", tr.t(label_key).to_string()), ("value", value)],
            )
        )?;
    }
    Ok(())
}

fn clamped_fields(raw: &PumpParameters, clamped: &PumpParameters) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();
    // NaN 입력은 비교가 false라 != 로 잡힌다.
    if raw.fluid_density != clamped.fluid_density {
        out.push((keys::INPUT_DENSITY, clamped.fluid_density.to_string()));
    }
    if raw.flow_rate != clamped.flow_rate {
        out.push((keys::INPUT_FLOW, clamped.flow_rate.to_string()));
    }
    if raw.head != clamped.head {
        out.push((keys::INPUT_HEAD, clamped.head.to_string()));
    }
    if raw.efficiency_percent != clamped.efficiency_percent {
        out.push((keys::INPUT_EFFICIENCY, clamped.efficiency_percent.to_string()));
    }
    out
}

/// 계산 결과를 출력한다.
pub fn print_result<W: Write>(
    tr: &Translator,
    params: PumpParameters,
    power: PowerKw,
    show_gauge: bool,
    out: &mut W,
) -> io::Result<()> {
    writeln!(
        out,
        "🔹 {}",
        tr.tf(keys::RESULT_POWER, &[("power", power.to_string())])
    )?;
    if let Ok(hydraulic) = pump::hydraulic_power_kw(params) {
        writeln!(
            out,
            "   {}",
            tr.tf(keys::RESULT_HYDRAULIC, &[("power", hydraulic.to_string())])
        )?;
    }
    if show_gauge {
        writeln!(out, "\n{}", tr.t(keys::GAUGE_TITLE))?;
        writeln!(out, "{}", gauge_bar(&pump::gauge(power), GAUGE_WIDTH))?;
    }
    writeln!(out, "\n{}: {}", tr.t(keys::FORMULA_TITLE), formula::FORMULA)?;
    for line in formula::legend(tr) {
        writeln!(out, "  - {line}")?;
    }
    Ok(())
}

/// 계산할 수 없을 때의 경고를 출력한다.
pub fn print_warning<W: Write>(tr: &Translator, out: &mut W) -> io::Result<()> {
    writeln!(out, "⚠ {}", tr.t(keys::WARN_INVALID_INPUT))
}

/// 게이지를 한 줄 막대로 그린다. 50% 구간까지 `=`, 값까지 `#`, 나머지 `.`.
pub fn gauge_bar(model: &GaugeModel, width: usize) -> String {
    let cells = |kw: f64| (model.fraction_of(kw) * width as f64).round() as usize;
    let half = cells(model.bands[0].end);
    let filled = cells(model.bands[1].end).max(half);
    let mut bar = String::with_capacity(width + 32);
    bar.push('[');
    bar.extend(std::iter::repeat('=').take(half));
    bar.extend(std::iter::repeat('#').take(filled - half));
    bar.extend(std::iter::repeat('.').take(width.saturating_sub(filled)));
    bar.push(']');
    bar.push_str(&format!(" 0 … {:.2}", model.axis_max));
    bar
}
