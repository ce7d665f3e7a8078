use serde::{Deserialize, Serialize};

use crate::i18n::keys;

/// 중력가속도(m/s²). 계산 기준값으로 고정한다.
pub const G: f64 = 9.81;
const SECONDS_PER_HOUR: f64 = 3600.0;

pub const MIN_FLUID_DENSITY: f64 = 1.0;
pub const MIN_EFFICIENCY_PERCENT: u8 = 1;
pub const MAX_EFFICIENCY_PERCENT: u8 = 100;

/// 펌프 동력 계산 입력. 매 계산마다 새로 만든다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpParameters {
    /// 유체 밀도(kg/m³), 최소 1.0
    pub fluid_density: f64,
    /// 체적 유량(m³/h), 최소 0.0
    pub flow_rate: f64,
    /// 펌프 양정(m), 최소 0.0
    pub head: f64,
    /// 펌프 효율(%), 1~100
    pub efficiency_percent: u8,
}

impl Default for PumpParameters {
    fn default() -> Self {
        Self {
            fluid_density: 1000.0,
            flow_rate: 50.0,
            head: 20.0,
            efficiency_percent: 70,
        }
    }
}

impl PumpParameters {
    /// 유량을 SI 단위(m³/s)로 환산한다.
    pub fn flow_rate_si(&self) -> f64 {
        self.flow_rate / SECONDS_PER_HOUR
    }

    /// 효율(%)을 소수(η)로 환산한다.
    pub fn efficiency_fraction(&self) -> f64 {
        f64::from(self.efficiency_percent) / 100.0
    }

    /// 입력 위젯의 허용 범위로 각 값을 잘라낸 사본을 반환한다.
    /// 유한하지 않은 값은 해당 항목의 최솟값으로 바꾼다.
    pub fn clamped(&self) -> Self {
        fn at_least(v: f64, min: f64) -> f64 {
            if v.is_finite() {
                v.max(min)
            } else {
                min
            }
        }
        Self {
            fluid_density: at_least(self.fluid_density, MIN_FLUID_DENSITY),
            flow_rate: at_least(self.flow_rate, 0.0),
            head: at_least(self.head, 0.0),
            efficiency_percent: self
                .efficiency_percent
                .clamp(MIN_EFFICIENCY_PERCENT, MAX_EFFICIENCY_PERCENT),
        }
    }
}

/// 계산 불가 입력을 표현한다. 검사 순서(유량 → 양정 → 효율)에서 처음 실패한 항목을 담는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// 유량이 0 이하
    NonPositiveFlowRate,
    /// 양정이 0 이하
    NonPositiveHead,
    /// 효율이 0 이하
    NonPositiveEfficiency,
    /// 입력은 유효하지만 결과가 f64 범위를 벗어남(무한대)
    PowerOutOfRange,
}

impl ValidationError {
    /// 실패한 입력 항목 이름(로그용).
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NonPositiveFlowRate => "flow_rate",
            ValidationError::NonPositiveHead => "head",
            ValidationError::NonPositiveEfficiency => "efficiency_percent",
            ValidationError::PowerOutOfRange => "power",
        }
    }

    /// 사용자에게 보여줄 메시지의 번역 키.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::NonPositiveFlowRate => keys::ERROR_FLOW_NOT_POSITIVE,
            ValidationError::NonPositiveHead => keys::ERROR_HEAD_NOT_POSITIVE,
            ValidationError::NonPositiveEfficiency => keys::ERROR_EFFICIENCY_NOT_POSITIVE,
            ValidationError::PowerOutOfRange => keys::ERROR_POWER_OUT_OF_RANGE,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NonPositiveFlowRate => write!(f, "유량은 0보다 커야 합니다."),
            ValidationError::NonPositiveHead => write!(f, "양정은 0보다 커야 합니다."),
            ValidationError::NonPositiveEfficiency => write!(f, "효율은 0보다 커야 합니다."),
            ValidationError::PowerOutOfRange => {
                write!(f, "계산 결과가 표현 범위를 벗어났습니다.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 축동력(kW). 내부 값은 전체 정밀도로 유지하고 표시할 때만 소수 둘째 자리로 반올림한다.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PowerKw(f64);

impl PowerKw {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn watts(self) -> f64 {
        self.0 * 1000.0
    }
}

impl std::fmt::Display for PowerKw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kW", self.0)
    }
}

// NaN은 비교가 false이므로 양수로 취급되지 않는다.
fn positive(v: f64) -> bool {
    v > 0.0
}

fn validate(params: &PumpParameters) -> Result<(), ValidationError> {
    if !positive(params.flow_rate_si()) {
        return Err(ValidationError::NonPositiveFlowRate);
    }
    if !positive(params.head) {
        return Err(ValidationError::NonPositiveHead);
    }
    if !positive(params.efficiency_fraction()) {
        return Err(ValidationError::NonPositiveEfficiency);
    }
    Ok(())
}

/// 수동력(kW) = ρ·g·Q·H / 1000. 효율 손실을 반영하기 전 유체가 받는 동력이다.
pub fn hydraulic_power_kw(params: PumpParameters) -> Result<PowerKw, ValidationError> {
    validate(&params)?;
    let watts = params.fluid_density * G * params.flow_rate_si() * params.head;
    let kw = watts / 1000.0;
    if !kw.is_finite() {
        return Err(ValidationError::PowerOutOfRange);
    }
    Ok(PowerKw(kw))
}

/// 펌프 축동력을 계산한다.
///
/// P = ρ·g·Q·H / η, Q는 m³/s로 환산한 유량. 유량·양정·효율 중 하나라도 0 이하이면
/// 값을 만들지 않고 [`ValidationError`]를 반환한다. 결과가 무한대로 넘치면
/// [`ValidationError::PowerOutOfRange`]를 반환하므로 `Ok` 값은 항상 유한하다.
pub fn compute(params: PumpParameters) -> Result<PowerKw, ValidationError> {
    match validate(&params) {
        Ok(()) => {}
        Err(err) => {
            tracing::debug!(field = err.field(), ?params, "pump power input rejected");
            return Err(err);
        }
    }
    let eta = params.efficiency_fraction();
    let power_watts = params.fluid_density * G * params.flow_rate_si() * params.head / eta;
    let power_kw = power_watts / 1000.0;
    if !power_kw.is_finite() {
        tracing::debug!(?params, "pump power overflowed");
        return Err(ValidationError::PowerOutOfRange);
    }
    let power = PowerKw(power_kw);
    tracing::debug!(?params, power_kw = power.value(), "pump power computed");
    Ok(power)
}
