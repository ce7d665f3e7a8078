//! 펌프 축동력 계산 모듈을 모아둔다.
//! 동력 계산(P = ρ·g·Q·H / η), 게이지 표시 모델, 공식 안내 문자열로 구성한다.

pub mod formula;
pub mod gauge;
pub mod power;

pub use gauge::{gauge, GaugeBand, GaugeModel};
pub use power::{compute, hydraulic_power_kw, PowerKw, PumpParameters, ValidationError};
