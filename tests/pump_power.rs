//! 축동력 공식과 입력 검사 회귀 테스트.
use proptest::prelude::*;
use pump_power_calculator::pump::{self, PumpParameters, ValidationError};

fn params(density: f64, flow: f64, head: f64, eff: u8) -> PumpParameters {
    PumpParameters {
        fluid_density: density,
        flow_rate: flow,
        head,
        efficiency_percent: eff,
    }
}

#[test]
fn one_cubic_meter_per_second_gives_9_81_kw() {
    let p = pump::compute(params(1000.0, 3600.0, 1.0, 100)).expect("valid input");
    assert!((p.value() - 9.81).abs() < 1e-9, "p={}", p.value());
    assert_eq!(p.to_string(), "9.81 kW");
}

#[test]
fn zero_flow_withholds_result() {
    assert_eq!(
        pump::compute(params(1000.0, 0.0, 20.0, 70)),
        Err(ValidationError::NonPositiveFlowRate)
    );
}

#[test]
fn zero_head_withholds_result() {
    assert_eq!(
        pump::compute(params(1000.0, 50.0, 0.0, 70)),
        Err(ValidationError::NonPositiveHead)
    );
}

#[test]
fn minimum_efficiency_is_hundred_times_full_efficiency() {
    let low = pump::compute(params(1000.0, 50.0, 20.0, 1)).unwrap().value();
    let full = pump::compute(params(1000.0, 50.0, 20.0, 100)).unwrap().value();
    assert!((low - 100.0 * full).abs() < 1e-9 * low, "low={low} full={full}");
}

#[test]
fn gauge_axis_follows_power() {
    let p = pump::compute(params(1000.0, 3600.0, 1.0, 100)).unwrap();
    let g = pump::gauge(p);
    assert!((g.axis_max - 9.81 * 1.5).abs() < 1e-9);

    let tiny = pump::compute(params(1.0, 1.0, 1.0, 100)).unwrap();
    assert_eq!(pump::gauge(tiny).axis_max, 1.0);
}

proptest! {
    #[test]
    fn strictly_increasing_in_flow(
        density in 1.0f64..3000.0,
        flow in 0.1f64..10_000.0,
        extra in 0.1f64..1000.0,
        head in 0.1f64..500.0,
        eff in 1u8..=100,
    ) {
        let a = pump::compute(params(density, flow, head, eff)).unwrap();
        let b = pump::compute(params(density, flow + extra, head, eff)).unwrap();
        prop_assert!(b.value() > a.value());
    }

    #[test]
    fn strictly_increasing_in_density(
        density in 1.0f64..3000.0,
        extra in 0.1f64..1000.0,
        flow in 0.1f64..10_000.0,
        head in 0.1f64..500.0,
        eff in 1u8..=100,
    ) {
        let a = pump::compute(params(density, flow, head, eff)).unwrap();
        let b = pump::compute(params(density + extra, flow, head, eff)).unwrap();
        prop_assert!(b.value() > a.value());
    }

    #[test]
    fn inverse_in_efficiency(
        density in 1.0f64..3000.0,
        flow in 0.1f64..10_000.0,
        head in 0.1f64..500.0,
        eff in 1u8..=100,
    ) {
        let at_eff = pump::compute(params(density, flow, head, eff)).unwrap().value();
        let at_full = pump::compute(params(density, flow, head, 100)).unwrap().value();
        let expected = at_full * 100.0 / f64::from(eff);
        prop_assert!((at_eff - expected).abs() <= 1e-9 * expected);
    }

    #[test]
    fn deterministic(
        density in 1.0f64..3000.0,
        flow in 0.0f64..10_000.0,
        head in 0.0f64..500.0,
        eff in 1u8..=100,
    ) {
        let p = params(density, flow, head, eff);
        let a = pump::compute(p).map(|v| v.value().to_bits());
        let b = pump::compute(p).map(|v| v.value().to_bits());
        prop_assert_eq!(a, b);
    }
}
