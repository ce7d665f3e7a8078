use super::power::PowerKw;

/// 게이지 눈금 구간 [start, end] (kW).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeBand {
    pub start: f64,
    pub end: f64,
}

/// 동력 게이지 표시 모델. 렌더러(GUI 페인터, CLI 막대)는 이 값만 보고 그린다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeModel {
    /// 표시 값(kW)
    pub value: f64,
    /// 축 최대값(kW). 축 범위는 [0, axis_max].
    pub axis_max: f64,
    /// 0~50% 구간, 50~100% 구간. 뒤쪽일수록 진하게 칠한다.
    pub bands: [GaugeBand; 2],
}

impl GaugeModel {
    /// 축 대비 값 비율(0~1).
    pub fn fraction(&self) -> f64 {
        self.fraction_of(self.value)
    }

    /// 임의의 kW 값을 축 비율(0~1)로 바꾼다. 결과는 항상 유한하다.
    /// +∞ 값은 1, NaN은 0으로 본다.
    pub fn fraction_of(&self, kw: f64) -> f64 {
        if kw.is_nan() || self.axis_max.is_nan() || self.axis_max <= 0.0 {
            return 0.0;
        }
        if kw == f64::INFINITY {
            return 1.0;
        }
        (kw / self.axis_max).clamp(0.0, 1.0)
    }
}

/// 계산된 동력으로 게이지 모델을 만든다. 축은 max(1, P·1.5)까지.
pub fn gauge(power: PowerKw) -> GaugeModel {
    let kw = power.value();
    GaugeModel {
        value: kw,
        axis_max: (kw * 1.5).max(1.0),
        bands: [
            GaugeBand {
                start: 0.0,
                end: kw * 0.5,
            },
            GaugeBand {
                start: kw * 0.5,
                end: kw,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pump::power::{compute, PumpParameters};

    #[test]
    fn small_power_uses_unit_axis() {
        // 1000·9.81·(1/3600)·10/1 ≈ 0.027 kW
        let p = compute(PumpParameters {
            fluid_density: 1000.0,
            flow_rate: 1.0,
            head: 10.0,
            efficiency_percent: 100,
        })
        .unwrap();
        let g = gauge(p);
        assert_eq!(g.axis_max, 1.0);
        assert!(g.fraction() < 0.05);
    }

    #[test]
    fn large_power_axis_is_one_and_a_half_times() {
        let p = compute(PumpParameters::default()).unwrap();
        let g = gauge(p);
        assert!((g.axis_max - p.value() * 1.5).abs() < 1e-12);
        assert!((g.fraction() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(g.bands[0].end, g.bands[1].start);
        assert_eq!(g.bands[1].end, p.value());
    }

    #[test]
    fn fraction_stays_finite_for_extreme_values() {
        let g = GaugeModel {
            value: f64::INFINITY,
            axis_max: f64::INFINITY,
            bands: [GaugeBand { start: 0.0, end: f64::INFINITY }; 2],
        };
        assert_eq!(g.fraction(), 1.0);
        let g = GaugeModel {
            value: f64::INFINITY,
            axis_max: 10.0,
            ..g
        };
        assert_eq!(g.fraction(), 1.0);
        assert_eq!(g.fraction_of(f64::NAN), 0.0);
        assert_eq!(g.fraction_of(-3.0), 0.0);
    }

    #[test]
    fn largest_computable_power_keeps_finite_gauge() {
        // 와트 값이 f64 범위 안이면 kW·1.5도 넘치지 않는다.
        let p = compute(PumpParameters {
            fluid_density: 1e150,
            flow_rate: 3600.0,
            head: 1e157,
            efficiency_percent: 100,
        })
        .unwrap();
        let g = gauge(p);
        assert!(g.axis_max.is_finite());
        assert!((g.fraction() - 2.0 / 3.0).abs() < 1e-12);
    }
}
