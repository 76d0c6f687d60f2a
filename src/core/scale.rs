use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

// Thresholds where a 1-2-5 tick step switches to the next multiplier.
const STEP_E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const STEP_E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const STEP_E2: f64 = std::f64::consts::SQRT_2;

/// Continuous linear mapping from a data domain onto a pixel range.
///
/// The range may be descending (value axes grow upwards in pixel space).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Creates a scale over `[domain_start, domain_end]` mapped onto `[0, 1]`.
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn map(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value / 2.0 - self.domain_start / 2.0) / self.half_domain_span();
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (pixel - self.range_start) / range_span;
        let half_offset = normalized * self.half_domain_span();
        Ok(self.domain_start + half_offset + half_offset)
    }

    /// Half the domain width; stays finite when the full width would overflow.
    fn half_domain_span(self) -> f64 {
        self.domain_end / 2.0 - self.domain_start / 2.0
    }

    /// Returns roughly `count` human-friendly tick values inside the domain.
    ///
    /// Steps are powers of ten multiplied by 1, 2 or 5; values are always
    /// ascending regardless of domain orientation.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (start, stop) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        nice_ticks(start, stop, count)
    }
}

/// Integer tick indices plus increment; a negative increment means "divide".
#[derive(Debug, Clone, Copy, PartialEq)]
struct TickSpec {
    first: f64,
    last: f64,
    increment: f64,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    let count = count.max(0.0);
    let mut step = (stop - start) / count;
    if step.is_infinite() {
        step = stop / count - start / count;
    }
    if !step.is_finite() || step <= 0.0 {
        return None;
    }

    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= STEP_E10 {
        10.0
    } else if error >= STEP_E5 {
        5.0
    } else if error >= STEP_E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        first = (start * inc).round();
        last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        first = (start / inc).round();
        last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        increment = inc;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    Some(TickSpec {
        first,
        last,
        increment,
    })
}

/// Step between neighbouring nice ticks, as used by `nice_ticks`.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    match tick_spec(start, stop, count as f64) {
        Some(spec) if spec.increment < 0.0 => 1.0 / -spec.increment,
        Some(spec) => spec.increment,
        None => 0.0,
    }
}

#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let Some(spec) = tick_spec(start, stop, count as f64) else {
        return Vec::new();
    };
    if spec.last < spec.first {
        return Vec::new();
    }

    let n = (spec.last - spec.first) as usize;
    (0..=n)
        .map(|offset| {
            let index = spec.first + offset as f64;
            if spec.increment < 0.0 {
                index / -spec.increment
            } else {
                index * spec.increment
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, nice_ticks, tick_increment};

    #[test]
    fn nice_ticks_use_round_steps() {
        assert_eq!(nice_ticks(0.0, 40.0, 5), vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        assert_eq!(nice_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn nice_ticks_stay_inside_domain() {
        let ticks = nice_ticks(-3.0, 47.0, 5);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(40.0));
    }

    #[test]
    fn tick_increment_reports_fractional_steps() {
        assert!((tick_increment(0.0, 1.0, 5) - 0.2).abs() <= 1e-12);
        assert_eq!(tick_increment(0.0, 100.0, 10), 10.0);
    }

    #[test]
    fn descending_range_maps_upwards() {
        let scale = LinearScale::new(0.0, 100.0)
            .and_then(|scale| scale.with_range(370.0, 30.0))
            .expect("valid scale");
        assert_eq!(scale.map(0.0).expect("map"), 370.0);
        assert_eq!(scale.map(100.0).expect("map"), 30.0);
        assert_eq!(scale.invert(200.0).expect("invert"), 50.0);
    }

    #[test]
    fn domain_wider_than_f64_max_maps_to_finite_pixels() {
        let scale = LinearScale::new(-1e308, 1e308)
            .and_then(|scale| scale.with_range(370.0, 30.0))
            .expect("valid scale");
        assert_eq!(scale.map(-1e308).expect("map"), 370.0);
        assert_eq!(scale.map(0.0).expect("map"), 200.0);
        assert_eq!(scale.map(1e308).expect("map"), 30.0);
        assert_eq!(scale.invert(30.0).expect("invert"), 1e308);
    }

    #[test]
    fn nice_ticks_survive_overflowing_span() {
        let ticks = nice_ticks(-1e308, 1e308, 5);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|tick| tick.is_finite()));
        assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
