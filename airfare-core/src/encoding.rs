//! Cyclical (sine/cosine) encoding of periodic time features.
//!
//! A plain integer puts December and January eleven units apart; projecting
//! the value onto the unit circle makes period boundaries adjacent.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::str::FromStr;

use crate::features::{FeatureRow, FeatureTable};
use crate::{FareError, FareResult};

pub const MONTH_PERIOD: f64 = 12.0;
pub const HOUR_PERIOD: f64 = 24.0;
pub const MINUTE_PERIOD: f64 = 60.0;
pub const WEEKDAY_PERIOD: f64 = 7.0;

/// Trigonometric component of a cyclical encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trig {
    Sin,
    Cos,
}

impl Trig {
    pub fn apply(&self, angle: f64) -> f64 {
        match self {
            Trig::Sin => angle.sin(),
            Trig::Cos => angle.cos(),
        }
    }
}

impl FromStr for Trig {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sin" | "sine" => Ok(Trig::Sin),
            "cos" | "cosine" => Ok(Trig::Cos),
            other => Err(FareError::InvalidArgument(format!(
                "cyclical encoding needs sine or cosine, got '{}'",
                other
            ))),
        }
    }
}

/// `trig(2π · value / period)`. Values outside the period's natural range
/// are not rejected.
pub fn cyclical(value: f64, period: f64, trig: Trig) -> f64 {
    trig.apply(2.0 * PI * value / period)
}

/// Same as [`cyclical`] with the component given by name
pub fn cyclical_named(value: f64, period: f64, trig: &str) -> FareResult<f64> {
    Ok(cyclical(value, period, trig.parse()?))
}

/// `(sin, cos)` pair for one value
pub fn cyclical_pair(value: f64, period: f64) -> (f64, f64) {
    (cyclical(value, period, Trig::Sin), cyclical(value, period, Trig::Cos))
}

fn numeric_column(row: &FeatureRow, name: &str) -> FareResult<f64> {
    row.get(name)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| FareError::MalformedInput(format!("column '{}' missing or not numeric", name)))
}

fn push_pair(row: &mut FeatureRow, prefix: &str, value: f64, period: f64) {
    let (sin, cos) = cyclical_pair(value, period);
    row.set(&format!("{}_sin", prefix), sin);
    row.set(&format!("{}_cos", prefix), cos);
}

/// Batch encoder for the departure schema: replaces `departure_month`,
/// `departure_hour` and `departure_minute` with `{month,hour,minute}_{sin,cos}`.
pub fn cyclical_transform(table: &FeatureTable) -> FareResult<FeatureTable> {
    let mut rows = Vec::with_capacity(table.len());

    for source in &table.rows {
        let month = numeric_column(source, "departure_month")?;
        let hour = numeric_column(source, "departure_hour")?;
        let minute = numeric_column(source, "departure_minute")?;

        let mut row = source.clone();
        row.remove("departure_month");
        row.remove("departure_hour");
        row.remove("departure_minute");

        push_pair(&mut row, "month", month, MONTH_PERIOD);
        push_pair(&mut row, "hour", hour, HOUR_PERIOD);
        push_pair(&mut row, "minute", minute, MINUTE_PERIOD);
        rows.push(row);
    }

    Ok(FeatureTable::new(rows))
}

/// Batch encoder for the return-leg schema.
///
/// Only `hour` and `month` get sine/cosine columns; `year`, `day` and
/// `minute` are dropped without a substitute, unlike [`cyclical_transform`].
pub fn encode_return_cyclical(table: &FeatureTable) -> FareResult<FeatureTable> {
    const RAW_COLUMNS: [&str; 5] = ["year", "month", "day", "hour", "minute"];
    let mut rows = Vec::with_capacity(table.len());

    for source in &table.rows {
        if let Some(missing) = RAW_COLUMNS.iter().find(|c| !source.contains(c)) {
            return Err(FareError::MalformedInput(format!("column '{}' missing", missing)));
        }
        let hour = numeric_column(source, "hour")?;
        let month = numeric_column(source, "month")?;

        let mut row = source.clone();
        push_pair(&mut row, "hour", hour, HOUR_PERIOD);
        push_pair(&mut row, "month", month, MONTH_PERIOD);
        for column in RAW_COLUMNS {
            row.remove(column);
        }
        rows.push(row);
    }

    Ok(FeatureTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_pythagorean_identity() {
        for (period, range) in [(MONTH_PERIOD, 1..13), (HOUR_PERIOD, 0..24), (MINUTE_PERIOD, 0..60), (WEEKDAY_PERIOD, 0..7)] {
            for value in range {
                let s = cyclical(value as f64, period, Trig::Sin);
                let c = cyclical(value as f64, period, Trig::Cos);
                assert!((s * s + c * c - 1.0).abs() < EPS);
                assert!((-1.0..=1.0).contains(&s) && (-1.0..=1.0).contains(&c));
            }
        }
    }

    #[test]
    fn test_zero_maps_to_unit_vector() {
        for period in [MONTH_PERIOD, HOUR_PERIOD, MINUTE_PERIOD, WEEKDAY_PERIOD, 3.5] {
            assert_eq!(cyclical(0.0, period, Trig::Sin), 0.0);
            assert_eq!(cyclical(0.0, period, Trig::Cos), 1.0);
        }
    }

    #[test]
    fn test_wraparound_continuity() {
        // 23:59 sits next to midnight, not on the far side of the circle
        let eps = 1e-6;
        for trig in [Trig::Sin, Trig::Cos] {
            let end = cyclical(HOUR_PERIOD - eps, HOUR_PERIOD, trig);
            let start = cyclical(0.0, HOUR_PERIOD, trig);
            assert!((end - start).abs() < 1e-5);
        }

        let (s23, c23) = cyclical_pair(23.0, HOUR_PERIOD);
        let (s0, c0) = cyclical_pair(0.0, HOUR_PERIOD);
        let (s12, c12) = cyclical_pair(12.0, HOUR_PERIOD);
        let near = ((s23 - s0).powi(2) + (c23 - c0).powi(2)).sqrt();
        let far = ((s12 - s0).powi(2) + (c12 - c0).powi(2)).sqrt();
        assert!(near < far);
    }

    #[test]
    fn test_only_sine_or_cosine_accepted() {
        assert!(cyclical_named(3.0, 12.0, "sin").is_ok());
        assert!(cyclical_named(3.0, 12.0, "COS").is_ok());
        let err = cyclical_named(3.0, 12.0, "tan").unwrap_err();
        assert!(matches!(err, FareError::InvalidArgument(_)));
    }

    #[test]
    fn test_out_of_range_values_are_not_rejected() {
        let wrapped = cyclical(25.0, HOUR_PERIOD, Trig::Sin);
        let base = cyclical(1.0, HOUR_PERIOD, Trig::Sin);
        assert!((wrapped - base).abs() < EPS);
    }

    #[test]
    fn test_batch_transform_columns() {
        let table = FeatureTable::new(vec![FeatureRow::new()
            .with("startingAirport", "JFK")
            .with("departure_month", 12u32)
            .with("departure_hour", 0u32)
            .with("departure_minute", 30u32)]);

        let encoded = cyclical_transform(&table).unwrap();
        let names: Vec<&str> = encoded.rows[0].names().collect();
        assert_eq!(
            names,
            vec!["startingAirport", "month_sin", "month_cos", "hour_sin", "hour_cos", "minute_sin", "minute_cos"]
        );
        assert_eq!(encoded.rows[0].get("hour_cos").and_then(|v| v.as_f64()), Some(1.0));
    }

    #[test]
    fn test_return_transform_drops_raw_columns() {
        let table = FeatureTable::new(vec![FeatureRow::new()
            .with("cabin_type", "coach")
            .with("year", "2024")
            .with("month", 6u32)
            .with("day", "Saturday")
            .with("hour", 6u32)
            .with("minute", 15u32)]);

        let encoded = encode_return_cyclical(&table).unwrap();
        let names: Vec<&str> = encoded.rows[0].names().collect();
        assert_eq!(names, vec!["cabin_type", "hour_sin", "hour_cos", "month_sin", "month_cos"]);

        let mut missing_year = table.clone();
        missing_year.rows[0].remove("year");
        assert!(encode_return_cyclical(&missing_year).is_err());
    }
}
