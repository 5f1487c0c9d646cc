use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::iata::AirportCode;
use crate::{FareError, FareResult};

/// Cabin classes a fare can be quoted for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    Coach,
    PremiumCoach,
    Business,
    First,
}

impl CabinClass {
    pub const ALL: [CabinClass; 4] = [
        CabinClass::Coach,
        CabinClass::PremiumCoach,
        CabinClass::Business,
        CabinClass::First,
    ];

    /// Lowercase label the models were trained on
    pub fn label(&self) -> &'static str {
        match self {
            CabinClass::Coach => "coach",
            CabinClass::PremiumCoach => "premium coach",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CabinClass {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        CabinClass::ALL
            .into_iter()
            .find(|cabin| cabin.label() == normalized)
            .ok_or_else(|| FareError::MalformedInput(format!("unknown cabin class '{}'", s)))
    }
}

/// One flight segment as entered by the traveller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripLeg {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub cabin: CabinClass,
    pub is_basic_economy: bool,
}

impl TripLeg {
    pub fn departure(&self) -> NaiveDateTime {
        self.departure_date.and_time(self.departure_time)
    }
}

pub fn parse_date(date: &str) -> FareResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| FareError::MalformedInput(format!("invalid date '{}': {}", date, e)))
}

pub fn parse_time(time: &str) -> FareResult<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|e| FareError::MalformedInput(format!("invalid time '{}': {}", time, e)))
}

/// Combine a `YYYY-MM-DD` date and an `HH:MM` time into one timestamp
pub fn parse_departure(date: &str, time: &str) -> FareResult<NaiveDateTime> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}

/// Full English weekday name, as the tree pipelines were trained on
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_cabin_parsing() {
        assert_eq!("Coach".parse::<CabinClass>().unwrap(), CabinClass::Coach);
        assert_eq!("Premium coach".parse::<CabinClass>().unwrap(), CabinClass::PremiumCoach);
        assert_eq!("premium_coach".parse::<CabinClass>().unwrap(), CabinClass::PremiumCoach);
        assert_eq!(" FIRST ".parse::<CabinClass>().unwrap(), CabinClass::First);
        assert!(matches!(
            "economy plus".parse::<CabinClass>(),
            Err(FareError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_departure_parsing() {
        let departure = parse_departure("2024-06-15", "10:05").unwrap();
        assert_eq!(departure.month(), 6);
        assert_eq!(departure.hour(), 10);
        assert_eq!(departure.minute(), 5);
        assert_eq!(day_name(departure.weekday()), "Saturday");

        assert!(parse_departure("2024/06/15", "10:05").is_err());
        assert!(parse_departure("2024-06-15", "25:00").is_err());
    }
}
