use airfare_core::encoding::{cyclical_pair, HOUR_PERIOD, MINUTE_PERIOD, MONTH_PERIOD, WEEKDAY_PERIOD};
use airfare_core::trip::day_name;
use airfare_core::{AirportCode, CabinClass, FeatureRow};
use airfare_store::RouteMetrics;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One-way, non-stop quote input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectFareRequest {
    pub departure: NaiveDateTime,
    /// Airport code as the pipeline was trained on it
    pub origin: String,
    pub destination: String,
    pub cabin: CabinClass,
}

impl DirectFareRequest {
    pub fn features(&self) -> FeatureRow {
        FeatureRow::new()
            .with("startingAirport", self.origin.as_str())
            .with("destinationAirport", self.destination.as_str())
            .with("departure_dayofweek", day_name(self.departure.weekday()))
            .with("departure_month", self.departure.month())
            .with("departure_hour", self.departure.hour())
            .with("departure_minute", self.departure.minute())
            .with("cabin_type", self.cabin.label())
    }
}

/// One leg of a non-stop round trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnLegRequest {
    pub departure: NaiveDateTime,
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub cabin: CabinClass,
}

impl ReturnLegRequest {
    /// `year` is supplied by the caller instead of read off the departure.
    /// The return model was fitted on a single calendar year and is fed that
    /// year as text, exactly as at training time.
    pub fn features(&self, year: i32) -> FeatureRow {
        FeatureRow::new()
            .with("startingAirport", self.origin.as_str())
            .with("destinationAirport", self.destination.as_str())
            .with("day", day_name(self.departure.weekday()))
            .with("month", self.departure.month())
            .with("hour", self.departure.hour())
            .with("year", year.to_string())
            .with("minute", self.departure.minute())
            .with("cabin_type", self.cabin.label())
    }
}

/// Whole-itinerary multi-hop quote input. Only the true endpoints and the
/// first departure are modelled; intermediate stops are not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MultiHopRequest {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub search_date: NaiveDate,
    pub depart_date: NaiveDate,
    pub depart_time: NaiveTime,
    pub is_basic_economy: bool,
    pub n_hops: u32,
    /// Per-leg cabins, in flight order
    pub cabins: Vec<CabinClass>,
}

impl MultiHopRequest {
    /// Days between the search and the first departure; may be negative
    pub fn lead_time_days(&self) -> i64 {
        (self.depart_date - self.search_date).num_days()
    }

    pub fn cabin_labels(&self) -> Vec<&'static str> {
        self.cabins.iter().map(|c| c.label()).collect()
    }

    /// Scalar part of the network input, in training order
    pub fn scalar_features(&self, route: &RouteMetrics) -> FeatureRow {
        let (dow_sin, dow_cos) = cyclical_pair(self.depart_date.weekday().num_days_from_monday() as f64, WEEKDAY_PERIOD);
        let (month_sin, month_cos) = cyclical_pair(self.depart_date.month() as f64, MONTH_PERIOD);
        let (hour_sin, hour_cos) = cyclical_pair(self.depart_time.hour() as f64, HOUR_PERIOD);
        let (minute_sin, minute_cos) = cyclical_pair(self.depart_time.minute() as f64, MINUTE_PERIOD);

        FeatureRow::new()
            .with("flightDayOfWeekSin", dow_sin)
            .with("flightDayOfWeekCos", dow_cos)
            .with("flightMonthSin", month_sin)
            .with("flightMonthCos", month_cos)
            .with("flightHourSin", hour_sin)
            .with("flightHourCos", hour_cos)
            .with("flightMinuteSin", minute_sin)
            .with("flightMinuteCos", minute_cos)
            .with("timeDeltaDays", self.lead_time_days())
            .with("travelDurationDay", route.duration_days)
            .with("totalTravelDistance", route.distance)
            .with("isBasicEconomy", self.is_basic_economy)
            .with("isRefundable", !self.is_basic_economy)
            .with("isNonStop", self.n_hops == 0)
            .with("numLegs", self.n_hops)
    }
}
