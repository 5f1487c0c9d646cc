use serde::{Deserialize, Serialize};

use crate::trip::{CabinClass, TripLeg};
use crate::{FareError, FareResult};

pub const MIN_MULTI_CITY_LEGS: usize = 2;
pub const MAX_MULTI_CITY_LEGS: usize = 4;

/// A bookable trip shape. Each variant maps onto exactly one estimator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Itinerary {
    OneWay { leg: TripLeg },
    Return { outbound: TripLeg, inbound: TripLeg },
    MultiCity { legs: Vec<TripLeg> },
}

impl Itinerary {
    /// Build and validate in one step
    pub fn one_way(leg: TripLeg) -> FareResult<Self> {
        let itinerary = Itinerary::OneWay { leg };
        itinerary.validate()?;
        Ok(itinerary)
    }

    pub fn round_trip(outbound: TripLeg, inbound: TripLeg) -> FareResult<Self> {
        let itinerary = Itinerary::Return { outbound, inbound };
        itinerary.validate()?;
        Ok(itinerary)
    }

    pub fn multi_city(legs: Vec<TripLeg>) -> FareResult<Self> {
        let itinerary = Itinerary::MultiCity { legs };
        itinerary.validate()?;
        Ok(itinerary)
    }

    pub fn legs(&self) -> Vec<&TripLeg> {
        match self {
            Itinerary::OneWay { leg } => vec![leg],
            Itinerary::Return { outbound, inbound } => vec![outbound, inbound],
            Itinerary::MultiCity { legs } => legs.iter().collect(),
        }
    }

    /// Enforces the same rules the booking form applies before a prediction
    pub fn validate(&self) -> FareResult<()> {
        let legs = self.legs();

        for (idx, leg) in legs.iter().enumerate() {
            if leg.origin == leg.destination {
                return Err(FareError::MalformedInput(format!(
                    "trip {}: origin and destination cannot be the same",
                    idx + 1
                )));
            }
            if leg.is_basic_economy && leg.cabin != CabinClass::Coach {
                return Err(FareError::MalformedInput(format!(
                    "trip {}: basic economy fares are only sold in coach",
                    idx + 1
                )));
            }
        }

        match self {
            Itinerary::OneWay { .. } => {}
            Itinerary::Return { outbound, inbound } => {
                if inbound.origin != outbound.destination || inbound.destination != outbound.origin {
                    return Err(FareError::MalformedInput(
                        "returning flight must reverse the departing flight".to_string(),
                    ));
                }
                if inbound.departure() < outbound.departure() {
                    return Err(FareError::MalformedInput(
                        "returning flight departs before the departing flight".to_string(),
                    ));
                }
            }
            Itinerary::MultiCity { legs } => {
                if !(MIN_MULTI_CITY_LEGS..=MAX_MULTI_CITY_LEGS).contains(&legs.len()) {
                    return Err(FareError::MalformedInput(format!(
                        "multi-city trips need {} to {} legs, got {}",
                        MIN_MULTI_CITY_LEGS,
                        MAX_MULTI_CITY_LEGS,
                        legs.len()
                    )));
                }
                if let (Some(first), Some(last)) = (legs.first(), legs.last()) {
                    if first.origin == last.destination {
                        return Err(FareError::MalformedInput(
                            "first origin and final destination cannot be the same in multi-city mode"
                                .to_string(),
                        ));
                    }
                }
                // Basic economy is chosen for the trip as a whole
                if legs.iter().any(|l| l.is_basic_economy) && !legs.iter().all(|l| l.is_basic_economy) {
                    return Err(FareError::MalformedInput(
                        "basic economy must apply to every leg of a multi-city trip".to_string(),
                    ));
                }
                if let Some(idx) = legs
                    .windows(2)
                    .position(|pair| pair[1].departure() < pair[0].departure())
                {
                    return Err(FareError::MalformedInput(format!(
                        "departure of trip {} needs to be after that of trip {}",
                        idx + 2,
                        idx + 1
                    )));
                }
            }
        }

        Ok(())
    }
}
