use airfare_core::trip::parse_departure;
use airfare_core::{
    AirportCode, CabinClass, FareError, FareModel, FareResult, FeatureRow, Itinerary, ModelRepository, TripLeg,
};
use airfare_store::app_config::EstimatorSettings;
use airfare_store::{Config, DiskModelRepository, ReferenceData};
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;

use crate::features::{DirectFareRequest, MultiHopRequest, ReturnLegRequest};
use crate::quote::{FareQuote, QuoteComponent, QuoteKind};
use crate::schema::{align, default_multihop_schema};

/// Entry point for fare predictions.
///
/// Each call is independent: it assembles one feature row, hands it to one
/// model and returns the raw fare. Models come from the repository (cached
/// there), route facts from the shared reference data.
pub struct FareEstimator {
    models: Arc<dyn ModelRepository>,
    reference: Arc<ReferenceData>,
    settings: EstimatorSettings,
}

impl FareEstimator {
    pub fn new(models: Arc<dyn ModelRepository>, reference: Arc<ReferenceData>, settings: EstimatorSettings) -> Self {
        Self { models, reference, settings }
    }

    /// Disk-backed estimator: reference tables are read now, model
    /// artifacts on first use
    pub fn from_config(config: &Config) -> FareResult<Self> {
        let reference = ReferenceData::load(&config.reference)?;
        let models = DiskModelRepository::new(config.artifacts.clone());
        Ok(Self::new(Arc::new(models), Arc::new(reference), config.estimator.clone()))
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn settings(&self) -> &EstimatorSettings {
        &self.settings
    }

    /// One-way, non-stop fare. Airports may be bare codes or `"Name (CODE)"`
    /// display strings.
    pub fn estimate_direct_fare(
        &self,
        date: &str,
        time: &str,
        origin: &str,
        destination: &str,
        cabin: &str,
    ) -> FareResult<f64> {
        let request = DirectFareRequest {
            departure: parse_departure(date, time)?,
            origin: airport_field(origin)?,
            destination: airport_field(destination)?,
            cabin: cabin.parse()?,
        };
        self.predict_direct(&request)
    }

    /// Fare for one leg of a non-stop round trip; call once per direction
    pub fn estimate_return_leg_fare(
        &self,
        date: &str,
        time: &str,
        origin_display: &str,
        destination_display: &str,
        cabin: &str,
    ) -> FareResult<f64> {
        let request = ReturnLegRequest {
            departure: parse_departure(date, time)?,
            origin: AirportCode::from_display(origin_display)?,
            destination: AirportCode::from_display(destination_display)?,
            cabin: cabin.parse()?,
        };
        self.predict_return_leg(&request)
    }

    /// Whole-itinerary fare for a multi-hop trip
    #[allow(clippy::too_many_arguments)]
    pub fn estimate_multihop_fare(
        &self,
        origin_display: &str,
        destination_display: &str,
        search_date: NaiveDate,
        depart_date: NaiveDate,
        depart_time: NaiveTime,
        is_basic_economy: bool,
        n_hops: u32,
        cabins: &[&str],
    ) -> FareResult<f64> {
        let request = MultiHopRequest {
            origin: AirportCode::from_fixed_suffix(origin_display)?,
            destination: AirportCode::from_fixed_suffix(destination_display)?,
            search_date,
            depart_date,
            depart_time,
            is_basic_economy,
            n_hops,
            cabins: cabins
                .iter()
                .map(|c| c.parse::<CabinClass>())
                .collect::<FareResult<Vec<_>>>()?,
        };
        self.predict_multihop(&request)
    }

    pub fn predict_direct(&self, request: &DirectFareRequest) -> FareResult<f64> {
        tracing::debug!("Direct fare requested: {} -> {}", request.origin, request.destination);
        let model = self.models.direct_fare_model()?;
        let fare = infer(model.as_ref(), &request.features())?;

        tracing::info!(
            "Direct fare {} -> {} ({}): {:.2}",
            request.origin,
            request.destination,
            request.cabin,
            fare
        );
        Ok(fare)
    }

    pub fn predict_return_leg(&self, request: &ReturnLegRequest) -> FareResult<f64> {
        tracing::debug!(
            "Return leg requested: {} -> {} (model year {})",
            request.origin,
            request.destination,
            self.settings.return_model_year
        );
        let model = self.models.return_fare_model()?;
        let fare = infer(model.as_ref(), &request.features(self.settings.return_model_year))?;

        tracing::info!(
            "Return leg fare {} -> {} ({}): {:.2}",
            request.origin,
            request.destination,
            request.cabin,
            fare
        );
        Ok(fare)
    }

    pub fn predict_multihop(&self, request: &MultiHopRequest) -> FareResult<f64> {
        // 1. Lead time
        let lead_time = request.lead_time_days();
        if lead_time < 0 && !self.settings.allow_negative_lead_time {
            return Err(FareError::MalformedInput(format!(
                "departure {} is {} days before the search date {}",
                request.depart_date, -lead_time, request.search_date
            )));
        }

        // 2. Static route facts
        let route = self.reference.route_metrics(&request.origin, &request.destination)?;

        // 3. Scalar features + cabin indicators
        let encoder = self.models.cabin_encoder()?;
        let mut row = request.scalar_features(&route);
        row.extend(encoder.transform_named(&request.cabin_labels())?);

        // 4. Align by name to what the network was trained on
        let model = self.models.multihop_model()?;
        let schema = model
            .input_schema()
            .map(|s| s.to_vec())
            .unwrap_or_else(|| default_multihop_schema(encoder.classes()));
        let aligned = align(&row, &schema)?;

        // 5. Forward pass
        let fare = infer(model.as_ref(), &aligned)?;

        tracing::info!(
            "Multi-hop fare {} -> {} ({} hops, {} days out): {:.2}",
            request.origin,
            request.destination,
            request.n_hops,
            lead_time,
            fare
        );
        Ok(fare)
    }

    /// Validate an itinerary and price it with the one estimator its shape
    /// calls for. A return trip is priced as two independent legs.
    pub fn quote(&self, itinerary: &Itinerary, search_date: NaiveDate) -> FareResult<FareQuote> {
        itinerary.validate()?;

        match itinerary {
            Itinerary::OneWay { leg } => {
                let fare = self.predict_direct(&DirectFareRequest {
                    departure: leg.departure(),
                    origin: leg.origin.to_string(),
                    destination: leg.destination.to_string(),
                    cabin: leg.cabin,
                })?;
                Ok(FareQuote::new(QuoteKind::OneWay, vec![component(leg, fare)]))
            }
            Itinerary::Return { outbound, inbound } => {
                let mut components = Vec::with_capacity(2);
                for leg in [outbound, inbound] {
                    let fare = self.predict_return_leg(&ReturnLegRequest {
                        departure: leg.departure(),
                        origin: leg.origin.clone(),
                        destination: leg.destination.clone(),
                        cabin: leg.cabin,
                    })?;
                    components.push(component(leg, fare));
                }
                Ok(FareQuote::new(QuoteKind::Return, components))
            }
            Itinerary::MultiCity { legs } => {
                let (first, last) = match (legs.first(), legs.last()) {
                    (Some(first), Some(last)) => (first, last),
                    _ => return Err(FareError::MalformedInput("multi-city trip has no legs".to_string())),
                };

                let fare = self.predict_multihop(&MultiHopRequest {
                    origin: first.origin.clone(),
                    destination: last.destination.clone(),
                    search_date,
                    depart_date: first.departure_date,
                    depart_time: first.departure_time,
                    is_basic_economy: legs.iter().any(|l| l.is_basic_economy),
                    n_hops: legs.len() as u32,
                    cabins: legs.iter().map(|l| l.cabin).collect(),
                })?;

                Ok(FareQuote::new(
                    QuoteKind::MultiCity,
                    vec![QuoteComponent {
                        origin: first.origin.to_string(),
                        destination: last.destination.to_string(),
                        fare,
                    }],
                ))
            }
        }
    }
}

fn component(leg: &TripLeg, fare: f64) -> QuoteComponent {
    QuoteComponent {
        origin: leg.origin.to_string(),
        destination: leg.destination.to_string(),
        fare,
    }
}

/// Bracketed code when present, otherwise the input as given. A bracketed
/// group that is not a valid code is an error.
fn airport_field(input: &str) -> FareResult<String> {
    if input.contains('(') {
        Ok(AirportCode::from_display(input)?.to_string())
    } else {
        Ok(input.trim().to_string())
    }
}

/// Run a prediction, reporting any failure as an inference failure of the
/// named model
fn infer(model: &dyn FareModel, row: &FeatureRow) -> FareResult<f64> {
    match model.predict(row) {
        Ok(fare) => Ok(fare),
        Err(err @ FareError::ModelInferenceFailure { .. }) => {
            tracing::error!("Inference failed: {}", err);
            Err(err)
        }
        Err(other) => {
            tracing::error!("Inference failed in {}: {}", model.name(), other);
            Err(FareError::inference(model.name(), other))
        }
    }
}
