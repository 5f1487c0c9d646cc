pub mod features;
pub mod schema;
pub mod estimator;
pub mod quote;

pub use features::{DirectFareRequest, MultiHopRequest, ReturnLegRequest};
pub use estimator::FareEstimator;
pub use quote::{FareQuote, QuoteComponent, QuoteKind};
