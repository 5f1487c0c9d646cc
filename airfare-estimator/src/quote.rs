use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteKind {
    OneWay,
    Return,
    MultiCity,
}

/// One priced piece of a quote: a single leg, or the whole multi-city trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteComponent {
    pub origin: String,
    pub destination: String,
    pub fare: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FareQuote {
    pub kind: QuoteKind,
    pub components: Vec<QuoteComponent>,
    pub total: f64,
}

impl FareQuote {
    pub fn new(kind: QuoteKind, components: Vec<QuoteComponent>) -> Self {
        let total = components.iter().map(|c| c.fare).sum();
        Self { kind, components, total }
    }

    /// Dollar amount rounded for display; the raw fare stays unrounded
    pub fn display_amount(&self) -> String {
        format!("${:.2}", self.total)
    }
}
