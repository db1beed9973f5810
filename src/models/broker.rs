use serde::{Deserialize, Serialize};

use crate::models::quote::QuoteRequest;

/// A delivery job already translated from a vendor payload into our shape.
/// Vendor-specific JSON never reaches this service; adapters upstream own
/// that translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedBrokerJob {
    pub broker_name: String,
    #[serde(default)]
    pub external_ref: Option<String>,
    #[serde(flatten)]
    pub request: QuoteRequest,
    pub distance_miles: f64,
    /// Broker-set client price. When both price and payout are present the
    /// engine is bypassed and these figures pass through unchanged.
    #[serde(default)]
    pub broker_price: Option<f64>,
    #[serde(default)]
    pub broker_payout: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingSource {
    Portal,
    BrokerProvided,
    EngineFallback,
}

impl PricingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingSource::Portal => "portal",
            PricingSource::BrokerProvided => "broker_provided",
            PricingSource::EngineFallback => "engine_fallback",
        }
    }
}
