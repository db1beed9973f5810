use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehicle::{ServiceLevel, VehicleClass};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    #[serde(default)]
    pub point: Option<GeoPoint>,
}

/// A single pickup→delivery pricing request. Package fields are optional;
/// absent values price as zero. Units are fixed: pounds, inches, Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub pickup: Location,
    pub delivery: Location,
    #[serde(default)]
    pub package_weight_lbs: Option<f64>,
    #[serde(default)]
    pub package_length_in: Option<f64>,
    #[serde(default)]
    pub package_width_in: Option<f64>,
    #[serde(default)]
    pub package_height_in: Option<f64>,
    pub service_level: ServiceLevel,
    /// Explicit vehicle choice; skips auto-selection entirely when set.
    #[serde(default)]
    pub vehicle_class: Option<VehicleClass>,
    #[serde(default)]
    pub is_medical: bool,
    #[serde(default)]
    pub is_hipaa: bool,
    #[serde(default)]
    pub requires_temperature_control: bool,
    #[serde(default)]
    pub temperature_min_c: Option<f64>,
    #[serde(default)]
    pub temperature_max_c: Option<f64>,
}

/// Itemized priced quote. Monetary fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub vehicle_class: VehicleClass,
    pub service_level: ServiceLevel,
    pub sla_window: String,
    pub distance_miles: f64,
    pub estimated_duration_minutes: u32,
    pub base_price: f64,
    pub distance_price: f64,
    pub weight_surcharge: f64,
    pub hipaa_surcharge: f64,
    pub temperature_surcharge: f64,
    pub rush_surcharge: f64,
    pub service_multiplier: f64,
    pub total_price: f64,
    pub driver_payout: f64,
}

/// Pre-rendered strings for the booking portal and dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDisplay {
    pub total_price: String,
    pub distance: String,
    pub estimated_duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub request: QuoteRequest,
    pub result: QuoteResult,
    pub display: QuoteDisplay,
    pub created_at: DateTime<Utc>,
}
