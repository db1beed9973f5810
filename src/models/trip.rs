use serde::{Deserialize, Serialize};

use crate::models::vehicle::{ServiceLevel, VehicleClass};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripStop {
    #[serde(default)]
    pub address: Option<String>,
    /// Minutes the driver waits at this stop. First 10 minutes are free.
    #[serde(default)]
    pub wait_minutes: f64,
}

/// Multi-stop owner-operator trip: one pickup, N delivery stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub stops: Vec<TripStop>,
    pub total_route_miles: f64,
    #[serde(default)]
    pub package_weight_lbs: Option<f64>,
    #[serde(default)]
    pub package_length_in: Option<f64>,
    #[serde(default)]
    pub package_width_in: Option<f64>,
    #[serde(default)]
    pub package_height_in: Option<f64>,
    pub service_level: ServiceLevel,
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
    #[serde(default)]
    pub after_hours: bool,
    /// Overrides the tiered payout fraction when set. Always wins.
    #[serde(default)]
    pub driver_payout_fraction: Option<f64>,
    /// Overrides the config-level per-trip overhead allocation when set.
    #[serde(default)]
    pub overhead_per_trip: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorComparison {
    pub competitor: String,
    pub competitor_client_price: f64,
    pub competitor_driver_payout: f64,
    pub client_savings: f64,
    pub client_savings_pct: f64,
    pub driver_payout_advantage: f64,
    pub driver_payout_advantage_pct: f64,
}

/// Full profitability picture for a multi-stop trip: what the client pays,
/// what the driver takes home, and what the platform clears after fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripProfitability {
    pub vehicle_class: VehicleClass,
    pub service_level: ServiceLevel,
    pub number_of_stops: u32,
    pub total_route_miles: f64,
    pub base_fee: f64,
    pub additional_stops_fee: f64,
    pub mileage_fee: f64,
    pub wait_time_fee: f64,
    pub weight_surcharge: f64,
    pub hipaa_surcharge: f64,
    pub temperature_surcharge: f64,
    pub after_hours_surcharge: f64,
    pub service_multiplier: f64,
    pub client_price: f64,
    pub driver_payout_fraction: f64,
    pub driver_payout: f64,
    pub stripe_fee: f64,
    pub overhead_per_trip: f64,
    pub net_profit: f64,
    pub margin_percentage: f64,
    pub competitor_comparison: Vec<CompetitorComparison>,
}
