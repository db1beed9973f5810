use serde::{Deserialize, Serialize};

/// Capacity tiers, ordered smallest to largest. Auto-selection walks this
/// order and picks the first class that covers the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Car,
    Suv,
    Van,
    Truck,
    BoxTruck,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Car,
        VehicleClass::Suv,
        VehicleClass::Van,
        VehicleClass::Truck,
        VehicleClass::BoxTruck,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLevel {
    Standard,
    Priority,
    Rush,
    Scheduled,
}

impl ServiceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceLevel::Standard => "standard",
            ServiceLevel::Priority => "priority",
            ServiceLevel::Rush => "rush",
            ServiceLevel::Scheduled => "scheduled",
        }
    }
}
