use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::broker::PricingSource;
use crate::models::vehicle::{ServiceLevel, VehicleClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    QuoteRequested,
    Quoted,
    Booked,
    Assigned,
    EnRoutePickup,
    ArrivedPickup,
    PickedUp,
    EnRouteDelivery,
    ArrivedDelivery,
    Delivered,
    Failed,
    Cancelled,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 12] = [
        DeliveryStatus::QuoteRequested,
        DeliveryStatus::Quoted,
        DeliveryStatus::Booked,
        DeliveryStatus::Assigned,
        DeliveryStatus::EnRoutePickup,
        DeliveryStatus::ArrivedPickup,
        DeliveryStatus::PickedUp,
        DeliveryStatus::EnRouteDelivery,
        DeliveryStatus::ArrivedDelivery,
        DeliveryStatus::Delivered,
        DeliveryStatus::Failed,
        DeliveryStatus::Cancelled,
    ];
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeliveryStatus::QuoteRequested => "quote_requested",
            DeliveryStatus::Quoted => "quoted",
            DeliveryStatus::Booked => "booked",
            DeliveryStatus::Assigned => "assigned",
            DeliveryStatus::EnRoutePickup => "en_route_pickup",
            DeliveryStatus::ArrivedPickup => "arrived_pickup",
            DeliveryStatus::PickedUp => "picked_up",
            DeliveryStatus::EnRouteDelivery => "en_route_delivery",
            DeliveryStatus::ArrivedDelivery => "arrived_delivery",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Failed => "failed",
            DeliveryStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub id: Uuid,
    pub tracking_number: String,
    pub status: DeliveryStatus,
    pub vehicle_class: VehicleClass,
    pub service_level: ServiceLevel,
    pub total_price: f64,
    pub driver_payout: f64,
    pub pricing_source: PricingSource,
    pub assigned_driver: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
