use crate::models::vehicle::{ServiceLevel, VehicleClass};

/// Single-quote rates and capacity thresholds for one vehicle class.
#[derive(Debug, Clone, Copy)]
pub struct VehicleRates {
    pub max_weight_lbs: f64,
    pub max_volume_cubic_in: f64,
    pub base_rate: f64,
    pub per_mile_rate: f64,
}

/// Multi-stop trip rates. A separate table from the single-quote rates;
/// the two are never interchangeable.
#[derive(Debug, Clone, Copy)]
pub struct TripVehicleRates {
    pub base_fee: f64,
    pub per_additional_stop: f64,
    pub per_mile_rate: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceTerms {
    pub multiplier: f64,
    pub sla_window: &'static str,
}

/// Tiered driver-payout fractions for the owner-operator trip model.
#[derive(Debug, Clone, Copy)]
pub struct TripPayoutTiers {
    pub medical: f64,
    pub scheduled_daily: f64,
    pub long_route: f64,
    pub long_route_min_miles: f64,
    pub short_local: f64,
    pub short_local_max_miles: f64,
    pub standard: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CompetitorModel {
    pub name: &'static str,
    pub client_markup: f64,
    pub driver_payout_pct: f64,
}

/// All pricing configuration, built once at startup and shared immutably.
/// Arrays are indexed in `VehicleClass::ALL` / declaration order.
#[derive(Debug, Clone)]
pub struct PricingTables {
    quote_rates: [VehicleRates; 5],
    trip_rates: [TripVehicleRates; 5],
    services: [ServiceTerms; 4],
    pub weight_threshold_lbs: f64,
    pub weight_step_lbs: f64,
    pub weight_step_charge: f64,
    pub hipaa_surcharge: f64,
    pub temperature_surcharge: f64,
    pub rush_surcharge_rate: f64,
    pub quote_driver_payout_fraction: f64,
    pub minutes_per_mile: f64,
    pub wait_free_minutes: f64,
    pub wait_per_minute: f64,
    pub after_hours_rate: f64,
    pub stripe_percent: f64,
    pub stripe_fixed_fee: f64,
    pub trip_payout_tiers: TripPayoutTiers,
    competitors: [CompetitorModel; 2],
}

impl PricingTables {
    pub fn standard() -> Self {
        Self {
            quote_rates: [
                // car
                VehicleRates {
                    max_weight_lbs: 25.0,
                    max_volume_cubic_in: 3_000.0,
                    base_rate: 8.00,
                    per_mile_rate: 2.50,
                },
                // suv
                VehicleRates {
                    max_weight_lbs: 75.0,
                    max_volume_cubic_in: 10_000.0,
                    base_rate: 10.00,
                    per_mile_rate: 1.75,
                },
                // van
                VehicleRates {
                    max_weight_lbs: 250.0,
                    max_volume_cubic_in: 25_000.0,
                    base_rate: 15.00,
                    per_mile_rate: 2.25,
                },
                // truck
                VehicleRates {
                    max_weight_lbs: 500.0,
                    max_volume_cubic_in: 50_000.0,
                    base_rate: 25.00,
                    per_mile_rate: 2.75,
                },
                // box_truck takes everything the smaller classes cannot
                VehicleRates {
                    max_weight_lbs: f64::INFINITY,
                    max_volume_cubic_in: f64::INFINITY,
                    base_rate: 45.00,
                    per_mile_rate: 3.25,
                },
            ],
            trip_rates: [
                TripVehicleRates {
                    base_fee: 15.00,
                    per_additional_stop: 6.00,
                    per_mile_rate: 1.25,
                },
                TripVehicleRates {
                    base_fee: 20.00,
                    per_additional_stop: 7.00,
                    per_mile_rate: 1.50,
                },
                TripVehicleRates {
                    base_fee: 28.00,
                    per_additional_stop: 8.00,
                    per_mile_rate: 1.75,
                },
                TripVehicleRates {
                    base_fee: 38.00,
                    per_additional_stop: 10.00,
                    per_mile_rate: 2.00,
                },
                TripVehicleRates {
                    base_fee: 55.00,
                    per_additional_stop: 12.00,
                    per_mile_rate: 2.50,
                },
            ],
            services: [
                ServiceTerms {
                    multiplier: 1.0,
                    sla_window: "same day, delivered within 4-8 hours",
                },
                ServiceTerms {
                    multiplier: 1.3,
                    sla_window: "delivered within 2-4 hours",
                },
                ServiceTerms {
                    multiplier: 1.8,
                    sla_window: "direct drive, delivered within 60-90 minutes",
                },
                ServiceTerms {
                    multiplier: 1.0,
                    sla_window: "delivered in a pre-agreed window",
                },
            ],
            weight_threshold_lbs: 50.0,
            weight_step_lbs: 25.0,
            weight_step_charge: 5.00,
            hipaa_surcharge: 15.00,
            temperature_surcharge: 25.00,
            rush_surcharge_rate: 0.30,
            quote_driver_payout_fraction: 0.60,
            minutes_per_mile: 2.5,
            wait_free_minutes: 10.0,
            wait_per_minute: 1.50,
            after_hours_rate: 0.20,
            stripe_percent: 0.029,
            stripe_fixed_fee: 0.30,
            trip_payout_tiers: TripPayoutTiers {
                medical: 0.55,
                scheduled_daily: 0.50,
                long_route: 0.65,
                long_route_min_miles: 50.0,
                short_local: 0.55,
                short_local_max_miles: 10.0,
                standard: 0.60,
            },
            competitors: [
                CompetitorModel {
                    name: "metro_courier_network",
                    client_markup: 0.20,
                    driver_payout_pct: 0.40,
                },
                CompetitorModel {
                    name: "gig_delivery_app",
                    client_markup: 0.10,
                    driver_payout_pct: 0.50,
                },
            ],
        }
    }

    pub fn vehicle(&self, class: VehicleClass) -> &VehicleRates {
        &self.quote_rates[class_index(class)]
    }

    pub fn trip_vehicle(&self, class: VehicleClass) -> &TripVehicleRates {
        &self.trip_rates[class_index(class)]
    }

    pub fn service(&self, level: ServiceLevel) -> &ServiceTerms {
        let idx = match level {
            ServiceLevel::Standard => 0,
            ServiceLevel::Priority => 1,
            ServiceLevel::Rush => 2,
            ServiceLevel::Scheduled => 3,
        };
        &self.services[idx]
    }

    pub fn competitors(&self) -> &[CompetitorModel] {
        &self.competitors
    }
}

fn class_index(class: VehicleClass) -> usize {
    match class {
        VehicleClass::Car => 0,
        VehicleClass::Suv => 1,
        VehicleClass::Van => 2,
        VehicleClass::Truck => 3,
        VehicleClass::BoxTruck => 4,
    }
}
