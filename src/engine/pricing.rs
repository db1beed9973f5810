use crate::engine::tables::PricingTables;
use crate::error::AppError;
use crate::models::broker::{NormalizedBrokerJob, PricingSource};
use crate::models::quote::{QuoteRequest, QuoteResult};
use crate::models::vehicle::{ServiceLevel, VehicleClass};

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Negative and missing numeric inputs price as zero; the calculators stay
/// total over the whole numeric range.
fn clamped(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0).max(0.0)
}

/// Smallest class whose weight and volume thresholds both cover the package.
/// Missing dimensions count as zero, so an empty request selects a car.
pub fn select_vehicle_class(
    tables: &PricingTables,
    weight_lbs: Option<f64>,
    length_in: Option<f64>,
    width_in: Option<f64>,
    height_in: Option<f64>,
) -> VehicleClass {
    let weight = clamped(weight_lbs);
    let volume = clamped(length_in) * clamped(width_in) * clamped(height_in);

    for class in VehicleClass::ALL {
        let rates = tables.vehicle(class);
        if weight <= rates.max_weight_lbs && volume <= rates.max_volume_cubic_in {
            return class;
        }
    }

    VehicleClass::BoxTruck
}

/// Stair-step weight surcharge: strictly above the threshold, every started
/// step increment is charged in full.
pub(crate) fn weight_surcharge(tables: &PricingTables, weight_lbs: f64) -> f64 {
    if weight_lbs > tables.weight_threshold_lbs {
        ((weight_lbs - tables.weight_threshold_lbs) / tables.weight_step_lbs).ceil()
            * tables.weight_step_charge
    } else {
        0.0
    }
}

/// A temperature band with min above max would silently corrupt a
/// compliance-relevant value if clamped, so it is the one input we reject.
pub(crate) fn validate_temperature_band(
    requires_temperature_control: bool,
    min_c: Option<f64>,
    max_c: Option<f64>,
) -> Result<(), AppError> {
    if requires_temperature_control {
        if let (Some(min), Some(max)) = (min_c, max_c) {
            if min > max {
                return Err(AppError::InvalidTemperatureRange { min, max });
            }
        }
    }
    Ok(())
}

pub fn calculate_quote(
    tables: &PricingTables,
    request: &QuoteRequest,
    distance_miles: f64,
) -> Result<QuoteResult, AppError> {
    validate_temperature_band(
        request.requires_temperature_control,
        request.temperature_min_c,
        request.temperature_max_c,
    )?;

    let distance = distance_miles.max(0.0);
    let weight = clamped(request.package_weight_lbs);

    let vehicle_class = request.vehicle_class.unwrap_or_else(|| {
        select_vehicle_class(
            tables,
            request.package_weight_lbs,
            request.package_length_in,
            request.package_width_in,
            request.package_height_in,
        )
    });
    let rates = tables.vehicle(vehicle_class);

    let base_price = rates.base_rate;
    let distance_price = round2(distance * rates.per_mile_rate);
    let weight_surcharge = weight_surcharge(tables, weight);
    let hipaa_surcharge = if request.is_hipaa {
        tables.hipaa_surcharge
    } else {
        0.0
    };
    let temperature_surcharge = if request.requires_temperature_control {
        tables.temperature_surcharge
    } else {
        0.0
    };

    // The rush surcharge is proportional to base + distance only, while the
    // rush multiplier below applies to the full subtotal including the
    // compliance surcharges. Pinned behavior; the bases differ on purpose.
    let rush_surcharge = if request.service_level == ServiceLevel::Rush {
        round2(tables.rush_surcharge_rate * (base_price + distance_price))
    } else {
        0.0
    };

    let subtotal = base_price
        + distance_price
        + weight_surcharge
        + hipaa_surcharge
        + temperature_surcharge
        + rush_surcharge;

    let terms = tables.service(request.service_level);
    let total_price = round2(subtotal * terms.multiplier);
    let driver_payout = round2(total_price * tables.quote_driver_payout_fraction);

    Ok(QuoteResult {
        vehicle_class,
        service_level: request.service_level,
        sla_window: terms.sla_window.to_string(),
        distance_miles: round2(distance),
        estimated_duration_minutes: (distance * tables.minutes_per_mile).ceil() as u32,
        base_price,
        distance_price,
        weight_surcharge,
        hipaa_surcharge,
        temperature_surcharge,
        rush_surcharge,
        service_multiplier: terms.multiplier,
        total_price,
        driver_payout,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrokerPricing {
    pub total_price: f64,
    pub driver_payout: f64,
    pub source: PricingSource,
    pub quote: Option<QuoteResult>,
}

/// Brokers that send both a client price and a driver payout keep them
/// untouched; the engine only prices jobs the broker left unpriced.
pub fn price_broker_job(
    tables: &PricingTables,
    job: &NormalizedBrokerJob,
) -> Result<BrokerPricing, AppError> {
    if let (Some(price), Some(payout)) = (job.broker_price, job.broker_payout) {
        return Ok(BrokerPricing {
            total_price: price,
            driver_payout: payout,
            source: PricingSource::BrokerProvided,
            quote: None,
        });
    }

    let quote = calculate_quote(tables, &job.request, job.distance_miles)?;
    Ok(BrokerPricing {
        total_price: quote.total_price,
        driver_payout: quote.driver_payout,
        source: PricingSource::EngineFallback,
        quote: Some(quote),
    })
}
