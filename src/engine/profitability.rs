use crate::engine::pricing::{round2, select_vehicle_class, validate_temperature_band, weight_surcharge};
use crate::engine::tables::PricingTables;
use crate::error::AppError;
use crate::models::trip::{CompetitorComparison, TripProfitability, TripRequest};
use crate::models::vehicle::ServiceLevel;

/// Owner-operator trip pricing: one pickup, N delivery stops, priced from
/// the multi-stop rate table (not the single-quote table).
pub fn calculate_trip_profitability(
    tables: &PricingTables,
    request: &TripRequest,
    default_overhead_per_trip: f64,
) -> Result<TripProfitability, AppError> {
    validate_temperature_band(
        request.requires_temperature_control,
        request.temperature_min_c,
        request.temperature_max_c,
    )?;

    let miles = request.total_route_miles.max(0.0);
    let weight = request.package_weight_lbs.unwrap_or(0.0).max(0.0);
    let number_of_stops = request.stops.len().max(1) as u32;

    let vehicle_class = request.vehicle_class.unwrap_or_else(|| {
        select_vehicle_class(
            tables,
            request.package_weight_lbs,
            request.package_length_in,
            request.package_width_in,
            request.package_height_in,
        )
    });
    let rates = tables.trip_vehicle(vehicle_class);

    let base_fee = rates.base_fee;
    let additional_stops_fee = round2((number_of_stops - 1) as f64 * rates.per_additional_stop);
    let mileage_fee = round2(miles * rates.per_mile_rate);

    let billable_wait: f64 = request
        .stops
        .iter()
        .map(|stop| (stop.wait_minutes.max(0.0) - tables.wait_free_minutes).max(0.0))
        .sum();
    let wait_time_fee = round2(billable_wait * tables.wait_per_minute);

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

    let running_subtotal = base_fee
        + additional_stops_fee
        + mileage_fee
        + wait_time_fee
        + weight_surcharge
        + hipaa_surcharge
        + temperature_surcharge;

    let after_hours_surcharge = if request.after_hours {
        round2(running_subtotal * tables.after_hours_rate)
    } else {
        0.0
    };

    let terms = tables.service(request.service_level);
    let client_price = round2((running_subtotal + after_hours_surcharge) * terms.multiplier);

    let driver_payout_fraction = payout_fraction(tables, request, miles);
    let driver_payout = round2(client_price * driver_payout_fraction);

    let stripe_fee = round2(client_price * tables.stripe_percent + tables.stripe_fixed_fee);
    let overhead_per_trip = request
        .overhead_per_trip
        .unwrap_or(default_overhead_per_trip)
        .max(0.0);

    let net_profit = round2(client_price - driver_payout - stripe_fee - overhead_per_trip);
    let margin_percentage = if client_price > 0.0 {
        round2(net_profit / client_price * 100.0)
    } else {
        0.0
    };

    let competitor_comparison = tables
        .competitors()
        .iter()
        .map(|model| {
            let competitor_client_price = round2(client_price * (1.0 + model.client_markup));
            let competitor_driver_payout =
                round2(competitor_client_price * model.driver_payout_pct);
            CompetitorComparison {
                competitor: model.name.to_string(),
                competitor_client_price,
                competitor_driver_payout,
                client_savings: round2(competitor_client_price - client_price),
                client_savings_pct: pct_of(
                    competitor_client_price - client_price,
                    competitor_client_price,
                ),
                driver_payout_advantage: round2(driver_payout - competitor_driver_payout),
                driver_payout_advantage_pct: pct_of(
                    driver_payout - competitor_driver_payout,
                    competitor_driver_payout,
                ),
            }
        })
        .collect();

    Ok(TripProfitability {
        vehicle_class,
        service_level: request.service_level,
        number_of_stops,
        total_route_miles: round2(miles),
        base_fee,
        additional_stops_fee,
        mileage_fee,
        wait_time_fee,
        weight_surcharge,
        hipaa_surcharge,
        temperature_surcharge,
        after_hours_surcharge,
        service_multiplier: terms.multiplier,
        client_price,
        driver_payout_fraction,
        driver_payout,
        stripe_fee,
        overhead_per_trip,
        net_profit,
        margin_percentage,
        competitor_comparison,
    })
}

fn pct_of(delta: f64, base: f64) -> f64 {
    if base > 0.0 {
        round2(delta / base * 100.0)
    } else {
        0.0
    }
}

/// Explicit override always wins; otherwise the compliance tier outranks the
/// distance tiers so medical runs never pick up the long-route rate.
fn payout_fraction(tables: &PricingTables, request: &TripRequest, miles: f64) -> f64 {
    if let Some(fraction) = request.driver_payout_fraction {
        return fraction.clamp(0.0, 1.0);
    }

    let tiers = &tables.trip_payout_tiers;
    if request.is_medical || request.is_hipaa {
        tiers.medical
    } else if request.service_level == ServiceLevel::Scheduled {
        tiers.scheduled_daily
    } else if miles >= tiers.long_route_min_miles {
        tiers.long_route
    } else if miles < tiers.short_local_max_miles {
        tiers.short_local
    } else {
        tiers.standard
    }
}
