use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::pricing::{calculate_quote, price_broker_job, select_vehicle_class};
use crate::engine::profitability::calculate_trip_profitability;
use crate::error::AppError;
use crate::format::{
    format_currency, format_distance, format_duration, generate_tracking_number,
};
use crate::models::broker::NormalizedBrokerJob;
use crate::models::delivery::{Delivery, DeliveryStatus};
use crate::models::quote::{Quote, QuoteDisplay, QuoteRequest};
use crate::models::trip::{TripProfitability, TripRequest};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quotes", post(create_quote))
        .route("/quotes/:id", get(get_quote))
        .route("/trips/profitability", post(trip_profitability))
        .route("/broker/jobs", post(ingest_broker_job))
}

#[derive(Deserialize)]
pub struct CreateQuoteRequest {
    #[serde(flatten)]
    pub request: QuoteRequest,
    /// Routed distance from the mapping collaborator; never computed here.
    pub distance_miles: f64,
}

async fn create_quote(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateQuoteRequest>,
) -> Result<Json<Quote>, AppError> {
    if payload.distance_miles < 0.0 {
        return Err(AppError::BadRequest(
            "distance_miles cannot be negative".to_string(),
        ));
    }

    let result = calculate_quote(&state.tables, &payload.request, payload.distance_miles)?;

    state.metrics.quotes_total.with_label_values(&["portal"]).inc();
    state
        .metrics
        .quoted_price_dollars
        .with_label_values(&[result.service_level.as_str()])
        .observe(result.total_price);

    let display = QuoteDisplay {
        total_price: format_currency(result.total_price),
        distance: format_distance(result.distance_miles),
        estimated_duration: format_duration(result.estimated_duration_minutes),
    };
    let quote = Quote {
        id: Uuid::new_v4(),
        request: payload.request,
        result,
        display,
        created_at: Utc::now(),
    };
    state.quotes.insert(quote.id, quote.clone());

    tracing::info!(
        quote_id = %quote.id,
        vehicle = ?quote.result.vehicle_class,
        total_price = quote.result.total_price,
        "quote created"
    );

    Ok(Json(quote))
}

async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Quote>, AppError> {
    let quote = state
        .quotes
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("quote {} not found", id)))?;

    Ok(Json(quote.value().clone()))
}

async fn trip_profitability(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TripRequest>,
) -> Result<Json<TripProfitability>, AppError> {
    if payload.stops.is_empty() {
        return Err(AppError::BadRequest(
            "a trip needs at least one stop".to_string(),
        ));
    }
    if payload.total_route_miles < 0.0 {
        return Err(AppError::BadRequest(
            "total_route_miles cannot be negative".to_string(),
        ));
    }

    let trip = calculate_trip_profitability(&state.tables, &payload, state.overhead_per_trip)?;

    state.metrics.quotes_total.with_label_values(&["trip"]).inc();
    state
        .metrics
        .quoted_price_dollars
        .with_label_values(&[trip.service_level.as_str()])
        .observe(trip.client_price);

    Ok(Json(trip))
}

async fn ingest_broker_job(
    State(state): State<Arc<AppState>>,
    Json(job): Json<NormalizedBrokerJob>,
) -> Result<Json<Delivery>, AppError> {
    if job.distance_miles < 0.0 {
        return Err(AppError::BadRequest(
            "distance_miles cannot be negative".to_string(),
        ));
    }

    let pricing = price_broker_job(&state.tables, &job)?;
    let vehicle_class = job.request.vehicle_class.unwrap_or_else(|| {
        select_vehicle_class(
            &state.tables,
            job.request.package_weight_lbs,
            job.request.package_length_in,
            job.request.package_width_in,
            job.request.package_height_in,
        )
    });

    state
        .metrics
        .quotes_total
        .with_label_values(&[pricing.source.as_str()])
        .inc();

    let now = Utc::now();
    let delivery = Delivery {
        id: Uuid::new_v4(),
        tracking_number: generate_tracking_number(),
        status: DeliveryStatus::Booked,
        vehicle_class,
        service_level: job.request.service_level,
        total_price: pricing.total_price,
        driver_payout: pricing.driver_payout,
        pricing_source: pricing.source,
        assigned_driver: None,
        created_at: now,
        updated_at: now,
    };

    state.deliveries.insert(delivery.id, delivery.clone());
    state.metrics.active_deliveries.inc();

    tracing::info!(
        delivery_id = %delivery.id,
        broker = %job.broker_name,
        source = pricing.source.as_str(),
        total_price = delivery.total_price,
        "broker job ingested"
    );

    Ok(Json(delivery))
}
