use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::status::can_driver_update_status;
use crate::error::AppError;
use crate::format::generate_tracking_number;
use crate::models::broker::PricingSource;
use crate::models::delivery::{Delivery, DeliveryStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deliveries", post(book_delivery).get(list_deliveries))
        .route("/deliveries/:id", get(get_delivery))
        .route("/deliveries/:id/assign", patch(assign_driver))
        .route("/deliveries/:id/status", patch(update_status))
}

#[derive(Deserialize)]
pub struct BookDeliveryRequest {
    pub quote_id: Uuid,
}

async fn book_delivery(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BookDeliveryRequest>,
) -> Result<Json<Delivery>, AppError> {
    let quote = state
        .quotes
        .get(&payload.quote_id)
        .ok_or_else(|| AppError::NotFound(format!("quote {} not found", payload.quote_id)))?
        .value()
        .clone();

    let now = Utc::now();
    let delivery = Delivery {
        id: Uuid::new_v4(),
        tracking_number: generate_tracking_number(),
        status: DeliveryStatus::Booked,
        vehicle_class: quote.result.vehicle_class,
        service_level: quote.result.service_level,
        total_price: quote.result.total_price,
        driver_payout: quote.result.driver_payout,
        pricing_source: PricingSource::Portal,
        assigned_driver: None,
        created_at: now,
        updated_at: now,
    };

    state.deliveries.insert(delivery.id, delivery.clone());
    state.metrics.active_deliveries.inc();

    tracing::info!(
        delivery_id = %delivery.id,
        quote_id = %payload.quote_id,
        tracking = %delivery.tracking_number,
        "delivery booked"
    );

    Ok(Json(delivery))
}

async fn list_deliveries(State(state): State<Arc<AppState>>) -> Json<Vec<Delivery>> {
    let deliveries = state
        .deliveries
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    Json(deliveries)
}

async fn get_delivery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Delivery>, AppError> {
    let delivery = state
        .deliveries
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {} not found", id)))?;

    Ok(Json(delivery.value().clone()))
}

#[derive(Deserialize)]
pub struct AssignDriverRequest {
    pub driver_id: Uuid,
}

async fn assign_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignDriverRequest>,
) -> Result<Json<Delivery>, AppError> {
    let mut delivery = state
        .deliveries
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {} not found", id)))?;

    if delivery.status != DeliveryStatus::Booked {
        return Err(AppError::Conflict(format!(
            "delivery {} is {}, only booked deliveries can be assigned",
            id, delivery.status
        )));
    }

    delivery.status = DeliveryStatus::Assigned;
    delivery.assigned_driver = Some(payload.driver_id);
    delivery.updated_at = Utc::now();

    Ok(Json(delivery.clone()))
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: DeliveryStatus,
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Delivery>, AppError> {
    let mut delivery = state
        .deliveries
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {} not found", id)))?;

    if !can_driver_update_status(delivery.status, payload.status) {
        state
            .metrics
            .status_transitions_total
            .with_label_values(&["rejected"])
            .inc();
        return Err(AppError::InvalidStatusTransition {
            current: delivery.status.to_string(),
            proposed: payload.status.to_string(),
        });
    }

    delivery.status = payload.status;
    delivery.updated_at = Utc::now();

    state
        .metrics
        .status_transitions_total
        .with_label_values(&["accepted"])
        .inc();
    if matches!(
        payload.status,
        DeliveryStatus::Delivered | DeliveryStatus::Failed
    ) {
        state.metrics.active_deliveries.dec();
    }

    tracing::info!(
        delivery_id = %id,
        status = %payload.status,
        "driver status update"
    );

    Ok(Json(delivery.clone()))
}
