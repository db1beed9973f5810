use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use epyc_dispatch::api::rest::router;
use epyc_dispatch::engine::tables::PricingTables;
use epyc_dispatch::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

fn setup() -> axum::Router {
    let state = AppState::new(PricingTables::standard(), 2.75);
    router(Arc::new(state))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn patch_request(uri: &str, body: Value) -> Request<Body> {
    json_request("PATCH", uri, body)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn la_quote_payload() -> Value {
    json!({
        "pickup": { "address": "800 W Olympic Blvd, Los Angeles, CA" },
        "delivery": { "address": "4100 Admiralty Way, Marina del Rey, CA" },
        "package_weight_lbs": 60.0,
        "service_level": "standard",
        "distance_miles": 15.0
    })
}

#[tokio::test]
async fn health_returns_ok() {
    let app = setup();
    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["quotes"], 0);
    assert_eq!(body["deliveries"], 0);
}

#[tokio::test]
async fn metrics_returns_prometheus_format() {
    let app = setup();
    let response = app.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("text/plain"));

    let body = body_string(response).await;
    assert!(body.contains("active_deliveries"));
}

#[tokio::test]
async fn create_quote_prices_la_standard_scenario() {
    let app = setup();
    let response = app
        .oneshot(json_request("POST", "/quotes", la_quote_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let result = &body["result"];
    assert_eq!(result["vehicle_class"], "suv");
    assert_eq!(result["base_price"], 10.0);
    assert_eq!(result["distance_price"], 26.25);
    assert_eq!(result["weight_surcharge"], 5.0);
    assert_eq!(result["total_price"], 41.25);
    assert_eq!(result["driver_payout"], 24.75);
    assert_eq!(result["estimated_duration_minutes"], 38);
    assert_eq!(body["display"]["total_price"], "$41.25");
    assert_eq!(body["display"]["distance"], "15.0 mi");
    assert_eq!(body["display"]["estimated_duration"], "38 min");
}

#[tokio::test]
async fn rush_quote_compounds_surcharge_and_multiplier() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/quotes",
            json!({
                "pickup": { "address": "A" },
                "delivery": { "address": "B" },
                "service_level": "rush",
                "vehicle_class": "car",
                "distance_miles": 4.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["result"]["rush_surcharge"], 5.4);
    assert_eq!(body["result"]["total_price"], 42.12);
}

#[tokio::test]
async fn quote_roundtrips_by_id() {
    let app = setup();
    let response = app
        .clone()
        .oneshot(json_request("POST", "/quotes", la_quote_payload()))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(get_request(&format!("/quotes/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    assert_eq!(fetched["result"]["total_price"], 41.25);
}

#[tokio::test]
async fn get_nonexistent_quote_returns_404() {
    let app = setup();
    let fake_id = "00000000-0000-0000-0000-000000000000";
    let response = app
        .oneshot(get_request(&format!("/quotes/{fake_id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inverted_temperature_band_returns_400() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/quotes",
            json!({
                "pickup": { "address": "A" },
                "delivery": { "address": "B" },
                "service_level": "standard",
                "requires_temperature_control": true,
                "temperature_min_c": 8.0,
                "temperature_max_c": 2.0,
                "distance_miles": 5.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_service_level_is_rejected_at_the_boundary() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/quotes",
            json!({
                "pickup": { "address": "A" },
                "delivery": { "address": "B" },
                "service_level": "white_glove",
                "distance_miles": 5.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn negative_distance_returns_400() {
    let app = setup();
    let mut payload = la_quote_payload();
    payload["distance_miles"] = json!(-3.0);

    let response = app
        .oneshot(json_request("POST", "/quotes", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

fn broker_payload(price: Option<f64>, payout: Option<f64>) -> Value {
    let mut payload = json!({
        "broker_name": "medspeed",
        "external_ref": "MS-44187",
        "pickup": { "address": "Cedars-Sinai, Los Angeles" },
        "delivery": { "address": "Providence Saint John's, Santa Monica" },
        "package_weight_lbs": 60.0,
        "service_level": "standard",
        "is_hipaa": true,
        "distance_miles": 15.0
    });
    if let Some(price) = price {
        payload["broker_price"] = json!(price);
    }
    if let Some(payout) = payout {
        payload["broker_payout"] = json!(payout);
    }
    payload
}

#[tokio::test]
async fn broker_job_with_pricing_passes_through() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/broker/jobs",
            broker_payload(Some(100.0), Some(70.0)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_price"], 100.0);
    assert_eq!(body["driver_payout"], 70.0);
    assert_eq!(body["pricing_source"], "broker_provided");
    assert_eq!(body["status"], "booked");
    assert!(body["tracking_number"].as_str().unwrap().starts_with("EPYC"));
}

#[tokio::test]
async fn unpriced_broker_job_falls_back_to_engine() {
    let app = setup();
    let response = app
        .oneshot(json_request("POST", "/broker/jobs", broker_payload(None, None)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    // engine pricing: suv base 10 + 26.25 distance + 5 weight + 15 hipaa
    assert_eq!(body["total_price"], 56.25);
    assert_eq!(body["driver_payout"], 33.75);
    assert_eq!(body["pricing_source"], "engine_fallback");
}

#[tokio::test]
async fn booked_delivery_walks_the_driver_lifecycle() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/quotes", la_quote_payload()))
        .await
        .unwrap();
    let quote = body_json(response).await;
    let quote_id = quote["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/deliveries",
            json!({ "quote_id": quote_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let delivery = body_json(response).await;
    let id = delivery["id"].as_str().unwrap().to_string();
    assert_eq!(delivery["status"], "booked");
    assert_eq!(delivery["total_price"], 41.25);
    assert!(delivery["tracking_number"].as_str().unwrap().starts_with("EPYC"));

    let response = app
        .clone()
        .oneshot(patch_request(
            &format!("/deliveries/{id}/assign"),
            json!({ "driver_id": "7c0d1f0a-3f14-4c9e-91d4-2b7f8a2e5c01" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let assigned = body_json(response).await;
    assert_eq!(assigned["status"], "assigned");

    for status in [
        "en_route_pickup",
        "arrived_pickup",
        "picked_up",
        "en_route_delivery",
        "arrived_delivery",
        "delivered",
    ] {
        let response = app
            .clone()
            .oneshot(patch_request(
                &format!("/deliveries/{id}/status"),
                json!({ "status": status }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "transition to {status}");
        let body = body_json(response).await;
        assert_eq!(body["status"], status);
    }

    // delivered is terminal for the driver
    let response = app
        .oneshot(patch_request(
            &format!("/deliveries/{id}/status"),
            json!({ "status": "en_route_pickup" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn driver_cannot_move_an_unassigned_delivery() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/quotes", la_quote_payload()))
        .await
        .unwrap();
    let quote = body_json(response).await;
    let quote_id = quote["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/deliveries",
            json!({ "quote_id": quote_id }),
        ))
        .await
        .unwrap();
    let delivery = body_json(response).await;
    let id = delivery["id"].as_str().unwrap();

    let response = app
        .oneshot(patch_request(
            &format!("/deliveries/{id}/status"),
            json!({ "status": "en_route_pickup" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn booking_an_unknown_quote_returns_404() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/deliveries",
            json!({ "quote_id": "00000000-0000-0000-0000-000000000000" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trip_profitability_reports_full_breakdown() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/trips/profitability",
            json!({
                "stops": [
                    { "address": "Stop 1", "wait_minutes": 5.0 },
                    { "address": "Stop 2", "wait_minutes": 12.0 },
                    { "address": "Stop 3", "wait_minutes": 30.0 }
                ],
                "total_route_miles": 18.0,
                "package_weight_lbs": 60.0,
                "service_level": "standard"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["vehicle_class"], "suv");
    assert_eq!(body["client_price"], 99.0);
    assert_eq!(body["driver_payout"], 59.4);
    assert_eq!(body["stripe_fee"], 3.17);
    assert_eq!(body["overhead_per_trip"], 2.75);
    assert_eq!(body["net_profit"], 33.68);
    assert_eq!(body["margin_percentage"], 34.02);
    assert_eq!(
        body["competitor_comparison"][0]["competitor"],
        "metro_courier_network"
    );
}

#[tokio::test]
async fn trip_without_stops_returns_400() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/trips/profitability",
            json!({
                "stops": [],
                "total_route_miles": 10.0,
                "service_level": "standard"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
