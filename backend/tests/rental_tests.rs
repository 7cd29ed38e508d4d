//! Rental booking tests
//!
//! Tests for the rental flow including:
//! - Booking a tool marks it unavailable until the rental ends
//! - Rentals naming an unknown tool are recorded anyway
//! - Concurrent bookings are all recorded
//! - Body validation reports every offending field at once

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use agrimarket_backend::config::{AdviceConfig, ServerConfig};
use agrimarket_backend::{create_app, AdviceClient, AppState, Config, MemStore};
use shared::{NewRental, NewTool, NewUser};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        advice: AdviceConfig {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 5,
        },
        demo_data: false,
    }
}

/// State with an empty store and an unconfigured advice client, so no test
/// ever goes on the network.
fn test_state() -> AppState {
    let config = test_config();
    AppState {
        store: MemStore::new(),
        advice: AdviceClient::new(String::new(), config.advice.model.clone(), Duration::from_secs(5)),
        config: Arc::new(config),
    }
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seed_renter(store: &MemStore) -> String {
    store
        .create_user(NewUser {
            username: "renter".to_string(),
            email: "renter@example.com".to_string(),
            password: "hashedpassword".to_string(),
            full_name: "Rita Renter".to_string(),
            phone_number: None,
            location: None,
            farm_name: None,
            profile_image: None,
        })
        .await
        .id
}

async fn seed_tool(store: &MemStore) -> String {
    store
        .create_tool(NewTool {
            name: "Walk-Behind Tractor".to_string(),
            description: None,
            daily_rate: dec("55.00"),
            category: "tillage".to_string(),
            image_url: None,
            owner_id: "owner-1".to_string(),
            location: None,
            is_available: true,
            next_available_date: None,
        })
        .await
        .id
}

fn rental_body(tool_id: &str, renter_id: &str, end_date: &str) -> Value {
    json!({
        "toolId": tool_id,
        "renterId": renter_id,
        "startDate": "2025-06-01T00:00:00Z",
        "endDate": end_date,
        "totalCost": "220.00",
        "status": "active",
    })
}

fn stored_rental(tool_id: &str, renter_id: &str, end_date: &str) -> NewRental {
    NewRental {
        tool_id: tool_id.to_string(),
        renter_id: renter_id.to_string(),
        start_date: "2025-06-01T00:00:00Z".parse().unwrap(),
        end_date: end_date.parse().unwrap(),
        total_cost: dec("220.00"),
        status: "active".to_string(),
    }
}

// ============================================================================
// Booking Flow Tests
// ============================================================================

#[cfg(test)]
mod booking_tests {
    use super::*;

    /// Test that a booking is recorded and the tool marked unavailable
    #[tokio::test]
    async fn test_post_rental_books_the_tool() {
        let state = test_state();
        let renter_id = seed_renter(&state.store).await;
        let tool_id = seed_tool(&state.store).await;
        let app = create_app(state.clone());

        let response = app
            .oneshot(post_json(
                "/api/rentals",
                &rental_body(&tool_id, &renter_id, "2025-06-05T00:00:00Z"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let rental = read_json(response).await;
        assert!(rental["id"].is_string());
        assert_eq!(rental["toolId"], tool_id);
        assert_eq!(rental["renterId"], renter_id);
        assert_eq!(rental["totalCost"], "220.00");
        assert_eq!(rental["status"], "active");

        let tool = state.store.get_tool(&tool_id).await.unwrap();
        let end: DateTime<Utc> = "2025-06-05T00:00:00Z".parse().unwrap();
        assert!(!tool.is_available);
        assert_eq!(tool.next_available_date, Some(end));
    }

    /// Test that a rental naming an unknown tool is still recorded
    #[tokio::test]
    async fn test_rental_for_unknown_tool_is_still_recorded() {
        let state = test_state();
        let renter_id = seed_renter(&state.store).await;
        let app = create_app(state.clone());

        let response = app
            .oneshot(post_json(
                "/api/rentals",
                &rental_body("never-listed", &renter_id, "2025-06-05T00:00:00Z"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let rentals = state.store.get_rentals().await;
        assert_eq!(rentals.len(), 1);
        assert_eq!(rentals[0].tool_id, "never-listed");
    }

    /// Test that two bookings landing together are both recorded
    #[tokio::test]
    async fn test_concurrent_rentals_are_all_recorded() {
        let state = test_state();
        let renter_id = seed_renter(&state.store).await;
        let tool_id = seed_tool(&state.store).await;
        let app = create_app(state.clone());

        let first = app.clone().oneshot(post_json(
            "/api/rentals",
            &rental_body(&tool_id, &renter_id, "2025-06-05T00:00:00Z"),
        ));
        let second = app.clone().oneshot(post_json(
            "/api/rentals",
            &rental_body(&tool_id, &renter_id, "2025-06-09T00:00:00Z"),
        ));
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap().status(), StatusCode::CREATED);
        assert_eq!(second.unwrap().status(), StatusCode::CREATED);

        let rentals = state.store.get_rentals().await;
        assert_eq!(rentals.len(), 2);
        assert_ne!(rentals[0].id, rentals[1].id);

        // Whichever booking wrote last wins the availability fields
        let tool = state.store.get_tool(&tool_id).await.unwrap();
        let ends: Vec<DateTime<Utc>> = vec![
            "2025-06-05T00:00:00Z".parse().unwrap(),
            "2025-06-09T00:00:00Z".parse().unwrap(),
        ];
        assert!(!tool.is_available);
        assert!(ends.contains(&tool.next_available_date.unwrap()));
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

#[cfg(test)]
mod validation_tests {
    use super::*;

    /// Test that an empty body reports every required field
    #[tokio::test]
    async fn test_post_rental_reports_all_missing_fields() {
        let state = test_state();
        let app = create_app(state.clone());

        let response = app.oneshot(post_json("/api/rentals", &json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        assert_eq!(body["message"], "Invalid rental data");

        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(
            fields,
            vec!["toolId", "renterId", "startDate", "endDate", "totalCost", "status"]
        );

        assert!(state.store.get_rentals().await.is_empty());
    }

    /// Test that malformed dates are rejected and nothing is written
    #[tokio::test]
    async fn test_post_rental_rejects_malformed_dates() {
        let state = test_state();
        let renter_id = seed_renter(&state.store).await;
        let tool_id = seed_tool(&state.store).await;
        let app = create_app(state.clone());

        let mut body = rental_body(&tool_id, &renter_id, "2025-06-05T00:00:00Z");
        body["startDate"] = json!("next tuesday");

        let response = app.oneshot(post_json("/api/rentals", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["field"], "startDate");

        // The rejected booking left no trace
        assert!(state.store.get_rentals().await.is_empty());
        assert!(state.store.get_tool(&tool_id).await.unwrap().is_available);
    }
}

// ============================================================================
// Listing Tests
// ============================================================================

#[cfg(test)]
mod listing_tests {
    use super::*;

    /// Test the per-renter rental history route
    #[tokio::test]
    async fn test_rentals_by_renter_route() {
        let state = test_state();
        let tool_id = seed_tool(&state.store).await;
        state
            .store
            .create_rental(stored_rental(&tool_id, "u-alice", "2025-06-05T00:00:00Z"))
            .await;
        state
            .store
            .create_rental(stored_rental(&tool_id, "u-alice", "2025-06-09T00:00:00Z"))
            .await;
        state
            .store
            .create_rental(stored_rental(&tool_id, "u-bob", "2025-06-12T00:00:00Z"))
            .await;
        let app = create_app(state.clone());

        let response = app.oneshot(get("/api/rentals/user/u-alice")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let rentals = read_json(response).await;
        let rentals = rentals.as_array().unwrap();
        assert_eq!(rentals.len(), 2);
        assert!(rentals.iter().all(|r| r["renterId"] == "u-alice"));
    }

    /// Test that rental history reads newest first
    #[tokio::test]
    async fn test_rentals_listed_newest_first() {
        let state = test_state();
        for end in [
            "2025-06-05T00:00:00Z",
            "2025-06-09T00:00:00Z",
            "2025-06-12T00:00:00Z",
        ] {
            state.store.create_rental(stored_rental("t-1", "u-1", end)).await;
        }

        let rentals = state.store.get_rentals().await;
        assert_eq!(rentals.len(), 3);
        for pair in rentals.windows(2) {
            assert!(
                pair[0].created_at > pair[1].created_at
                    || (pair[0].created_at == pair[1].created_at && pair[0].id > pair[1].id)
            );
        }
    }

    /// Test the by-tool rental history used for availability checks
    #[tokio::test]
    async fn test_rentals_by_tool_filter() {
        let state = test_state();
        state
            .store
            .create_rental(stored_rental("t-1", "u-1", "2025-06-05T00:00:00Z"))
            .await;
        state
            .store
            .create_rental(stored_rental("t-2", "u-1", "2025-06-09T00:00:00Z"))
            .await;

        let for_tool = state.store.get_rentals_by_tool("t-1").await;
        assert_eq!(for_tool.len(), 1);
        assert_eq!(for_tool[0].tool_id, "t-1");

        let rental = state.store.get_rental(&for_tool[0].id).await.unwrap();
        assert_eq!(rental.renter_id, "u-1");
    }
}
