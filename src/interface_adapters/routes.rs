use crate::interface_adapters::handlers::{duel_snapshot, heartbeat, purchase, start_duel, tick};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/duels", post(start_duel))
        .route("/duels/tick", post(tick))
        .route("/duels/purchase", post(purchase))
        .route("/duels/{duel_id}", get(duel_snapshot))
        .route("/presence/heartbeat", post(heartbeat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tuning::DuelTuning;
    use crate::interface_adapters::state::InMemoryDuelStore;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn build_test_app() -> Router {
        let state = AppState {
            store: InMemoryDuelStore::default(),
            tuning: DuelTuning::default(),
        };
        app(state)
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("expected request to build")
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("expected response body");
        serde_json::from_slice(&body).expect("expected json body")
    }

    #[tokio::test]
    async fn when_tick_targets_an_unknown_duel_then_returns_404_and_error_message() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request("/duels/tick", r#"{"duel_id":"missing"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "duel not found");
    }

    #[tokio::test]
    async fn when_start_duel_payload_is_missing_fields_then_returns_422() {
        let app = build_test_app();

        let response = app.oneshot(json_request("/duels", r#"{}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn when_start_duel_pairs_a_player_with_themselves_then_returns_409() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "/duels",
                r#"{"player1_id":"p1","player2_id":"p1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn when_purchase_coordinates_are_out_of_bounds_then_returns_400() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "/duels/purchase",
                r#"{"duel_id":"d1","player_id":"p1","row":10,"col":0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "coordinates out of bounds"
        );
    }

    #[tokio::test]
    async fn when_purchase_requests_a_neutral_kind_then_returns_400() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "/duels/purchase",
                r#"{"duel_id":"d1","player_id":"p1","row":0,"col":0,"kind":"neutral"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn when_snapshot_targets_an_unknown_duel_then_returns_404() {
        let app = build_test_app();

        let request = Request::builder()
            .method("GET")
            .uri("/duels/does-not-exist")
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn when_duel_route_is_called_with_get_then_returns_405() {
        let app = build_test_app();

        let request = Request::builder()
            .method("GET")
            .uri("/duels/tick")
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn when_heartbeat_is_posted_then_returns_200_with_a_timestamp() {
        let app = build_test_app();

        let response = app
            .oneshot(json_request(
                "/presence/heartbeat",
                r#"{"player_id":"p1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["last_seen"].as_u64().is_some());
    }

    #[tokio::test]
    async fn when_a_full_duel_is_driven_over_http_then_each_stage_responds_in_kind() {
        let app = build_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "/duels",
                r#"{"player1_id":"p1","player2_id":"p2"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let duel_id = json_body(response).await["duel_id"]
            .as_str()
            .expect("expected duel id")
            .to_string();

        // Immediately after start there is no energy to spend.
        let response = app
            .clone()
            .oneshot(json_request(
                "/duels/purchase",
                &format!(
                    r#"{{"duel_id":"{duel_id}","player_id":"p1","row":0,"col":3}}"#
                ),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["message"], "insufficient energy");

        let response = app
            .clone()
            .oneshot(json_request(
                "/duels/tick",
                &format!(r#"{{"duel_id":"{duel_id}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let tick = json_body(response).await;
        assert_eq!(tick["player1_cells"], 1);
        assert_eq!(tick["player2_cells"], 1);
        assert_eq!(tick["winner_id"], Value::Null);

        let request = Request::builder()
            .method("GET")
            .uri(format!("/duels/{duel_id}"))
            .body(Body::empty())
            .expect("expected request to build");
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = json_body(response).await;
        assert_eq!(snapshot["duel"]["status"], "active");
        assert_eq!(snapshot["game_state"]["grid"]["cells"][0][4]["kind"], "basic");
    }
}
