//! Integration tests for the Axum web server.
//!
//! These drive the full stack (router -> handlers -> service -> SQLite
//! repository) against an in-memory database, one fresh database per test.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use guesthouse_axum::bootstrap::{AxumContext, CorsConfig};
use guesthouse_axum::routes::create_router;
use guesthouse_db::{CoreFactory, setup_test_database};

async fn test_app() -> Router {
    let pool = setup_test_database().await.unwrap();
    let ctx = AxumContext {
        sliders: CoreFactory::build_slider_service(pool),
    };
    create_router(ctx, &CorsConfig::AllowAll)
}

async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a slider via the API and return its id.
async fn create_slider(app: &Router, title: &str) -> Uuid {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/sliders",
            json!({ "title": title, "image_url": format!("https://cdn.example/home/{title}.webp") }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["id"].as_str().unwrap().parse().unwrap()
}

/// Fetch `[(id, position)]` in listing order.
async fn ranking(app: &Router) -> Vec<(Uuid, i64)> {
    let response = send(app, get_request("/api/sliders")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["id"].as_str().unwrap().parse().unwrap(),
                s["position"].as_i64().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let app = test_app().await;

    let response = send(&app, get_request("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn create_appends_to_the_ranking() {
    let app = test_app().await;

    let first = create_slider(&app, "first").await;
    let second = create_slider(&app, "second").await;

    assert_eq!(
        ranking(&app).await,
        vec![(first, 1), (second, 2)],
        "creates append at positions 1, 2"
    );
}

#[tokio::test]
async fn create_without_image_url_is_rejected() {
    let app = test_app().await;

    let response = send(
        &app,
        json_request("POST", "/api/sliders", json!({ "title": "no image" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(ranking(&app).await.is_empty());
}

#[tokio::test]
async fn reorder_applies_permutation_and_returns_204() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;
    let b = create_slider(&app, "b").await;
    let c = create_slider(&app, "c").await;

    let response = send(
        &app,
        json_request("PUT", "/api/sliders/reorder", json!({ "ids": [c, a, b] })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(ranking(&app).await, vec![(c, 1), (a, 2), (b, 3)]);
}

#[tokio::test]
async fn reorder_missing_an_id_is_400_and_changes_nothing() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;
    let b = create_slider(&app, "b").await;
    let c = create_slider(&app, "c").await;

    let response = send(
        &app,
        json_request("PUT", "/api/sliders/reorder", json!({ "ids": [c, a] })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(ranking(&app).await, vec![(a, 1), (b, 2), (c, 3)]);
}

#[tokio::test]
async fn reorder_with_unknown_id_is_400() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;
    let b = create_slider(&app, "b").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/sliders/reorder",
            json!({ "ids": [a, Uuid::new_v4()] }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(ranking(&app).await, vec![(a, 1), (b, 2)]);
}

#[tokio::test]
async fn reorder_rejects_malformed_bodies() {
    let app = test_app().await;
    create_slider(&app, "a").await;

    for body in [
        json!({}),
        json!({ "ids": [] }),
        json!({ "ids": "not-a-list" }),
        json!({ "ids": [42] }),
        json!({ "ids": ["not-a-uuid"] }),
    ] {
        let response = send(&app, json_request("PUT", "/api/sliders/reorder", body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn move_swaps_with_neighbor_and_returns_position() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;
    let b = create_slider(&app, "b").await;
    let c = create_slider(&app, "c").await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/sliders/{b}/move"),
            json!({ "direction": "up" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"].as_str().unwrap(), b.to_string());
    assert_eq!(body["position"], 1);

    assert_eq!(ranking(&app).await, vec![(b, 1), (a, 2), (c, 3)]);
}

#[tokio::test]
async fn move_at_the_top_is_a_successful_noop() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;
    create_slider(&app, "b").await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/sliders/{a}/move"),
            json!({ "direction": "up" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["position"], 1);
}

#[tokio::test]
async fn move_with_invalid_direction_is_400() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;

    for body in [json!({}), json!({ "direction": "sideways" })] {
        let response = send(
            &app,
            json_request("PATCH", &format!("/api/sliders/{a}/move"), body),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn move_unknown_slider_is_404() {
    let app = test_app().await;
    create_slider(&app, "a").await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/sliders/{}/move", Uuid::new_v4()),
            json!({ "direction": "down" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_position_displaces_the_occupant() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;
    let b = create_slider(&app, "b").await;
    let c = create_slider(&app, "c").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/sliders/{a}/update-position"),
            json!({ "position": 3 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["position"], 3);

    assert_eq!(ranking(&app).await, vec![(c, 1), (b, 2), (a, 3)]);
}

#[tokio::test]
async fn update_position_clamps_targets_above_the_count() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;
    create_slider(&app, "b").await;
    create_slider(&app, "c").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/sliders/{a}/update-position"),
            json!({ "position": 99 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["position"], 3);
}

#[tokio::test]
async fn update_position_rejects_missing_and_non_positive_values() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;

    for body in [json!({}), json!({ "position": 0 }), json!({ "position": -2 })] {
        let response = send(
            &app,
            json_request("PUT", &format!("/api/sliders/{a}/update-position"), body),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn delete_renumbers_the_remaining_sliders() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;
    let b = create_slider(&app, "b").await;
    let c = create_slider(&app, "c").await;
    let d = create_slider(&app, "d").await;

    let response = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/sliders/{b}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(ranking(&app).await, vec![(a, 1), (c, 2), (d, 3)]);
}

#[tokio::test]
async fn delete_unknown_slider_is_404() {
    let app = test_app().await;
    create_slider(&app, "a").await;

    let response = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/sliders/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn publish_toggle_drives_status() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/sliders/{a}/publish"),
            json!({ "is_published": true }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["is_published"], true);
    assert_eq!(body["status"], "published");

    let response = send(
        &app,
        json_request("PUT", &format!("/api/sliders/{a}/publish"), json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_changes_only_the_supplied_fields() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/sliders/{a}"),
            json!({ "title": "renamed", "status": "review" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "renamed");
    assert_eq!(body["status"], "review");
    assert_eq!(body["position"], 1);
    assert!(
        body["image_url"].as_str().unwrap().contains("a.webp"),
        "image survives a partial update"
    );
}

#[tokio::test]
async fn listing_filters_by_published() {
    let app = test_app().await;
    let a = create_slider(&app, "a").await;
    create_slider(&app, "b").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/sliders/{a}/publish"),
            json!({ "is_published": true }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get_request("/api/sliders?published=true")).await;
    let body = body_json(response).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"].as_str().unwrap(), a.to_string());
}

#[tokio::test]
async fn nonexistent_route_returns_not_found() {
    let app = test_app().await;

    let response = send(&app, get_request("/api/nonexistent")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
