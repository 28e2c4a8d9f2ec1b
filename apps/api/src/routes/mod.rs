pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes",
            post(handlers::handle_create_resume).get(handlers::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get_resume)
                .put(handlers::handle_replace_resume)
                .delete(handlers::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/markdown",
            get(handlers::handle_render_markdown),
        )
        .route("/api/v1/resumes/:id/move", post(handlers::handle_move_data_point))
        // Sections
        .route("/api/v1/resumes/:id/sections", post(handlers::handle_add_section))
        .route(
            "/api/v1/resumes/:id/move_section",
            post(handlers::handle_move_section),
        )
        .route(
            "/api/v1/resumes/:id/sections/:section",
            patch(handlers::handle_rename_section).delete(handlers::handle_remove_section),
        )
        // Data points
        .route(
            "/api/v1/resumes/:id/sections/:section/data_points",
            post(handlers::handle_add_data_point),
        )
        .route(
            "/api/v1/resumes/:id/sections/:section/data_points/:data_point",
            put(handlers::handle_replace_data_point).delete(handlers::handle_remove_data_point),
        )
        // Bullet points
        .route(
            "/api/v1/resumes/:id/sections/:section/data_points/:data_point/bullet_points",
            post(handlers::handle_add_bullet_point),
        )
        .route(
            "/api/v1/resumes/:id/sections/:section/data_points/:data_point/bullet_points/:bullet",
            put(handlers::handle_edit_bullet_point).delete(handlers::handle_remove_bullet_point),
        )
        // Extra infos (contact lines)
        .route(
            "/api/v1/resumes/:id/extra_infos",
            post(handlers::handle_add_extra_info),
        )
        .route(
            "/api/v1/resumes/:id/extra_infos/:index",
            delete(handlers::handle_remove_extra_info),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::Config;
    use crate::document::SortDirection;
    use crate::store::MemoryResumeStore;

    fn make_router_with(config: Config) -> Router {
        build_router(AppState {
            store: Arc::new(MemoryResumeStore::new()),
            config,
        })
    }

    fn make_router() -> Router {
        make_router_with(Config::default())
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    fn sample_resume() -> Value {
        json!({
            "full_name": "Ada Lovelace",
            "headline": "Programmer",
            "email": "ada@example.com",
            "extra_infos": ["London"],
            "sort_value": 0,
            "sections": [
                {
                    "name": "Experience",
                    "sort_value": 2,
                    "data_points": [
                        { "heading": "Acme Corp", "job_title": "Engineer", "sort_value": 1,
                          "bullet_points": ["Shipped v1"] },
                        { "heading": "Globex", "sort_value": 0 }
                    ]
                },
                { "name": "Education", "sort_value": 0 },
                { "name": "Projects", "sort_value": 1 }
            ]
        })
    }

    async fn create(router: &Router, user: Uuid, resume: Value) -> String {
        let (status, body) = send(
            router,
            Method::POST,
            "/api/v1/resumes",
            Some(json!({ "user_id": user, "resume": resume })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["resume"]["id"].as_str().unwrap().to_string()
    }

    fn section_names(body: &Value) -> Vec<String> {
        body["resume"]["document"]["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let router = make_router();
        let (status, body) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_keeps_model_order_unless_sorted() {
        let router = make_router();
        let user = Uuid::new_v4();
        let id = create(&router, user, sample_resume()).await;

        let uri = format!("/api/v1/resumes/{id}?user_id={user}");
        let (status, body) = send(&router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(section_names(&body), vec!["Experience", "Education", "Projects"]);

        let (_, sorted) = send(&router, Method::GET, &format!("{uri}&sort=asc"), None).await;
        assert_eq!(section_names(&sorted), vec!["Education", "Projects", "Experience"]);
        assert_eq!(
            sorted["resume"]["document"]["sections"][2]["data_points"][0]["heading"],
            "Globex"
        );

        let (_, desc) = send(&router, Method::GET, &format!("{uri}&sort=desc"), None).await;
        assert_eq!(section_names(&desc), vec!["Experience", "Projects", "Education"]);
    }

    #[tokio::test]
    async fn test_invalid_sort_is_rejected() {
        let router = make_router();
        let user = Uuid::new_v4();
        let id = create(&router, user, sample_resume()).await;

        let uri = format!("/api/v1/resumes/{id}?user_id={user}&sort=sideways");
        let (status, body) = send(&router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_sorted_by_resume_sort_value() {
        let router = make_router();
        let user = Uuid::new_v4();
        create(&router, user, json!({ "full_name": "second", "sort_value": 5 })).await;
        create(&router, user, json!({ "full_name": "first", "sort_value": 1 })).await;
        create(&router, Uuid::new_v4(), json!({ "full_name": "other user" })).await;

        let (status, body) =
            send(&router, Method::GET, &format!("/api/v1/resumes?user_id={user}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sort"], "asc");
        let names: Vec<_> = body["resumes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["document"]["full_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_list_uses_configured_default_direction() {
        let router = make_router_with(Config {
            default_sort: SortDirection::Descending,
            ..Default::default()
        });
        let user = Uuid::new_v4();
        create(&router, user, json!({ "full_name": "low", "sort_value": 1 })).await;
        create(&router, user, json!({ "full_name": "high", "sort_value": 5 })).await;

        let names = |body: &Value| -> Vec<String> {
            body["resumes"]
                .as_array()
                .unwrap()
                .iter()
                .map(|r| r["document"]["full_name"].as_str().unwrap().to_string())
                .collect()
        };

        let (status, body) =
            send(&router, Method::GET, &format!("/api/v1/resumes?user_id={user}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sort"], "desc");
        assert_eq!(names(&body), vec!["high", "low"]);

        let (_, body) = send(
            &router,
            Method::GET,
            &format!("/api/v1/resumes?user_id={user}&sort=asc"),
            None,
        )
        .await;
        assert_eq!(body["sort"], "asc", "explicit sort overrides the default");
        assert_eq!(names(&body), vec!["low", "high"]);
    }

    #[tokio::test]
    async fn test_put_without_resume_is_rejected_and_keeps_document() {
        let router = make_router();
        let user = Uuid::new_v4();
        let id = create(&router, user, sample_resume()).await;

        let (status, _) = send(
            &router,
            Method::PUT,
            &format!("/api/v1/resumes/{id}"),
            Some(json!({ "user_id": user })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            &router,
            Method::PUT,
            &format!("/api/v1/resumes/{id}/sections/0/data_points/0"),
            Some(json!({ "user_id": user })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(
            &router,
            Method::GET,
            &format!("/api/v1/resumes/{id}?user_id={user}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume"]["document"]["full_name"], "Ada Lovelace");
        assert_eq!(section_names(&body), vec!["Experience", "Education", "Projects"]);
        assert_eq!(
            body["resume"]["document"]["sections"][0]["data_points"][0]["heading"],
            "Acme Corp"
        );
    }

    #[tokio::test]
    async fn test_move_section() {
        let router = make_router();
        let user = Uuid::new_v4();
        let id = create(&router, user, sample_resume()).await;

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/resumes/{id}/move_section"),
            Some(json!({ "user_id": user, "from_index": 2, "to_index": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(section_names(&body), vec!["Projects", "Experience", "Education"]);
        assert_eq!(body["resume"]["document"]["sections"][0]["sort_value"], 1);

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/resumes/{id}/move_section"),
            Some(json!({ "user_id": user, "from_index": 7, "to_index": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "DOCUMENT_ERROR");
    }

    #[tokio::test]
    async fn test_other_user_gets_not_found() {
        let router = make_router();
        let id = create(&router, Uuid::new_v4(), sample_resume()).await;

        let uri = format!("/api/v1/resumes/{id}?user_id={}", Uuid::new_v4());
        let (status, body) = send(&router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_replace_then_delete() {
        let router = make_router();
        let user = Uuid::new_v4();
        let id = create(&router, user, sample_resume()).await;

        let (status, body) = send(
            &router,
            Method::PUT,
            &format!("/api/v1/resumes/{id}"),
            Some(json!({ "user_id": user, "resume": { "full_name": "Ada King" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume"]["document"]["full_name"], "Ada King");
        assert_eq!(body["resume"]["document"]["sections"], json!([]));

        let uri = format!("/api/v1/resumes/{id}?user_id={user}");
        let (status, _) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_section_and_data_point_edits() {
        let router = make_router();
        let user = Uuid::new_v4();
        let id = create(&router, user, sample_resume()).await;

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/resumes/{id}/sections"),
            Some(json!({ "user_id": user, "name": "Skills" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["index"], 3);

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/resumes/{id}/sections/3/data_points"),
            Some(json!({ "user_id": user, "data_point": { "heading": "Rust, Go", "is_single_point": true } })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["index"], 0);

        let (status, body) = send(
            &router,
            Method::PATCH,
            &format!("/api/v1/resumes/{id}/sections/1"),
            Some(json!({ "user_id": user, "name": "Schooling" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            section_names(&body),
            vec!["Experience", "Schooling", "Projects", "Skills"]
        );

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/resumes/{id}/move"),
            Some(json!({ "user_id": user, "from_section": 0, "from_index": 1,
                         "to_section": 1, "to_index": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let sections = &body["resume"]["document"]["sections"];
        assert_eq!(sections[0]["data_points"].as_array().unwrap().len(), 1);
        assert_eq!(sections[1]["data_points"][0]["heading"], "Globex");

        let (status, body) = send(
            &router,
            Method::DELETE,
            &format!("/api/v1/resumes/{id}/sections/2?user_id={user}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(section_names(&body), vec!["Experience", "Schooling", "Skills"]);
    }

    #[tokio::test]
    async fn test_bullet_point_edits_and_single_point_warning() {
        let router = make_router();
        let user = Uuid::new_v4();
        let id = create(&router, user, sample_resume()).await;
        let base = format!("/api/v1/resumes/{id}/sections/0/data_points/0/bullet_points");

        let (status, body) = send(
            &router,
            Method::POST,
            &base,
            Some(json!({ "user_id": user, "text": "Cut p99 by 40%" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["index"], 1);

        let (status, body) = send(
            &router,
            Method::PUT,
            &format!("{base}/0"),
            Some(json!({ "user_id": user, "text": "Shipped v2" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["resume"]["document"]["sections"][0]["data_points"][0]["bullet_points"],
            json!(["Shipped v2", "Cut p99 by 40%"])
        );
        assert_eq!(body["warnings"], json!([]));

        let (status, body) = send(
            &router,
            Method::PUT,
            &format!("/api/v1/resumes/{id}/sections/0/data_points/0"),
            Some(json!({ "user_id": user, "data_point": {
                "heading": "Acme Corp", "is_single_point": true, "bullet_points": ["stray"]
            } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "discouraged combination is still stored");
        assert_eq!(body["warnings"][0]["heading"], "Acme Corp");

        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("{base}/0?user_id={user}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_out_of_range_edit_is_bad_request() {
        let router = make_router();
        let user = Uuid::new_v4();
        let id = create(&router, user, sample_resume()).await;

        let (status, body) = send(
            &router,
            Method::DELETE,
            &format!("/api/v1/resumes/{id}/sections/9/data_points/0?user_id={user}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "DOCUMENT_ERROR");

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/resumes/{id}/sections"),
            Some(json!({ "user_id": user, "name": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extra_infos_and_markdown() {
        let router = make_router();
        let user = Uuid::new_v4();
        let id = create(&router, user, sample_resume()).await;

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/api/v1/resumes/{id}/extra_infos"),
            Some(json!({ "user_id": user, "text": "github.com/ada" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["index"], 1);

        let (status, body) = send(
            &router,
            Method::DELETE,
            &format!("/api/v1/resumes/{id}/extra_infos/0?user_id={user}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume"]["document"]["extra_infos"], json!(["github.com/ada"]));

        let (status, body) = send(
            &router,
            Method::GET,
            &format!("/api/v1/resumes/{id}/markdown?user_id={user}&sort=asc"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let md = body.as_str().unwrap();
        assert!(md.starts_with("# Ada Lovelace\n"));
        assert!(md.contains("ada@example.com • github.com/ada"));
        assert!(md.find("## Education").unwrap() < md.find("## Experience").unwrap());
    }
}
