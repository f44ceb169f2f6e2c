use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::api::rate_limit::{rate_limit, RateLimiter};
use crate::api::{analytics, catalog, entries, export, health, report, users};
use crate::config::{Config, RATE_LIMIT_WINDOW_SECS};
use crate::db::PriceStore;

#[derive(Clone)]
pub struct ApiState {
    pub store: PriceStore,
    pub config: Arc<Config>,
    pub limiter: Arc<RateLimiter>,
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(store: PriceStore, config: Config) -> Self {
        let limiter = RateLimiter::new(
            config.rate_limit_per_minute,
            Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
        );
        Self {
            store,
            config: Arc::new(config),
            limiter: Arc::new(limiter),
            started_at: Instant::now(),
        }
    }
}

pub fn router(state: ApiState) -> Router {
    let api = Router::new()
        .route("/health", get(health::get_health))
        .route("/api/entries", post(entries::post_entry))
        .route("/api/analytics", get(analytics::get_analytics))
        .route("/api/analytics/series", get(analytics::get_series))
        .route("/api/analytics/trends", get(analytics::get_trends))
        .route("/api/analytics/comparison", get(analytics::get_comparison))
        .route("/api/report", get(report::get_report))
        .route("/api/report/district/:district", get(report::get_district_report))
        .route("/api/catalog/districts", get(catalog::get_districts))
        .route("/api/catalog/products", get(catalog::get_products))
        .route("/api/locations/observed", get(catalog::get_observed_locations))
        .route("/api/products/observed", get(catalog::get_observed_products))
        .route("/api/export/stats.csv", get(export::get_stats_csv))
        .route("/api/users/:user_id/role", put(users::put_user_role))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    let cors = cors_layer(&state.config.cors_origins);
    let app = with_security_headers(api.with_state(state)).layer(TraceLayer::new_for_http());
    match cors {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

const SECURITY_HEADERS: [(HeaderName, &str); 5] = [
    (header::X_XSS_PROTECTION, "1; mode=block"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (
        HeaderName::from_static("permissions-policy"),
        "camera=(), microphone=(), geolocation=()",
    ),
];

fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS
        .into_iter()
        .fold(router, |r, (name, value)| {
            r.layer(SetResponseHeaderLayer::overriding(
                name,
                HeaderValue::from_static(value),
            ))
        })
}

/// `None` when no origins are configured.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::db::test_pool;
    use crate::types::NewPriceEntry;

    fn test_config() -> Config {
        Config {
            log_level: "info".into(),
            db_path: ":memory:".into(),
            api_port: 0,
            auth_header: "x-user-id".into(),
            rate_limit_per_minute: 100,
            cors_origins: Vec::new(),
        }
    }

    fn entry(product: &str, district: &str, upazilla: &str, price: f64) -> NewPriceEntry {
        NewPriceEntry {
            user_email: "rahim@example.com".into(),
            district: district.into(),
            upazilla: upazilla.into(),
            product_id: 1,
            product_name: product.into(),
            unit: "kg".into(),
            price,
            category: None,
            other_category: None,
            purchase_option: None,
            other_purchase_option: None,
            shop_type: None,
            other_shop_type: None,
            online_shop_name: None,
            notes: None,
        }
    }

    async fn seeded_state(config: Config) -> ApiState {
        let store = PriceStore::new(test_pool().await);
        let rows = [
            ("Rice", "Dhaka", "Savar", 80.0, 1),
            ("Rice", "Dhaka", "Keraniganj", 100.0, 2),
            ("Onion", "Khulna", "Dumuria", 60.0, 3),
            ("Rice", "Khulna", "Dumuria", 70.0, 4),
            ("Rice", "Sylhet", "Beanibazar", 60.0, 5),
        ];
        for (product, district, upazilla, price, day) in rows {
            let at = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
            store.insert_at(&entry(product, district, upazilla, price), at).await.unwrap();
        }
        store.set_user_role("admin-1", "admin").await.unwrap();
        store.set_user_role("manager-1", "manager").await.unwrap();
        ApiState::new(store, config)
    }

    async fn send(state: &ApiState, req: Request<Body>) -> Response {
        router(state.clone()).oneshot(req).await.unwrap()
    }

    fn get(uri: &str, user: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn analytics_requires_caller() {
        let state = seeded_state(test_config()).await;
        let resp = send(&state, get("/api/analytics?startDate=2024-03-01&endDate=2024-03-31", None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn analytics_rejects_bad_dates_and_type() {
        let state = seeded_state(test_config()).await;
        let resp = send(&state, get("/api/analytics?startDate=garbage&endDate=2024-03-31", Some("u1"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(&state, get("/api/analytics?startDate=2024-03-31&endDate=2024-03-01", Some("u1"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(
            &state,
            get("/api/analytics?startDate=2024-03-01&endDate=2024-03-31&type=pie", Some("u1")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analytics_stats_groups_by_product() {
        let state = seeded_state(test_config()).await;
        let resp = send(
            &state,
            get("/api/analytics?startDate=2024-03-01&endDate=2024-03-31&district=Dhaka&upazilla=&product=", Some("u1")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        let stats = body.as_array().unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0]["productName"], "Rice");
        assert_eq!(stats[0]["avgPrice"], 90.0);
        assert_eq!(stats[0]["totalEntries"], 2);
        assert_eq!(stats[0]["unit"], "kg");
    }

    #[tokio::test]
    async fn analytics_districts_cheapest_first() {
        let state = seeded_state(test_config()).await;
        let resp = send(
            &state,
            get("/api/analytics?startDate=2024-03-01&endDate=2024-03-31&product=rice&type=districts", Some("u1")),
        )
        .await;
        let body = json_body(resp).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["district"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Sylhet", "Khulna", "Dhaka"]);
        assert_eq!(body[2]["avgPrice"], 90.0);
        assert_eq!(body[2]["sampleSize"], 2);
    }

    #[tokio::test]
    async fn timeseries_location_is_district_only() {
        let state = seeded_state(test_config()).await;
        let resp = send(
            &state,
            get("/api/analytics?startDate=2024-03-01&endDate=2024-03-02&type=timeseries", Some("u1")),
        )
        .await;
        let body = json_body(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0], json!({"date": "2024-03-01", "price": 80.0, "product": "Rice", "location": "Dhaka"}));
    }

    #[tokio::test]
    async fn series_fills_gaps_with_null() {
        let state = seeded_state(test_config()).await;
        let resp = send(
            &state,
            get("/api/analytics/series?startDate=2024-03-01&endDate=2024-03-31&products=Rice,Onion", Some("u1")),
        )
        .await;
        let body = json_body(resp).await;
        assert_eq!(body[0]["date"], "2024-03-01");
        assert_eq!(body[0]["Rice"], 80.0);
        assert!(body[0]["Onion"].is_null());
        assert_eq!(body[2]["Onion"], 60.0);
    }

    #[tokio::test]
    async fn comparison_needs_two_products() {
        let state = seeded_state(test_config()).await;
        let resp = send(
            &state,
            get("/api/analytics/comparison?startDate=2024-03-01&endDate=2024-03-31&products=Rice", Some("u1")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(
            &state,
            get("/api/analytics/comparison?startDate=2024-03-01&endDate=2024-03-31&products=Rice,Onion", Some("u1")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["priceComparisons"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn anonymous_aggregate_report_masks_upazilla() {
        let state = seeded_state(test_config()).await;
        let resp = send(&state, get("/api/report?pageSize=2", None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["pagination"], json!({"page": 1, "pageSize": 2, "totalPages": 3, "totalRecords": 5}));
        let first = &body["data"][0];
        assert_eq!(first["district"], "Sylhet");
        assert_eq!(first["upazilla"], "***");
        assert_eq!(first["created_at"], "2024-03-05");
        assert!(first.get("user_email").is_none());
    }

    #[tokio::test]
    async fn report_count_follows_filters() {
        let state = seeded_state(test_config()).await;
        let resp = send(&state, get("/api/report?district=khulna&search=oni", Some("u1"))).await;
        let body = json_body(resp).await;
        assert_eq!(body["pagination"]["totalRecords"], 1);
        assert_eq!(body["data"][0]["product_name"], "Onion");
        assert_eq!(body["data"][0]["upazilla"], "Dumuria");
    }

    #[tokio::test]
    async fn detailed_report_permissions() {
        let state = seeded_state(test_config()).await;
        let resp = send(&state, get("/api/report?view=detailed", None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = send(&state, get("/api/report?view=detailed", Some("manager-1"))).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = send(&state, get("/api/report?view=detailed", Some("admin-1"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["data"][0]["user_email"], "r***@example.com");
        assert_eq!(body["data"][0]["upazilla"], "Beanibazar");

        let resp = send(&state, get("/api/report?view=everything", Some("admin-1"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = send(&state, get("/api/report?pageSize=101", Some("admin-1"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn report_page_past_the_end_is_empty() {
        let state = seeded_state(test_config()).await;
        let resp = send(&state, get("/api/report?page=9223372036854775807", Some("u1"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["pagination"]["totalRecords"], 5);
        assert_eq!(body["pagination"]["page"], i64::MAX);
    }

    #[tokio::test]
    async fn store_failure_is_a_generic_500() {
        let pool = test_pool().await;
        let state = ApiState::new(PriceStore::new(pool.clone()), test_config());
        pool.close().await;

        let resp = send(&state, get("/api/products/observed", None)).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(resp).await;
        assert_eq!(body, json!({"error": "Failed to load data"}));
    }

    #[tokio::test]
    async fn comparison_counts_products_by_grouping_key() {
        let state = seeded_state(test_config()).await;
        let resp = send(
            &state,
            get("/api/analytics/comparison?startDate=2024-03-01&endDate=2024-03-31&products=Rice,rice", Some("u1")),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn post_entry_validates_and_stores() {
        let state = seeded_state(test_config()).await;
        let body = json!({
            "userEmail": "karim@example.com",
            "district": "Dhaka",
            "upazilla": "Savar",
            "productId": 2,
            "price": 35.0
        });
        let req = |user: Option<&str>, body: &Value| {
            let mut b = Request::builder()
                .method("POST")
                .uri("/api/entries")
                .header("content-type", "application/json");
            if let Some(u) = user {
                b = b.header("x-user-id", u);
            }
            b.body(Body::from(body.to_string())).unwrap()
        };

        let resp = send(&state, req(None, &body)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = send(&state, req(Some("u1"), &body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let saved = json_body(resp).await;
        assert_eq!(saved["product_name"], "Flour");
        assert_eq!(saved["unit"], "kg");

        let mut bad = body.clone();
        bad["price"] = json!(-1.0);
        bad["upazilla"] = json!("Dumuria");
        let resp = send(&state, req(Some("u1"), &bad)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err = json_body(resp).await;
        let fields: Vec<&str> = err["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["upazilla", "price"]);

        let mut missing = body.clone();
        missing.as_object_mut().unwrap().remove("district");
        let resp = send(&state, req(Some("u1"), &missing)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err = json_body(resp).await;
        assert_eq!(err["fields"][0]["field"], "district");
        assert_eq!(err["fields"][0]["message"], "District is required");
    }

    #[tokio::test]
    async fn export_requires_export_permission() {
        let state = seeded_state(test_config()).await;
        let uri = "/api/export/stats.csv?startDate=2024-03-01&endDate=2024-03-31";
        assert_eq!(send(&state, get(uri, None)).await.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(send(&state, get(uri, Some("u1"))).await.status(), StatusCode::FORBIDDEN);

        let resp = send(&state, get(uri, Some("manager-1"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("\nOnion,60,60,60.00,60.00,1,kg,0,stable\n"));
        assert!(text.ends_with("Filters,2024-03-01 to 2024-03-31,All Locations\n"));
    }

    #[tokio::test]
    async fn role_assignment_is_admin_only() {
        let state = seeded_state(test_config()).await;
        let req = |user: &str, role: &str| {
            Request::builder()
                .method("PUT")
                .uri("/api/users/u1/role")
                .header("content-type", "application/json")
                .header("x-user-id", user)
                .body(Body::from(json!({ "role": role }).to_string()))
                .unwrap()
        };

        let resp = send(&state, req("manager-1", "admin")).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let resp = send(&state, req("admin-1", "owner")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(&state, req("admin-1", "Manager")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, json!({"userId": "u1", "role": "manager"}));

        let uri = "/api/export/stats.csv?startDate=2024-03-01&endDate=2024-03-31";
        assert_eq!(send(&state, get(uri, Some("u1"))).await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn catalog_and_observed_endpoints() {
        let state = seeded_state(test_config()).await;
        let body = json_body(send(&state, get("/api/catalog/districts?division=sylhet", None)).await).await;
        assert_eq!(body.as_array().unwrap().len(), 4);
        let resp = send(&state, get("/api/catalog/districts?division=Atlantis", None)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = json_body(send(&state, get("/api/catalog/products", None)).await).await;
        assert_eq!(body["products"].as_array().unwrap().len(), 12);

        let body = json_body(send(&state, get("/api/locations/observed?district=Khulna", None)).await).await;
        assert_eq!(body["districts"], json!(["Dhaka", "Khulna", "Sylhet"]));
        assert_eq!(body["upazillas"], json!(["Dumuria"]));

        let body = json_body(send(&state, get("/api/products/observed", None)).await).await;
        assert_eq!(body, json!(["Onion", "Rice"]));

        let body = json_body(send(&state, get("/api/report/district/dhaka", None)).await).await;
        assert_eq!(body[0]["productName"], "Rice");
        assert_eq!(body[0]["submissionCount"], 2);
    }

    #[tokio::test]
    async fn health_and_security_headers() {
        let state = seeded_state(test_config()).await;
        let resp = send(&state, get("/health", None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["x-frame-options"], "DENY");
        assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
        assert!(resp.headers().contains_key("permissions-policy"));
        assert_eq!(resp.headers()["x-ratelimit-limit"], "100");
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], true);
    }

    #[tokio::test]
    async fn rate_limit_returns_429() {
        let state = seeded_state(Config { rate_limit_per_minute: 2, ..test_config() }).await;
        let req = || {
            Request::builder()
                .uri("/health")
                .header("x-real-ip", "203.0.113.7")
                .body(Body::empty())
                .unwrap()
        };
        assert_eq!(send(&state, req()).await.status(), StatusCode::OK);
        let second = send(&state, req()).await;
        assert_eq!(second.headers()["x-ratelimit-remaining"], "0");
        let third = send(&state, req()).await;
        assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
