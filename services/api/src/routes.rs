use crate::infra::{
    deserialize_optional_mode, pools_from_csv_text, summarize, AppState, DataSource,
};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use leadboard::dashboard::{DashboardSummary, SeedPools, TrendMode};
use leadboard::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_optional_mode")]
    pub(crate) mode: Option<TrendMode>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardRequest {
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_optional_mode")]
    pub(crate) mode: Option<TrendMode>,
    #[serde(default)]
    pub(crate) funnel_csv: Option<String>,
    #[serde(default)]
    pub(crate) channels_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) seed: u64,
    pub(crate) data_source: DataSource,
    #[serde(flatten)]
    pub(crate) summary: DashboardSummary,
}

pub(crate) fn dashboard_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/dashboard/leads",
            get(leads_dashboard_endpoint).post(imported_dashboard_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn leads_dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<DashboardResponse> {
    let pools = SeedPools::standard();
    Json(build_response(
        &pools,
        DataSource::Standard,
        query.seed.or(state.default_seed),
        query.mode.unwrap_or_default(),
    ))
}

pub(crate) async fn imported_dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DashboardRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let DashboardRequest {
        seed,
        mode,
        funnel_csv,
        channels_csv,
    } = payload;

    let (pools, data_source) = pools_from_csv_text(funnel_csv, channels_csv)?;
    Ok(Json(build_response(
        &pools,
        data_source,
        seed.or(state.default_seed),
        mode.unwrap_or_default(),
    )))
}

fn build_response(
    pools: &SeedPools,
    data_source: DataSource,
    seed: Option<u64>,
    mode: TrendMode,
) -> DashboardResponse {
    let (seed, summary) = summarize(pools, seed, mode);
    info!(seed, %mode, ?data_source, "served leads dashboard snapshot");

    DashboardResponse {
        generated_at: Utc::now(),
        seed,
        data_source,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(ready: bool, default_seed: Option<u64>) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            default_seed,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn dashboard_endpoint_uses_configured_seed() {
        let Json(first) = leads_dashboard_endpoint(
            Extension(state(true, Some(8))),
            Query(DashboardQuery::default()),
        )
        .await;
        let Json(second) = leads_dashboard_endpoint(
            Extension(state(true, Some(8))),
            Query(DashboardQuery::default()),
        )
        .await;

        assert_eq!(first.seed, 8);
        assert_eq!(first.data_source, DataSource::Standard);
        assert_eq!(first.summary.trend.mode, TrendMode::Converted);
        assert_eq!(first.summary.trend_rollup, second.summary.trend_rollup);
        assert_eq!(first.summary.metrics, second.summary.metrics);
    }

    #[tokio::test]
    async fn request_seed_overrides_configured_seed() {
        let query = DashboardQuery {
            seed: Some(99),
            mode: Some(TrendMode::DealSize),
        };
        let Json(body) = leads_dashboard_endpoint(Extension(state(true, Some(8))), Query(query)).await;

        assert_eq!(body.seed, 99);
        assert_eq!(body.summary.trend.value_prefix, "$");
        assert!(body.summary.trend.secondary.is_none());
    }

    #[tokio::test]
    async fn imported_endpoint_rejects_malformed_csv() {
        let request = DashboardRequest {
            funnel_csv: Some("Stage ID,Stage,Leads\nlost,Lost,-1\n".to_string()),
            ..DashboardRequest::default()
        };
        let err = imported_dashboard_endpoint(Extension(state(true, None)), Json(request))
            .await
            .expect_err("negative leads rejected");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn imported_endpoint_uses_csv_channels() {
        let request = DashboardRequest {
            seed: Some(4),
            channels_csv: Some(
                "Channel,Value,Leads,Color,Token\nWebinars,900,30,#123abc,\nPodcasts,300,10,#fff,\n"
                    .to_string(),
            ),
            ..DashboardRequest::default()
        };
        let Json(body) = imported_dashboard_endpoint(Extension(state(true, None)), Json(request))
            .await
            .expect("snapshot builds");

        assert_eq!(body.data_source, DataSource::Imported);
        assert_eq!(body.summary.sources[0].display_name, "Webinars");
        assert_eq!(body.summary.sources[1].display_name, "Podcasts");
    }

    #[tokio::test]
    async fn router_serves_query_modes() {
        let app = dashboard_routes().layer(Extension(state(true, None)));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dashboard/leads?seed=5&mode=came")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["seed"], 5);
        assert_eq!(body["data_source"], "standard");
        assert_eq!(body["trend"]["mode"], "came");
        assert!(body["trend"].get("secondary").is_none());
        assert_eq!(body["active_leads"], 600);
    }

    #[tokio::test]
    async fn router_rejects_unknown_mode() {
        let app = dashboard_routes().layer(Extension(state(true, None)));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dashboard/leads?mode=sideways")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let app = dashboard_routes().layer(Extension(state(false, None)));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["status"], "initializing");
    }
}
