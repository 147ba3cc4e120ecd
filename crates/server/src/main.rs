use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use digest_core::{
    compute_digest, ApiContext, DigestAlgorithm, DigestPipeline, InputEncoding, OutputEncoding,
};
use serde::Deserialize;
use shared::{error::ApiError, protocol::DigestReport};
use tracing::info;

mod config;

use config::load_settings;

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

#[derive(Debug, Deserialize)]
struct DigestQuery {
    target: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let input: InputEncoding = settings.input_encoding.parse()?;
    let algorithm: DigestAlgorithm = settings.digest_algorithm.parse()?;
    let output: OutputEncoding = settings.output_encoding.parse()?;

    let api = ApiContext {
        pipeline: Arc::new(DigestPipeline::from_selectors(input, algorithm, output)),
    };
    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, ?input, ?algorithm, ?output, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/digest", get(http_digest))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_digest(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DigestQuery>,
) -> Result<Json<DigestReport>, (StatusCode, Json<ApiError>)> {
    let report =
        compute_digest(&state.api, &q.target).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use shared::error::ErrorCode;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let api = ApiContext {
            pipeline: Arc::new(DigestPipeline::default()),
        };
        build_router(Arc::new(AppState { api }))
    }

    fn hex_input_app() -> Router {
        let api = ApiContext {
            pipeline: Arc::new(DigestPipeline::from_selectors(
                InputEncoding::Hex,
                DigestAlgorithm::Sha256,
                OutputEncoding::Hex,
            )),
        };
        build_router(Arc::new(AppState { api }))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn healthz_responds_ok() {
        let response = test_app()
            .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn digest_reports_raw_and_digest_for_plain_target() {
        let response = test_app()
            .oneshot(
                Request::get("/digest?target=abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let report: DigestReport = body_json(response).await;
        assert_eq!(report.raw, "abc");
        assert_eq!(
            report.digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn digest_receives_percent_encoded_targets_decoded() {
        let response = test_app()
            .oneshot(
                Request::get("/digest?target=%3Cscript%3E%3C%2Fscript%3E")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let report: DigestReport = body_json(response).await;
        assert_eq!(report.raw, "<script></script>");
        assert_eq!(
            report.digest,
            "7ded34952def889b456ecda41ebaf8f579c14c4635e3e25f068220ea8d24c04f"
        );
    }

    #[tokio::test]
    async fn digest_without_target_is_rejected() {
        let response = test_app()
            .oneshot(Request::get("/digest").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn digest_maps_decode_failures_to_validation() {
        let response = hex_input_app()
            .oneshot(
                Request::get("/digest?target=zz")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = body_json(response).await;
        assert!(matches!(error.code, ErrorCode::Validation));
    }

    #[tokio::test]
    async fn empty_target_digests_the_empty_byte_string() {
        let response = test_app()
            .oneshot(
                Request::get("/digest?target=")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let report: DigestReport = body_json(response).await;
        assert_eq!(report.raw, "");
        assert_eq!(
            report.digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
