use crate::api::api_error::APIError;
use crate::api::model::{SetTxtRequest, SetTxtResult};
use crate::api::server::AppState;
use crate::auth;
use crate::certs::{CertRequest, PEM_CONTENT_TYPE};
use crate::error::Error;
use axum::extract::{ConnectInfo, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Request, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use std::net::SocketAddr;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

const CERTS_PREFIX: &str = "/certs/";

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route(
            "/set_txt",
            post(set_txt).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_api_key,
            )),
        )
        .route("/certs/", get(certs))
        .route("/certs/*path", get(certs))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn require_api_key<B>(
    State(state): State<AppState>,
    request: Request<B>,
    next: Next<B>,
) -> Result<Response, APIError> {
    if !auth::bearer_matches(authorization(request.headers()), &state.config.api_key) {
        tracing::info!("rejected TXT update: bad credential");
        return Err(Error::Unauthorized.into());
    }
    Ok(next.run(request).await)
}

async fn set_txt(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<SetTxtRequest>, APIError>,
) -> Result<Json<SetTxtResult>, APIError> {
    payload.non_empty()?;
    let record = format!("{}.{}", payload.key, payload.domain);

    let result = state
        .txt_writer
        .set_txt(&payload.domain, &payload.key, &payload.value)
        .await;
    if let Err(err) = result {
        tracing::error!("TXT update for \"{record}\" failed: {err}");
        return Err(err.into());
    }

    tracing::info!("set TXT record \"{record}\"");
    Ok(Json(payload.into()))
}

async fn certs(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<impl IntoResponse, APIError> {
    let request = CertRequest {
        client_addr: connect_info.map(|ConnectInfo(addr)| addr),
        authorization: authorization(&headers),
        path: uri.path().strip_prefix(CERTS_PREFIX).unwrap_or_default(),
    };
    let data = state.cert_gate.handle(&request).await?;
    Ok(([(CONTENT_TYPE, PEM_CONTENT_TYPE)], data))
}
