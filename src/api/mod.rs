//! Legacy HTTP API for remote Suna tooling.

// Allow clippy lint triggered by utoipa's OpenApi derive macro
#![allow(clippy::needless_for_each)]

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use omni_agents::{
    AgentError, AgentId, AgentRecord, AgentStats, DefaultAgentService, DefaultConfig,
    InstallSummary, SyncSummary, UpdateSummary,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::core::SunaDefaultAgentService;

/// Shared application state.
pub struct AppState {
    /// Legacy facade over the Omni service.
    pub suna: SunaDefaultAgentService<Box<dyn DefaultAgentService>>,

    /// API token for authentication (if configured).
    pub token: Option<String>,
}

impl AppState {
    /// Create state around an Omni service.
    #[must_use]
    pub fn new(omni: Box<dyn DefaultAgentService>, token: Option<String>) -> Self {
        Self {
            suna: SunaDefaultAgentService::new(omni),
            token,
        }
    }
}

type SharedState = Arc<AppState>;

/// `OpenAPI` documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Suna Compatibility API",
        description = "Legacy Suna agent endpoints backed by the Omni default-agent service",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        health,
        default_config,
        sync_agents,
        update_agents,
        install_all,
        install_agent,
        get_agent,
        agent_stats
    ),
    components(schemas(
        UpdateAgentsRequest,
        InstallAgentRequest,
        InstallAgentResponse,
        ErrorResponse
    ))
)]
pub struct ApiDoc;

/// Request body for updating all agents.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateAgentsRequest {
    /// Version to update to (latest if absent).
    #[serde(default)]
    pub target_version: Option<String>,
}

/// Request body for installing one account's agent.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InstallAgentRequest {
    /// Account to install the agent for.
    pub account_id: String,

    /// Replace an existing agent.
    #[serde(default)]
    pub replace_existing: bool,
}

/// Response body for installing one account's agent.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InstallAgentResponse {
    /// Installed agent, if one was installed.
    pub agent_id: Option<AgentId>,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Error kind.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Omni service error surfaced to the HTTP caller.
#[derive(Debug)]
pub struct ApiError(AgentError);

impl From<AgentError> for ApiError {
    fn from(error: AgentError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AgentError::Api { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AgentError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AgentError::Http(_) | AgentError::Parse(_) => StatusCode::BAD_GATEWAY,
        };

        tracing::warn!(error = %self.0, status = %status, "omni default-agent service call failed");

        (
            status,
            Json(ErrorResponse {
                error: self.0.kind().to_string(),
                message: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Authentication middleware.
///
/// Validates the `Authorization: Bearer <token>` header if a token is configured.
async fn auth_middleware(
    State(state): State<SharedState>,
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    // If no token configured, allow all requests (localhost-only mode)
    let Some(ref expected_token) = state.token else {
        return next.run(request).await;
    };

    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match auth_header {
        Some(token) if token == expected_token => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "unauthorized".to_string(),
                message: "Missing or invalid Authorization header. Use: Bearer <token>"
                    .to_string(),
            }),
        )
            .into_response(),
    }
}

/// Decode a JSON request body, answering malformed input with an [`ErrorResponse`].
fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "bad_request".to_string(),
                message: e.to_string(),
            }),
        )
            .into_response()
    })
}

/// Build the API router around `state`.
pub fn router(state: SharedState) -> Router {
    let protected_routes = Router::new()
        .route("/api/suna/default-config", get(default_config))
        .route("/api/suna/sync", post(sync_agents))
        .route("/api/suna/update", post(update_agents))
        .route("/api/suna/install-all", post(install_all))
        .route("/api/suna/install", post(install_agent))
        .route("/api/suna/agents/{account_id}", get(get_agent))
        .route("/api/suna/stats", get(agent_stats))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP API server.
///
/// # Errors
///
/// Returns an error if the Omni client cannot be created or the server fails to bind or start.
pub async fn serve(config: &Config, host: &str, port: u16) -> anyhow::Result<()> {
    let omni = config.omni.create_service()?;
    tracing::info!(base_url = %omni.base_url(), "forwarding to omni admin api");

    let state: SharedState = Arc::new(AppState::new(Box::new(omni), config.api.token()));
    let auth_enabled = state.token.is_some();
    let app = router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    if auth_enabled {
        tracing::info!(addr = %addr, "starting HTTP API server (auth enabled)");
    } else {
        tracing::warn!(
            addr = %addr,
            "starting HTTP API server (NO AUTH - localhost only recommended)"
        );
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service healthy", body = String))
)]
async fn health() -> &'static str {
    "ok"
}

/// Get the default Suna agent configuration.
#[utoipa::path(
    get,
    path = "/api/suna/default-config",
    responses(
        (status = 200, description = "Default configuration as returned by Omni"),
        (status = 502, description = "Omni unreachable", body = ErrorResponse)
    )
)]
async fn default_config(State(state): State<SharedState>) -> Result<Json<DefaultConfig>, ApiError> {
    Ok(Json(state.suna.get_suna_default_config().await?))
}

/// Sync all Suna agents.
#[utoipa::path(
    post,
    path = "/api/suna/sync",
    responses(
        (status = 200, description = "Sync summary as returned by Omni"),
        (status = 502, description = "Omni unreachable", body = ErrorResponse)
    )
)]
async fn sync_agents(State(state): State<SharedState>) -> Result<Json<SyncSummary>, ApiError> {
    Ok(Json(state.suna.sync_all_suna_agents().await?))
}

/// Update all Suna agents.
///
/// The body is optional; an empty body updates to the latest version.
#[utoipa::path(
    post,
    path = "/api/suna/update",
    request_body = UpdateAgentsRequest,
    responses(
        (status = 200, description = "Update summary as returned by Omni"),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 502, description = "Omni unreachable", body = ErrorResponse)
    )
)]
async fn update_agents(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<UpdateSummary>, Response> {
    // Legacy callers post no body when they want the latest version
    let request = if body.is_empty() {
        UpdateAgentsRequest::default()
    } else {
        parse_body::<UpdateAgentsRequest>(&body)?
    };

    state
        .suna
        .update_all_suna_agents(request.target_version.as_deref())
        .await
        .map(Json)
        .map_err(|e| ApiError(e).into_response())
}

/// Install the Suna agent for every user.
#[utoipa::path(
    post,
    path = "/api/suna/install-all",
    responses(
        (status = 200, description = "Installation summary as returned by Omni"),
        (status = 502, description = "Omni unreachable", body = ErrorResponse)
    )
)]
async fn install_all(State(state): State<SharedState>) -> Result<Json<InstallSummary>, ApiError> {
    Ok(Json(state.suna.install_for_all_users().await?))
}

/// Install the Suna agent for one account.
#[utoipa::path(
    post,
    path = "/api/suna/install",
    request_body = InstallAgentRequest,
    responses(
        (status = 200, description = "Installed agent id, or null", body = InstallAgentResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 502, description = "Omni unreachable", body = ErrorResponse)
    )
)]
async fn install_agent(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<InstallAgentResponse>, Response> {
    let req = parse_body::<InstallAgentRequest>(&body)?;

    let agent_id = state
        .suna
        .install_suna_agent_for_user_with(&req.account_id, req.replace_existing)
        .await
        .map_err(|e| ApiError(e).into_response())?;
    Ok(Json(InstallAgentResponse { agent_id }))
}

/// Get the Suna agent of one account.
#[utoipa::path(
    get,
    path = "/api/suna/agents/{account_id}",
    params(("account_id" = String, Path, description = "Account to look up")),
    responses(
        (status = 200, description = "Agent as returned by Omni, or null"),
        (status = 502, description = "Omni unreachable", body = ErrorResponse)
    )
)]
async fn get_agent(
    State(state): State<SharedState>,
    Path(account_id): Path<String>,
) -> Result<Json<Option<AgentRecord>>, ApiError> {
    Ok(Json(state.suna.get_suna_agent_for_user(&account_id).await?))
}

/// Get Suna agent statistics.
#[utoipa::path(
    get,
    path = "/api/suna/stats",
    responses(
        (status = 200, description = "Statistics as returned by Omni"),
        (status = 502, description = "Omni unreachable", body = ErrorResponse)
    )
)]
async fn agent_stats(State(state): State<SharedState>) -> Result<Json<AgentStats>, ApiError> {
    Ok(Json(state.suna.get_suna_agent_stats().await?))
}
