use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use sqlmask_core::{AliasMapping, QueryMasker};
use sqlmask_storage::{Storage, StorageError};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

// Request/response bodies for the REST API
#[derive(Deserialize)]
struct MaskRequest {
    query: String,
}

#[derive(Serialize)]
struct MaskResponse {
    history_id: Option<i64>,
    masked_query: String,
    mapping: AliasMapping,
}

#[derive(Deserialize)]
struct UnmaskRequest {
    modified_query: String,
    #[serde(default)]
    history_id: Option<i64>,
    /// Used instead of a stored record when no `history_id` is given
    #[serde(default)]
    mapping: Option<AliasMapping>,
}

#[derive(Serialize)]
struct UnmaskResponse {
    history_id: Option<i64>,
    restored_query: String,
}

/// Listener and behaviour settings for [`MaskServer::serve`]
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
    pub read_only: bool,
    pub preview_chars: usize,
}

pub struct MaskServer {
    pub db: Arc<Storage>,
    pub masker: QueryMasker,
    pub read_only: bool,
    pub preview_chars: usize,
}

impl MaskServer {
    pub fn new(db: Arc<Storage>, masker: QueryMasker, read_only: bool, preview_chars: usize) -> Self {
        Self {
            db,
            masker,
            read_only,
            preview_chars,
        }
    }

    /// Routes with a permissive CORS layer, ready to serve or to drive in tests
    pub fn router(self: Arc<Self>) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(handle_info))
            .route("/api/mask", post(api_mask))
            .route("/api/unmask", post(api_unmask))
            .route("/api/history", get(api_list_history))
            .route(
                "/api/history/:id",
                get(api_get_history).delete(api_delete_history),
            )
            .layer(cors)
            .with_state(self)
    }

    pub async fn serve(
        db: Arc<Storage>,
        masker: QueryMasker,
        options: ServerOptions,
    ) -> anyhow::Result<()> {
        let server = Arc::new(Self::new(
            db,
            masker,
            options.read_only,
            options.preview_chars,
        ));
        let app = server.router();

        let addr = format!("{}:{}", options.host, options.port);
        let listener = TcpListener::bind(&addr).await?;

        info!(read_only = options.read_only, "sqlmask server listening on {}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}

type AppState = Arc<MaskServer>;

fn storage_failure(e: StorageError) -> Response {
    match e {
        StorageError::NotFound(id) => {
            warn!(id, "history record not found");
            (
                StatusCode::NOT_FOUND,
                format!("History record {} not found", id),
            )
                .into_response()
        }
        e => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// GET handler for server info/health check
async fn handle_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "sqlmask",
        "version": env!("CARGO_PKG_VERSION"),
        "read_only": state.read_only,
    }))
}

/// POST /api/mask - Mask a statement and record it
async fn api_mask(State(state): State<AppState>, Json(req): Json<MaskRequest>) -> Response {
    let result = state.masker.mask(&req.query);

    if state.read_only {
        return Json(MaskResponse {
            history_id: None,
            masked_query: result.masked,
            mapping: result.mapping,
        })
        .into_response();
    }

    match state.db.save_masking(&req.query, &result).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(MaskResponse {
                history_id: Some(id),
                masked_query: result.masked,
                mapping: result.mapping,
            }),
        )
            .into_response(),
        Err(e) => storage_failure(e),
    }
}

/// POST /api/unmask - Restore an edited statement from a stored or inline mapping
async fn api_unmask(State(state): State<AppState>, Json(req): Json<UnmaskRequest>) -> Response {
    let mapping = match (req.history_id, req.mapping) {
        (Some(id), _) => match state.db.get_mapping(id).await {
            Ok(mapping) => mapping,
            Err(e) => return storage_failure(e),
        },
        (None, Some(mapping)) => mapping,
        (None, None) => {
            return (
                StatusCode::BAD_REQUEST,
                "Either history_id or mapping is required",
            )
                .into_response();
        }
    };

    let restored = state.masker.unmask(&req.modified_query, &mapping);

    if let Some(id) = req.history_id
        && !state.read_only
        && let Err(e) = state.db.save_restoration(id, &restored).await
    {
        return storage_failure(e);
    }

    Json(UnmaskResponse {
        history_id: req.history_id,
        restored_query: restored,
    })
    .into_response()
}

/// GET /api/history - List history, newest first
async fn api_list_history(State(state): State<AppState>) -> Response {
    match state.db.list_history(state.preview_chars).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => storage_failure(e),
    }
}

/// GET /api/history/:id - Full history record
async fn api_get_history(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.db.get_history(id).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => storage_failure(e),
    }
}

/// DELETE /api/history/:id - Remove a history record
async fn api_delete_history(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    if state.read_only {
        return (StatusCode::FORBIDDEN, "Server is in read-only mode").into_response();
    }

    match state.db.delete_history(id).await {
        Ok(()) => Json(serde_json::json!({
            "message": format!("History record {} deleted", id)
        }))
        .into_response(),
        Err(e) => storage_failure(e),
    }
}
