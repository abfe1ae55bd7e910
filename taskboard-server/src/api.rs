//! HTTP surface of the task service: shared state, JSON handlers, error
//! mapping, and server startup.
//!
//! Every handler takes the board lock for the duration of one operation, so
//! writes are serialized and reads always observe dense positions.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{Value, json};
use taskboard_proto::error::ErrorBody;
use taskboard_proto::task::{
    DeleteResponse, PositionUpdate, Task, TaskCreate, TaskId, TaskList, TaskUpdate, TasksByStatus,
};
use tokio::sync::RwLock;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::board::{Board, BoardError};

/// Default browser origin allowed by CORS.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Shared service state: the board plus the CORS allow-list.
pub struct AppState {
    /// The authoritative board.
    pub board: RwLock<Board>,
    allowed_origins: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state with an empty board and the default allowed origin.
    #[must_use]
    pub fn new() -> Self {
        Self::with_board(Board::new(), vec![DEFAULT_ALLOWED_ORIGIN.to_string()])
    }

    /// Creates state around an existing board (e.g. one seeded with samples).
    #[must_use]
    pub fn with_board(board: Board, allowed_origins: Vec<String>) -> Self {
        Self {
            board: RwLock::new(board),
            allowed_origins,
        }
    }
}

// ---------------------------------------------------------------------------
// Error responses
// ---------------------------------------------------------------------------

/// A status code paired with the JSON [`ErrorBody`] sent to the client.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Body sent to the client.
    pub body: ErrorBody,
}

impl ApiErrorResponse {
    /// 404 for a missing task.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorBody::new("NOT_FOUND", message),
        }
    }

    /// 422 for a body that is not valid JSON or does not match the schema.
    #[must_use]
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ErrorBody::new("INVALID_BODY", message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<BoardError> for ApiErrorResponse {
    fn from(error: BoardError) -> Self {
        match error {
            BoardError::NotFound(id) => Self::not_found(format!("task {id} not found")),
            BoardError::Validation(errors) => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorBody {
                    code: "VALIDATION_ERROR".to_string(),
                    message: errors.to_string(),
                    details: Some(errors.to_field_errors()),
                },
            },
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                Self::unprocessable(rejection.body_text())
            }
            other => Self {
                status: other.status(),
                body: ErrorBody::new("INVALID_BODY", other.body_text()),
            },
        }
    }
}

impl From<PathRejection> for ApiErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::new("INVALID_PATH", rejection.body_text()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;
type TaskPath = Result<Path<i64>, PathRejection>;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn root() -> Json<Value> {
    Json(json!({ "message": "Taskboard API", "status": "running" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn list_tasks(State(state): State<Arc<AppState>>) -> Json<TaskList> {
    let tasks = state.board.read().await.list();
    Json(TaskList::new(tasks))
}

async fn tasks_by_status(State(state): State<Arc<AppState>>) -> Json<TasksByStatus> {
    Json(state.board.read().await.by_status())
}

async fn get_task(State(state): State<Arc<AppState>>, path: TaskPath) -> ApiResult<Task> {
    let Path(id) = path?;
    let task = state.board.read().await.get(TaskId::new(id))?;
    Ok(Json(task))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TaskCreate>, JsonRejection>,
) -> ApiResult<Task> {
    let Json(data) = payload?;
    let task = state.board.write().await.create(data)?;
    tracing::info!(task_id = %task.id, "created task");
    Ok(Json(task))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    path: TaskPath,
    payload: Result<Json<TaskUpdate>, JsonRejection>,
) -> ApiResult<Task> {
    let Path(id) = path?;
    let Json(data) = payload?;
    let task = state.board.write().await.update(TaskId::new(id), data)?;
    tracing::info!(task_id = %task.id, "updated task");
    Ok(Json(task))
}

async fn update_position(
    State(state): State<Arc<AppState>>,
    path: TaskPath,
    payload: Result<Json<PositionUpdate>, JsonRejection>,
) -> ApiResult<Task> {
    let Path(id) = path?;
    let Json(update) = payload?;
    let task = state
        .board
        .write()
        .await
        .reposition(TaskId::new(id), update)?;
    tracing::info!(
        task_id = %task.id,
        status = %task.status,
        position = task.position,
        "repositioned task"
    );
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    path: TaskPath,
) -> ApiResult<DeleteResponse> {
    let Path(id) = path?;
    let removed = state.board.write().await.delete(TaskId::new(id))?;
    tracing::info!(task_id = %removed.id, "deleted task");
    Ok(Json(DeleteResponse {
        message: "Task deleted successfully".to_string(),
        deleted_id: removed.id,
    }))
}

// ---------------------------------------------------------------------------
// Router and startup
// ---------------------------------------------------------------------------

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
}

/// Builds the application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.allowed_origins);
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/", get(list_tasks).post(create_task))
        .route("/api/tasks/by-status", get(tasks_by_status))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/position", patch(update_position))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the service on `addr` with an empty board and returns the bound
/// address and a join handle.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(AppState::new())).await
}

/// Starts the service with a pre-built [`AppState`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<AppState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task service error");
        }
    });

    Ok((bound_addr, handle))
}
