//! HTTP surface over a [`RecordStore`]. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /api/records` — every record, in document order.
//! - `PUT /api/records/:id` — shallow-merge the JSON body into record `id`.
//! - `DELETE /api/records/:id` — remove every record with that `id`.
//! - `POST /api/predict_all` — relabel `Prediccion_IA` on all records.
//! - `POST /register` — create a record from the JSON body.
//! - `GET /public-key`, `POST /api/register` — fixed payloads kept for older
//!   clients; they never touch the store.
//! - `GET /`, `GET /admin` — the HTML pages.
//!
//! Failures come back as `{ "error": "..." }` with 404 for unknown ids and 500
//! for everything else, unreadable bodies included. Details go to the log, not
//! the client. Store calls run on tokio's blocking pool.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::backend::Storage;
use crate::error::Error;
use crate::record::Record;
use crate::store::RecordStore;
use crate::views;

/// Message returned when no record has the requested id.
pub const NOT_FOUND_MESSAGE: &str = "Registro no encontrado";

/// Build the axum `Router` for `store`.
pub fn router<S: Storage + 'static>(store: Arc<RecordStore<S>>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/admin", get(admin_page))
        .route("/api/records", get(list_records::<S>))
        .route(
            "/api/records/:id",
            put(update_record::<S>).delete(delete_record::<S>),
        )
        .route("/api/predict_all", post(predict_all::<S>))
        .route("/register", post(register::<S>))
        .route("/public-key", get(public_key))
        .route("/api/register", post(legacy_register))
        .with_state(store)
}

/// Serve `store` over HTTP at `addr` (e.g. `"127.0.0.1:5000"`) until
/// `shutdown` resolves.
pub async fn serve<S, F>(
    store: Arc<RecordStore<S>>,
    addr: impl tokio::net::ToSocketAddrs,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: Storage + 'static,
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
}

/// A store error paired with the client-facing message for the route that
/// hit it.
#[derive(Debug)]
pub struct ApiError {
    err: Error,
    message: &'static str,
}

impl ApiError {
    fn new(err: Error, message: &'static str) -> Self {
        Self { err, message }
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        if self.err.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::NOT_FOUND {
            NOT_FOUND_MESSAGE
        } else {
            tracing::error!(error = %self.err, "{}", self.message);
            self.message
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ---- pages -------------------------------------------------------------------

async fn index_page() -> Html<&'static str> {
    Html(views::INDEX_HTML)
}

async fn admin_page() -> Html<&'static str> {
    Html(views::ADMIN_HTML)
}

// ---- records -----------------------------------------------------------------

/// Run a store operation on the blocking pool. Store calls do file I/O and
/// wait on the store mutex, neither of which may happen on a runtime worker.
async fn run_blocking<S, T, F>(store: Arc<RecordStore<S>>, op: F) -> crate::error::Result<T>
where
    S: Storage + 'static,
    T: Send + 'static,
    F: FnOnce(&RecordStore<S>) -> crate::error::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| Error::Internal(format!("store task failed: {e}")))?
}

/// Unwrap a JSON body, turning a rejection into the route's 500.
fn json_body<T>(
    body: Result<Json<T>, JsonRejection>,
    message: &'static str,
) -> Result<T, ApiError> {
    body.map(|Json(v)| v)
        .map_err(|rejection| ApiError::new(Error::Internal(rejection.body_text()), message))
}

/// `GET /api/records`
async fn list_records<S: Storage + 'static>(
    State(store): State<Arc<RecordStore<S>>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let records = run_blocking(store, |s| s.list())
        .await
        .map_err(|e| ApiError::new(e, "Error cargando registros"))?;
    tracing::debug!(count = records.len(), "sending records");
    Ok(Json(records))
}

/// `PUT /api/records/:id`
async fn update_record<S: Storage + 'static>(
    State(store): State<Arc<RecordStore<S>>>,
    Path(id): Path<i64>,
    patch: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const FAILED: &str = "Error actualizando registro";
    let patch = json_body(patch, FAILED)?;
    run_blocking(store, move |s| s.update_by_id(id, patch))
        .await
        .map_err(|e| ApiError::new(e, FAILED))?;
    Ok(Json(json!({ "message": "Registro actualizado" })))
}

/// `DELETE /api/records/:id`
async fn delete_record<S: Storage + 'static>(
    State(store): State<Arc<RecordStore<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    run_blocking(store, move |s| s.delete_by_id(id))
        .await
        .map_err(|e| ApiError::new(e, "Error eliminando registro"))?;
    Ok(Json(json!({ "message": "Registro eliminado" })))
}

/// `POST /api/predict_all`
async fn predict_all<S: Storage + 'static>(
    State(store): State<Arc<RecordStore<S>>>,
) -> Result<Json<Value>, ApiError> {
    let records = run_blocking(store, |s| s.recompute_classification())
        .await
        .map_err(|e| ApiError::new(e, "Error generando predicciones"))?;
    Ok(Json(json!({
        "msg": format!("✅ Predicciones IA generadas para {} registros", records.len()),
        "records": records,
    })))
}

/// `POST /register`
async fn register<S: Storage + 'static>(
    State(store): State<Arc<RecordStore<S>>>,
    fields: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const FAILED: &str = "Error registrando candidato";
    let fields = json_body(fields, FAILED)?;
    let record = run_blocking(store, move |s| s.create(fields))
        .await
        .map_err(|e| ApiError::new(e, FAILED))?;
    Ok(Json(json!({
        "success": true,
        "id": record.id(),
        "message": "Candidato registrado correctamente",
    })))
}

// ---- legacy ------------------------------------------------------------------

/// `GET /public-key`. There is no key exchange; the payload is fixed.
async fn public_key() -> Json<Value> {
    Json(json!({
        "publicKey": "PLACEHOLDER_PUBLIC_KEY",
        "message": "Cifrado no habilitado; los datos se envían sin cifrar",
    }))
}

/// `POST /api/register`. Echoes the email back with a fixed user id.
async fn legacy_register(body: Option<Json<Value>>) -> Json<Value> {
    let email = body
        .as_ref()
        .and_then(|Json(v)| v.get("email"))
        .cloned()
        .unwrap_or(Value::Null);
    Json(json!({
        "success": true,
        "message": "Usuario registrado correctamente",
        "user_id": 999,
        "email": email,
    }))
}
