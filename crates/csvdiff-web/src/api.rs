//! HTTP endpoints for the upload/review flow.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/upload` | Diff two uploaded CSV files |
//! | `POST` | `/save` | Write a reviewed result and download it |
//!
//! Uploads are parsed entirely in memory; nothing is written to disk
//! until `/save`. Comparison runs in text-normalized mode: null and
//! empty string compare equal, and the JSON difference records carry
//! coerced strings.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use csvdiff_core::{
    diff_tables, parse_csv_str, reconcile_schemas, write_csv_file, DiffMode, Difference, Error,
    Row, Table,
};

/// Service configuration, passed in at construction.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Total request body cap for uploads
    pub max_upload_bytes: usize,
    /// Where `/save` writes the merged result
    pub output_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 16 * 1024 * 1024,
            output_path: PathBuf::from("merged_result.csv"),
        }
    }
}

/// Application state shared across all handlers.
pub type AppState = Arc<ServerConfig>;

/// Creates the service router.
pub fn router(config: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload))
        .route("/save", post(save))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(config)
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: msg.into() })).into_response()
}

/// Response for `/upload`.
#[derive(Debug, Serialize)]
struct UploadResponse {
    data1: Vec<Map<String, Value>>,
    data2: Vec<Map<String, Value>>,
    columns: Vec<String>,
    differences: Vec<Difference>,
}

/// `POST /upload` — diff two CSV files from multipart fields `file1`, `file2`.
async fn upload(mut multipart: Multipart) -> Response {
    let mut file1: Option<Vec<u8>> = None;
    let mut file2: Option<Vec<u8>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        };

        let name = field.name().map(str::to_string);
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        };

        match name.as_deref() {
            Some("file1") => file1 = Some(bytes),
            Some("file2") => file2 = Some(bytes),
            _ => {}
        }
    }

    let (file1, file2) = match (file1, file2) {
        (Some(file1), Some(file2)) => (file1, file2),
        (file1, _) => {
            let name = if file1.is_none() { "file1" } else { "file2" };
            let err = Error::MissingFile(name.to_string());
            tracing::warn!(error = %err, "upload rejected");
            return error_response(StatusCode::BAD_REQUEST, err.to_string());
        }
    };

    match compare_uploads(&file1, &file2) {
        Ok(response) => {
            tracing::info!(
                differences = response.differences.len(),
                columns = response.columns.len(),
                "upload compared"
            );
            Json(response).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "upload failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Parse, reconcile, and diff the two uploaded files.
fn compare_uploads(file1: &[u8], file2: &[u8]) -> csvdiff_core::Result<UploadResponse> {
    let text1 = String::from_utf8(file1.to_vec())
        .map_err(|e| std::io::Error::other(format!("file1 is not valid UTF-8: {e}")))?;
    let text2 = String::from_utf8(file2.to_vec())
        .map_err(|e| std::io::Error::other(format!("file2 is not valid UTF-8: {e}")))?;

    let left = parse_csv_str(&text1, "file1")?;
    let right = parse_csv_str(&text2, "file2")?;

    let (left, right) = reconcile_schemas(&left, &right);
    let differences = diff_tables(&left, &right, DiffMode::TextNormalized);

    Ok(UploadResponse {
        data1: rows_to_json(&left),
        data2: rows_to_json(&right),
        columns: left.column_names().iter().map(|s| s.to_string()).collect(),
        differences,
    })
}

/// Serialize a table's rows as column → value-or-null objects
fn rows_to_json(table: &Table) -> Vec<Map<String, Value>> {
    table
        .rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .map(|col| {
                    let value = match row.get(col.index) {
                        Some(s) => Value::String(s.to_string()),
                        None => Value::Null,
                    };
                    (col.name.clone(), value)
                })
                .collect()
        })
        .collect()
}

/// Request body for `/save`.
#[derive(Debug, Deserialize)]
struct SaveRequest {
    result: Vec<Map<String, Value>>,
}

/// `POST /save` — write the reviewed rows and return the file as a download.
async fn save(State(config): State<AppState>, Json(request): Json<SaveRequest>) -> Response {
    let table = table_from_rows(&request.result);

    if let Err(e) = write_csv_file(&table, &config.output_path) {
        tracing::error!(error = %e, "save failed");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }

    let contents = match std::fs::read(&config.output_path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!(error = %e, "save readback failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    tracing::info!(rows = table.row_count(), path = %config.output_path.display(), "result saved");

    let filename = config
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "merged_result.csv".to_string());

    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        contents,
    )
        .into_response()
}

/// Build a table from JSON row objects; columns in first-seen key order
fn table_from_rows(rows: &[Map<String, Value>]) -> Table {
    let mut table = Table::new();

    for row in rows {
        for key in row.keys() {
            if table.find_column(key).is_none() {
                let index = table.column_count();
                table
                    .columns
                    .push(csvdiff_core::Column::new(key.clone(), index));
            }
        }
    }

    for row in rows {
        let cells = table
            .columns
            .iter()
            .map(|col| match row.get(&col.name) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => Some(other.to_string()),
            })
            .collect();
        table.rows.push(Row::new(cells));
    }

    table
}
