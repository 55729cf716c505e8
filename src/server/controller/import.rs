use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, import::ImportJobDto},
    server::{
        data::import_job::ImportJobRepository,
        error::{error_response, Error},
        model::app::AppState,
    },
};

pub static IMPORT_TAG: &str = "import";

/// Queue an import of the configured donation CSV
#[utoipa::path(
    post,
    path = "/api/import",
    tag = IMPORT_TAG,
    responses(
        (status = 202, description = "Import job queued", body = ImportJobDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn start_import(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let handle = state
        .queue
        .enqueue_import(state.settings.raw_data_path.clone())
        .await?;
    let job = handle.status().await?;

    Ok((StatusCode::ACCEPTED, Json(ImportJobDto::from(job))))
}

/// Get the progress of an import job
#[utoipa::path(
    get,
    path = "/api/import/{job_id}",
    tag = IMPORT_TAG,
    params(("job_id" = i32, Path, description = "Import job ID")),
    responses(
        (status = 200, description = "The job's current state", body = ImportJobDto),
        (status = 404, description = "Import job not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_import_job(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let job = state.queue.handle(job_id).status().await?;

    Ok((StatusCode::OK, Json(ImportJobDto::from(job))))
}

/// Get the most recently queued import job
#[utoipa::path(
    get,
    path = "/api/import/latest",
    tag = IMPORT_TAG,
    responses(
        (status = 200, description = "The latest job's current state", body = ImportJobDto),
        (status = 404, description = "No import has been queued", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_latest_import_job(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let Some(job) = ImportJobRepository::new(&state.db).get_latest().await? else {
        return Ok(error_response(StatusCode::NOT_FOUND, "No import has been queued"));
    };

    Ok((StatusCode::OK, Json(ImportJobDto::from(job))).into_response())
}
