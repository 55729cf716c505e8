use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        alias::{
            AliasDto, AliasExportEntry, AliasOverviewDto, BulkImportSummaryDto, CreateAliasDto,
            UpdateAliasDto,
        },
        api::ErrorDto,
    },
    server::{
        error::Error,
        model::app::AppState,
        service::{
            alias::AliasService,
            cache::{ALIAS_EXPORT_KEY, ALIAS_OVERVIEW_KEY},
        },
    },
};

pub static ALIAS_TAG: &str = "alias";

/// List every alias with its donors
#[utoipa::path(
    get,
    path = "/api/aliases",
    tag = ALIAS_TAG,
    responses(
        (status = 200, description = "Aliases split into grouped and ungrouped", body = AliasOverviewDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_aliases(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let service = AliasService::new(&state.db, &state.cache);

    let overview: AliasOverviewDto = state
        .cache
        .get_or_insert_with(ALIAS_OVERVIEW_KEY, || service.list())
        .await?;

    Ok((StatusCode::OK, Json(overview)))
}

/// Group donors under a new alias
#[utoipa::path(
    post,
    path = "/api/aliases",
    tag = ALIAS_TAG,
    request_body = CreateAliasDto,
    responses(
        (status = 201, description = "Alias created", body = AliasDto),
        (status = 400, description = "Blank name or no donors", body = ErrorDto),
        (status = 404, description = "Donor not found", body = ErrorDto),
        (status = 409, description = "Alias name already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_alias(
    State(state): State<AppState>,
    Json(payload): Json<CreateAliasDto>,
) -> Result<impl IntoResponse, Error> {
    let alias = AliasService::new(&state.db, &state.cache)
        .create(&payload.name, payload.note, &payload.donor_ids)
        .await?;

    Ok((StatusCode::CREATED, Json(alias)))
}

/// Get one alias with its donors
#[utoipa::path(
    get,
    path = "/api/aliases/{id}",
    tag = ALIAS_TAG,
    params(("id" = i32, Path, description = "Alias ID")),
    responses(
        (status = 200, description = "The alias", body = AliasDto),
        (status = 404, description = "Alias not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_alias(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let alias = AliasService::new(&state.db, &state.cache).get(id).await?;

    Ok((StatusCode::OK, Json(alias)))
}

/// Rename an alias or change its note
#[utoipa::path(
    patch,
    path = "/api/aliases/{id}",
    tag = ALIAS_TAG,
    params(("id" = i32, Path, description = "Alias ID")),
    request_body = UpdateAliasDto,
    responses(
        (status = 200, description = "The updated alias", body = AliasDto),
        (status = 400, description = "Blank name", body = ErrorDto),
        (status = 404, description = "Alias not found", body = ErrorDto),
        (status = 409, description = "Alias name already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_alias(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAliasDto>,
) -> Result<impl IntoResponse, Error> {
    let alias = AliasService::new(&state.db, &state.cache)
        .rename(id, payload.name, payload.note)
        .await?;

    Ok((StatusCode::OK, Json(alias)))
}

/// Delete an alias, moving each of its donors to an alias of their own
#[utoipa::path(
    delete,
    path = "/api/aliases/{id}",
    tag = ALIAS_TAG,
    params(("id" = i32, Path, description = "Alias ID")),
    responses(
        (status = 200, description = "Aliases now owning the former donors", body = Vec<AliasDto>),
        (status = 404, description = "Alias not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_alias(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let rehomed = AliasService::new(&state.db, &state.cache)
        .delete(id)
        .await?;

    Ok((StatusCode::OK, Json(rehomed)))
}

/// Take a donor out of an alias
#[utoipa::path(
    delete,
    path = "/api/aliases/{alias_id}/donors/{donor_id}",
    tag = ALIAS_TAG,
    params(
        ("alias_id" = i32, Path, description = "Alias ID"),
        ("donor_id" = i32, Path, description = "Donor ID")
    ),
    responses(
        (status = 200, description = "Aliases affected by the change", body = Vec<AliasDto>),
        (status = 400, description = "Donor is not in the alias", body = ErrorDto),
        (status = 404, description = "Alias not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_donor(
    State(state): State<AppState>,
    Path((alias_id, donor_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let aliases = AliasService::new(&state.db, &state.cache)
        .remove_donor(alias_id, donor_id)
        .await?;

    Ok((StatusCode::OK, Json(aliases)))
}

/// Export the alias ledger
#[utoipa::path(
    get,
    path = "/api/aliases/export",
    tag = ALIAS_TAG,
    responses(
        (status = 200, description = "Every non-empty alias with its donor names", body = Vec<AliasExportEntry>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_aliases(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let service = AliasService::new(&state.db, &state.cache);

    let entries: Vec<AliasExportEntry> = state
        .cache
        .get_or_insert_with(ALIAS_EXPORT_KEY, || service.export())
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}

/// Replace the alias ledger
///
/// Accepts the export format or an object mapping alias names to donor names.
#[utoipa::path(
    post,
    path = "/api/aliases/import",
    tag = ALIAS_TAG,
    request_body(content = Vec<AliasExportEntry>, content_type = "application/json"),
    responses(
        (status = 200, description = "Ledger replaced", body = BulkImportSummaryDto),
        (status = 400, description = "Malformed payload or unmatched donor name", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn import_aliases(
    State(state): State<AppState>,
    payload: String,
) -> Result<impl IntoResponse, Error> {
    let summary = AliasService::new(&state.db, &state.cache)
        .bulk_import(&payload, state.settings.alias_import_mode)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}
