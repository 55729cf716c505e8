//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here with its OpenAPI specification, and Swagger UI is
//! served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/aliases` - Alias overview
/// - `POST /api/aliases` - Group donors under a new alias
/// - `GET /api/aliases/{id}` - One alias
/// - `PATCH /api/aliases/{id}` - Rename an alias or change its note
/// - `DELETE /api/aliases/{id}` - Delete an alias, re-homing its donors
/// - `DELETE /api/aliases/{alias_id}/donors/{donor_id}` - Take a donor out of an alias
/// - `GET /api/aliases/export` - Export the alias ledger
/// - `POST /api/aliases/import` - Replace the alias ledger
/// - `POST /api/import` - Queue a donation import
/// - `GET /api/import/latest` - Most recent import job
/// - `GET /api/import/{job_id}` - Import job progress
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Donation Whistle", description = "Donation Whistle API"), tags(
        (name = controller::alias::ALIAS_TAG, description = "Donor alias ledger routes"),
        (name = controller::import::IMPORT_TAG, description = "Donation import routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            controller::alias::list_aliases,
            controller::alias::create_alias
        ))
        .routes(routes!(
            controller::alias::get_alias,
            controller::alias::update_alias,
            controller::alias::delete_alias
        ))
        .routes(routes!(controller::alias::remove_donor))
        .routes(routes!(controller::alias::export_aliases))
        .routes(routes!(controller::alias::import_aliases))
        .routes(routes!(controller::import::start_import))
        .routes(routes!(controller::import::get_latest_import_job))
        .routes(routes!(controller::import::get_import_job))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
