//! OpenAPI documentation.
//! Handler path annotations carry the versioned prefix from `crate::constants::API_PREFIX`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use lotops_core::models;

/// Returns the OpenAPI spec served at /api/openapi.json.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LotOps API",
        version = "0.1.0",
        description = "Dealership operations API (v0): CSV inventory feed imports with per-file status and retry, vehicle inventory queries, employee shift scheduling with conflict detection, dealer preferences, and VIN analysis. All endpoints are versioned under /api/v0/.",
        contact(
            name = "API Support",
            url = "https://github.com/yourusername/lotops"
        )
    ),
    paths(
        // Dealers
        handlers::dealers::create_dealer,
        handlers::dealers::get_dealer,
        // Imports
        handlers::imports::register_imports,
        handlers::imports::process_imports,
        handlers::imports::list_imports,
        handlers::imports::get_import,
        handlers::imports::retry_import,
        handlers::imports::remove_import,
        // Inventory
        handlers::inventory::list_vehicles,
        handlers::inventory::get_vehicle,
        // Schedule
        handlers::shifts::create_shift,
        handlers::shifts::update_shift,
        handlers::shifts::delete_shift,
        handlers::shifts::get_shift,
        handlers::shifts::list_shifts,
        handlers::shifts::check_conflicts,
        // Preferences
        handlers::preferences::get_preference,
        handlers::preferences::put_preference,
        // VIN
        handlers::vin::check_vin,
    ),
    components(
        schemas(
            // Core models
            models::Dealer,
            models::DealerStatus,
            models::ImportFile,
            models::ImportStatus,
            models::ImportSummary,
            models::InvalidRowReport,
            models::DetectedMeta,
            models::Vehicle,
            models::ScheduleShift,
            models::DealerPreference,
            lotops_core::VinAnalysis,
            // Request/response DTOs
            handlers::dealers::CreateDealerRequest,
            handlers::imports::RegisterImportsResponse,
            handlers::inventory::InventoryQuery,
            handlers::shifts::ShiftRequest,
            handlers::shifts::ShiftListQuery,
            handlers::shifts::ConflictCheckRequest,
            handlers::shifts::ConflictCheckResponse,
            handlers::preferences::SetPreferenceRequest,
            handlers::vin::VinCheckResponse,
            crate::services::import::RejectedFile,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "dealers", description = "Dealer provisioning and lookup"),
        (name = "imports", description = "CSV feed registration, processing, status, retry, and removal"),
        (name = "inventory", description = "Vehicle inventory queries"),
        (name = "schedule", description = "Employee shift scheduling and conflict checks"),
        (name = "preferences", description = "Per-dealer operator preferences"),
        (name = "vin", description = "VIN normalization and analysis")
    )
)]
pub struct ApiDoc;
