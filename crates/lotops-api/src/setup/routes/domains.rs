//! Domain route groups (dealers, imports, inventory, schedule, preferences, VIN).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;

pub fn dealer_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/dealers", API_PREFIX),
            post(handlers::dealers::create_dealer),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}", API_PREFIX),
            get(handlers::dealers::get_dealer),
        )
        .with_state(state)
}

pub fn import_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/dealers/{{dealer_id}}/imports", API_PREFIX),
            post(handlers::imports::register_imports),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}/imports", API_PREFIX),
            get(handlers::imports::list_imports),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}/imports/process", API_PREFIX),
            post(handlers::imports::process_imports),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}/imports/{{import_id}}", API_PREFIX),
            get(handlers::imports::get_import),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}/imports/{{import_id}}", API_PREFIX),
            delete(handlers::imports::remove_import),
        )
        .route(
            &format!(
                "{}/dealers/{{dealer_id}}/imports/{{import_id}}/retry",
                API_PREFIX
            ),
            post(handlers::imports::retry_import),
        )
        .with_state(state)
}

pub fn inventory_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/dealers/{{dealer_id}}/inventory", API_PREFIX),
            get(handlers::inventory::list_vehicles),
        )
        .route(
            &format!(
                "{}/dealers/{{dealer_id}}/inventory/{{stock_number}}",
                API_PREFIX
            ),
            get(handlers::inventory::get_vehicle),
        )
        .with_state(state)
}

pub fn schedule_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/dealers/{{dealer_id}}/shifts", API_PREFIX),
            post(handlers::shifts::create_shift),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}/shifts", API_PREFIX),
            get(handlers::shifts::list_shifts),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}/shifts/conflicts", API_PREFIX),
            post(handlers::shifts::check_conflicts),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}/shifts/{{shift_id}}", API_PREFIX),
            get(handlers::shifts::get_shift),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}/shifts/{{shift_id}}", API_PREFIX),
            put(handlers::shifts::update_shift),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}/shifts/{{shift_id}}", API_PREFIX),
            delete(handlers::shifts::delete_shift),
        )
        .with_state(state)
}

pub fn preference_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/dealers/{{dealer_id}}/preferences/{{key}}", API_PREFIX),
            get(handlers::preferences::get_preference),
        )
        .route(
            &format!("{}/dealers/{{dealer_id}}/preferences/{{key}}", API_PREFIX),
            put(handlers::preferences::put_preference),
        )
        .with_state(state)
}

pub fn vin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/vin/{{vin}}", API_PREFIX),
            get(handlers::vin::check_vin),
        )
        .with_state(state)
}
