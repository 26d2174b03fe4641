pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use handlers::ApiDoc;

pub fn router(pool: PgPool) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route(
            "/api/v1/sensors",
            post(handlers::create_sensor).get(handlers::list_sensors),
        )
        .route(
            "/api/v1/sensors/{id}",
            get(handlers::get_sensor)
                .put(handlers::update_sensor)
                .delete(handlers::delete_sensor),
        )
        .route(
            "/api/v1/sensors/{id}/value",
            patch(handlers::patch_sensor_value),
        )
        .route("/temperature", get(handlers::simulate_temperature))
        .with_state(pool)
        .split_for_parts();

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
}
