use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use utoipa::OpenApi;

use super::{
    dto::{CreateSensor, SensorValuePatch, SimulatedTemperature, UpdateSensor},
    errors::AppError,
};
use crate::{db::models::Sensor, simulation};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TemperatureParams {
    pub location: String,
}

// ---------------------------------------------------------------------------
// Shared row access
// ---------------------------------------------------------------------------

async fn fetch_sensor(pool: &PgPool, id: i32) -> Result<Sensor, AppError> {
    sqlx::query_as::<_, Sensor>(
        "SELECT id, name, type, location, unit, value, status \
         FROM sensors WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Draw a fresh simulated reading, persist it on the row, and reflect it on
/// the in-memory sensor. Temperature sensors report a new value on every
/// fetch, so reads of them are not idempotent.
async fn refresh_temperature(pool: &PgPool, sensor: &mut Sensor) -> Result<(), AppError> {
    let value = simulation::random_temperature();
    sqlx::query("UPDATE sensors SET value = $1 WHERE id = $2")
        .bind(value)
        .bind(sensor.id)
        .execute(pool)
        .await?;
    sensor.value = Some(value);
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Register a new sensor. The stored row starts with no value and status
/// `"active"`.
#[utoipa::path(
    post,
    path = "/api/v1/sensors",
    request_body = CreateSensor,
    responses(
        (status = 201, description = "Sensor created", body = Sensor),
        (status = 422, description = "Missing or malformed field"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn create_sensor(
    State(pool): State<PgPool>,
    Json(body): Json<CreateSensor>,
) -> Result<(StatusCode, Json<Sensor>), AppError> {
    let sensor = sqlx::query_as::<_, Sensor>(
        r#"
        INSERT INTO sensors (name, type, location, unit, value, status)
        VALUES ($1, $2, $3, $4, NULL, 'active')
        RETURNING id, name, type, location, unit, value, status
        "#,
    )
    .bind(&body.name)
    .bind(&body.sensor_type)
    .bind(&body.location)
    .bind(&body.unit)
    .fetch_one(&pool)
    .await?;

    info!(id = sensor.id, name = %sensor.name, "Sensor created");
    Ok((StatusCode::CREATED, Json(sensor)))
}

/// Fetch every sensor. Temperature-type sensors get a freshly simulated
/// reading, which is persisted before the response is built.
#[utoipa::path(
    get,
    path = "/api/v1/sensors",
    responses(
        (status = 200, description = "All sensors", body = Vec<Sensor>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn list_sensors(State(pool): State<PgPool>) -> Result<Json<Vec<Sensor>>, AppError> {
    let mut sensors = sqlx::query_as::<_, Sensor>(
        "SELECT id, name, type, location, unit, value, status FROM sensors",
    )
    .fetch_all(&pool)
    .await?;

    for sensor in &mut sensors {
        if sensor.is_temperature() {
            refresh_temperature(&pool, sensor).await?;
        }
    }

    Ok(Json(sensors))
}

/// Fetch a single sensor by id. Temperature-type sensors get a freshly
/// simulated, persisted reading first.
#[utoipa::path(
    get,
    path = "/api/v1/sensors/{id}",
    params(
        ("id" = i32, Path, description = "Sensor ID"),
    ),
    responses(
        (status = 200, description = "The sensor", body = Sensor),
        (status = 404, description = "Sensor not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn get_sensor(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<Sensor>, AppError> {
    let mut sensor = fetch_sensor(&pool, id).await?;

    if sensor.is_temperature() {
        refresh_temperature(&pool, &mut sensor).await?;
    }

    Ok(Json(sensor))
}

/// Partially update a sensor's descriptive fields. Fields absent from the
/// body are left untouched.
#[utoipa::path(
    put,
    path = "/api/v1/sensors/{id}",
    params(
        ("id" = i32, Path, description = "Sensor ID"),
    ),
    request_body = UpdateSensor,
    responses(
        (status = 200, description = "Updated sensor", body = Sensor),
        (status = 404, description = "Sensor not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn update_sensor(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateSensor>,
) -> Result<Json<Sensor>, AppError> {
    let mut sensor = fetch_sensor(&pool, id).await?;

    if let Some(name) = body.name {
        sensor.name = name;
    }
    if let Some(sensor_type) = body.sensor_type {
        sensor.sensor_type = sensor_type;
    }
    if let Some(location) = body.location {
        sensor.location = location;
    }
    if let Some(unit) = body.unit {
        sensor.unit = unit;
    }

    sqlx::query("UPDATE sensors SET name = $1, type = $2, location = $3, unit = $4 WHERE id = $5")
        .bind(&sensor.name)
        .bind(&sensor.sensor_type)
        .bind(&sensor.location)
        .bind(&sensor.unit)
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(Json(sensor))
}

/// Permanently delete a sensor.
#[utoipa::path(
    delete,
    path = "/api/v1/sensors/{id}",
    params(
        ("id" = i32, Path, description = "Sensor ID"),
    ),
    responses(
        (status = 200, description = "Sensor deleted"),
        (status = 404, description = "Sensor not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn delete_sensor(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM sensors WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    info!(id, "Sensor deleted");
    Ok(Json(serde_json::json!({ "detail": "Sensor deleted" })))
}

/// Set a sensor's value and/or status. An explicit `"value": null` clears
/// the stored value; an omitted `value` leaves it untouched.
#[utoipa::path(
    patch,
    path = "/api/v1/sensors/{id}/value",
    params(
        ("id" = i32, Path, description = "Sensor ID"),
    ),
    request_body = SensorValuePatch,
    responses(
        (status = 200, description = "Updated sensor", body = Sensor),
        (status = 404, description = "Sensor not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn patch_sensor_value(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
    Json(body): Json<SensorValuePatch>,
) -> Result<Json<Sensor>, AppError> {
    let mut sensor = fetch_sensor(&pool, id).await?;

    if let Some(value) = body.value {
        sensor.value = value;
    }
    if let Some(status) = body.status {
        sensor.status = status;
    }

    sqlx::query("UPDATE sensors SET value = $1, status = $2 WHERE id = $3")
        .bind(sensor.value)
        .bind(&sensor.status)
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(Json(sensor))
}

/// Simulate a temperature reading for an arbitrary location. Pure
/// computation — stored sensors are never touched.
#[utoipa::path(
    get,
    path = "/temperature",
    params(
        ("location" = String, Query, description = "Location to simulate a reading for"),
    ),
    responses(
        (status = 200, description = "Simulated reading", body = SimulatedTemperature),
    ),
    tag = "sensors"
)]
pub async fn simulate_temperature(
    Query(params): Query<TemperatureParams>,
) -> Json<SimulatedTemperature> {
    Json(SimulatedTemperature {
        location: params.location,
        temperature: simulation::random_temperature(),
        unit: "°C".to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        create_sensor,
        list_sensors,
        get_sensor,
        update_sensor,
        delete_sensor,
        patch_sensor_value,
        simulate_temperature,
        health,
    ),
    components(schemas(Sensor, CreateSensor, UpdateSensor, SensorValuePatch, SimulatedTemperature)),
    tags(
        (name = "sensors", description = "Sensor management endpoints"),
        (name = "system",  description = "System endpoints"),
    ),
    info(
        title = "Smart Home Sensor API",
        version = "1.0",
        description = "REST API for managing smart home sensors"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
