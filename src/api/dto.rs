use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/v1/sensors`. The new sensor starts with no
/// value and status `"active"`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSensor {
    pub name: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub location: String,
    pub unit: String,
}

/// Request body for `PUT /api/v1/sensors/{id}`.
///
/// Every field is independently optional: fields absent from the body are
/// left untouched on the stored sensor.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSensor {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub sensor_type: Option<String>,
    pub location: Option<String>,
    pub unit: Option<String>,
}

/// Request body for `PATCH /api/v1/sensors/{id}/value`.
///
/// `value` distinguishes "omitted" (outer `None`, keep the stored value)
/// from an explicit JSON `null` (`Some(None)`, clear the stored value).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SensorValuePatch {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub value: Option<Option<f64>>,
    pub status: Option<String>,
}

/// Response for `GET /temperature`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SimulatedTemperature {
    pub location: String,
    /// Degrees Celsius in [-15.0, 30.0], rounded to 2 decimals.
    pub temperature: f64,
    pub unit: String,
}

/// Wraps a field's deserialised value in an extra `Some` so that a present
/// `null` and an absent field map to different variants.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
