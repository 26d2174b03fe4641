use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A registered sensor. Declared once and used both as the `sensors` row
/// type and as the JSON body returned by the API.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Sensor {
    /// Assigned by the database on insert.
    pub id: i32,
    pub name: String,
    /// Free text. `"temperature"` (any casing) makes the sensor report a
    /// freshly simulated reading on every fetch.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub location: String,
    pub unit: String,
    /// Last reading. Null until a value is recorded.
    pub value: Option<f64>,
    /// Free text, `"active"` at creation. No transition rules are enforced.
    pub status: String,
}

impl Sensor {
    pub fn is_temperature(&self) -> bool {
        self.sensor_type.eq_ignore_ascii_case("temperature")
    }
}
