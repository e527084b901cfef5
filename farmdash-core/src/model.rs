use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Fallback position used until a location grant replaces it (Pune).
pub const DEFAULT_LATITUDE: f64 = 18.5204;
pub const DEFAULT_LONGITUDE: f64 = 73.8567;

/// A complete latitude/longitude pair. Replaced as a whole, never field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Default for GeoCoordinate {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub humidity: u8,
}

/// Body of the OpenWeather `/weather` endpoint, kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub main: CurrentMain,
    pub weather: Vec<Condition>,
}

impl CurrentWeather {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMain {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
}

/// One 3-hour slot of the forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp in seconds.
    pub dt: i64,
    pub main: ForecastMain,
    pub weather: Vec<Condition>,
    /// Probability of precipitation, 0.0 to 1.0.
    #[serde(default)]
    pub pop: f64,
}

/// Body of the OpenWeather `/forecast` endpoint, kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub list: Vec<ForecastEntry>,
}

/// Order lifecycle state as stored in the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Fulfilled,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Fulfilled => "fulfilled",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "fulfilled" => Self::Fulfilled,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Read-only copy of a row from the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Text or integer primary key, kept in its text form.
    #[serde(deserialize_with = "text_or_integer")]
    pub id: String,
    pub buyer_id: String,
    pub status: OrderStatus,
    pub total_price: f64,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn text_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Text(String),
        Integer(i64),
    }

    Ok(match Key::deserialize(deserializer)? {
        Key::Text(s) => s,
        Key::Integer(n) => n.to_string(),
    })
}

/// The signed-in buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_coordinate_is_fallback_location() {
        let c = GeoCoordinate::default();
        assert_eq!(c, GeoCoordinate::new(18.5204, 73.8567));
    }

    #[test]
    fn order_status_keeps_unknown_values() {
        let rec: OrderRecord = serde_json::from_value(serde_json::json!({
            "id": "o-1",
            "buyer_id": "b-1",
            "status": "shipped",
            "total_price": 12.5
        }))
        .unwrap();

        assert_eq!(rec.status, OrderStatus::Other("shipped".into()));
        assert_eq!(rec.status.as_str(), "shipped");
        assert!(rec.created_at.is_none());
    }

    #[test]
    fn integer_order_id_is_accepted() {
        let rec: OrderRecord = serde_json::from_value(serde_json::json!({
            "id": 7,
            "buyer_id": "b-1",
            "status": "pending",
            "total_price": 40
        }))
        .unwrap();

        assert_eq!(rec.id, "7");
        assert_eq!(rec.total_price, 40.0);
    }

    #[test]
    fn order_status_serializes_as_plain_string() {
        let v = serde_json::to_value(OrderStatus::Pending).unwrap();
        assert_eq!(v, serde_json::json!("pending"));
    }

    #[test]
    fn forecast_entry_pop_defaults_to_zero() {
        let entry: ForecastEntry = serde_json::from_value(serde_json::json!({
            "dt": 1700000000,
            "main": { "temp_min": 20.1, "temp_max": 25.7, "humidity": 60 },
            "weather": [{ "main": "Clouds", "description": "few clouds", "icon": "02d" }]
        }))
        .unwrap();

        assert_eq!(entry.pop, 0.0);
    }
}
