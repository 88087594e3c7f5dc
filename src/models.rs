use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::ApiError;

/// Name of the geospatial set that seeded points are added to
pub const POINTS_OF_INTEREST_KEY: &str = "points.of.interest";

/// Request body for caching a string value
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SetStringRequest {
    pub key: String,
    pub value: String,
}

impl SetStringRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("key", &self.key)?;
        require("value", &self.value)
    }
}

/// Request body for caching a JSON object, stored serialized under `key`
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SetStringObjectRequest {
    pub key: String,
    #[schema(value_type = Object)]
    pub value: Map<String, JsonValue>,
}

impl SetStringObjectRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("key", &self.key)
    }
}

/// Query string for `PUT /Strings/{key}`
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SetValueQuery {
    /// Value to store at the key
    pub value: Option<String>,
}

impl SetValueQuery {
    pub fn into_value(self) -> Result<String, ApiError> {
        match self.value {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ApiError::Validation("The value field is required.".to_string())),
        }
    }
}

/// A labelled geographic position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub label: &'static str,
}

impl GeoPoint {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("label", self.label)?;
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ApiError::Validation(format!(
                "latitude must be between -90 and 90, got {}",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ApiError::Validation(format!(
                "longitude must be between -180 and 180, got {}",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// Built-in points added by `GET /Geo/Seed`
pub const POINTS_OF_INTEREST: [GeoPoint; 5] = [
    GeoPoint {
        latitude: 41.226567703202,
        longitude: -96.07906965916344,
        label: "Tim's Domicile",
    },
    GeoPoint {
        latitude: 41.23665494384777,
        longitude: -96.1230578591632,
        label: "Dave & Busters",
    },
    GeoPoint {
        latitude: 41.26451910012323,
        longitude: -96.06945525916254,
        label: "Cheesecake Factory",
    },
    GeoPoint {
        latitude: 41.22493028558474,
        longitude: -95.92865423218247,
        label: "#1 Zoo in the World",
    },
    GeoPoint {
        latitude: 39.17685704075071,
        longitude: -94.48629091688504,
        label: "Worlds of Fun",
    },
];

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::Validation(format!("The {} field is required.", field)));
    }
    Ok(())
}
