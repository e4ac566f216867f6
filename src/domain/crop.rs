//! Crop record types and boundary validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::error::Error;

/// A crop record as the remote store returns it.
///
/// The remote echoes whatever was written historically, so `yield_quantity`
/// stays a loose JSON value (number, numeric string, or absent) and is only
/// interpreted by the aggregator. The identifier is assigned once, client
/// side, and is the sole key for get/delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CropRecord {
    pub crop_id: String,
    pub crop_name: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub yield_quantity: JsonValue,
    #[serde(default)]
    pub harvest_date: Option<String>,
}

/// A validated request to create a crop record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCrop {
    pub crop_name: String,
    pub yield_quantity: f64,
    pub harvest_date: NaiveDate,
}

impl NewCrop {
    /// Validates raw form-style input.
    ///
    /// Form values arrive as strings and are checked here, before any
    /// network call; failures come back as [`Error::MalformedInput`] and
    /// never reach the remote store.
    pub fn parse(crop_name: &str, yield_quantity: &str, harvest_date: &str) -> Result<Self, Error> {
        let name = crop_name.trim();
        if name.is_empty() {
            return Err(Error::MalformedInput {
                field: "crop_name",
                reason: "must not be empty".to_string(),
            });
        }

        let quantity: f64 = yield_quantity
            .trim()
            .parse()
            .map_err(|_| Error::MalformedInput {
                field: "yield_quantity",
                reason: format!("'{}' is not a number", yield_quantity),
            })?;
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(Error::MalformedInput {
                field: "yield_quantity",
                reason: "must be a finite, non-negative number".to_string(),
            });
        }

        let date =
            NaiveDate::parse_from_str(harvest_date.trim(), "%Y-%m-%d").map_err(|_| {
                Error::MalformedInput {
                    field: "harvest_date",
                    reason: format!("'{}' is not a YYYY-MM-DD date", harvest_date),
                }
            })?;

        Ok(Self {
            crop_name: name.to_string(),
            yield_quantity: quantity,
            harvest_date: date,
        })
    }
}

/// Derives the fixed object-storage URL for a crop's image.
///
/// Pure string construction; uploads are not handled here.
pub fn image_url(bucket: &str, crop_id: &str) -> String {
    format!(
        "https://{}.s3.amazonaws.com/crop_images/{}.jpg",
        bucket, crop_id
    )
}
