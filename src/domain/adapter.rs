// src/domain/adapter.rs

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::schema::{validate, DateInput, PropertyCandidate, ValidationError};
use crate::domain::types::{Badge, BadgeTone, PropertySummary};

/// Address line used when no source field yields one.
pub const UNKNOWN_ADDRESS: &str = "Unknown address";

// Known backend shapes, superimposed. Each field resolves through its own
// fallback chain, so a record may mix shapes freely:
//
//  record
//   ├── id | propertyId | _id
//   ├── addressLine, city, state, zip
//   ├── address
//   │    ├── fullStreetLine | street
//   │    ├── city
//   │    ├── state
//   │    └── zipCode
//   ├── price, beds, baths, sqft, lotSqft
//   ├── metadata
//   │    ├── listPrice
//   │    └── listDate
//   ├── details
//   │    ├── beds
//   │    ├── fullBaths
//   │    ├── sqft
//   │    └── lotSqft
//   ├── media.images[].url | primary_photo
//   ├── badges[].{label, tone}
//   ├── aiScore
//   ├── createdAt
//   └── description

/// Errors from mapping a raw backend record into the domain model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    #[error("expected a property record object, got {0}")]
    Shape(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Map an arbitrary backend record to a validated [`PropertySummary`].
///
/// This is the anti-corruption layer between raw payloads and the domain:
/// each field is resolved through a fixed first-match-wins fallback chain
/// (top-level shape first, then the nested shape), and the assembled
/// candidate goes through [`validate`] before anything escapes. A record
/// that is not a JSON object fails with [`AdapterError::Shape`]; a record
/// whose first defined source for a field has the wrong type fails
/// validation rather than silently falling through.
pub fn to_property_summary(raw: &Value) -> Result<PropertySummary, AdapterError> {
    let record = raw
        .as_object()
        .ok_or_else(|| AdapterError::Shape(json_type_name(raw)))?;

    let top = Some(record);
    let address = nested(record, "address");
    let details = nested(record, "details");
    let metadata = nested(record, "metadata");

    let candidate = PropertyCandidate {
        id: extract_id(record)?,
        address_line: string_chain(
            "addressLine",
            &[
                (top, "addressLine"),
                (address, "fullStreetLine"),
                (address, "street"),
            ],
        )?
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
        city: string_chain("city", &[(top, "city"), (address, "city")])?.unwrap_or_default(),
        state: string_chain("state", &[(top, "state"), (address, "state")])?.unwrap_or_default(),
        zip: string_chain("zip", &[(top, "zip"), (address, "zipCode")])?.unwrap_or_default(),
        price: number_chain("price", &[(top, "price"), (metadata, "listPrice")])?,
        beds: number_chain("beds", &[(details, "beds"), (top, "beds")])?,
        baths: number_chain("baths", &[(details, "fullBaths"), (top, "baths")])?,
        sqft: number_chain("sqft", &[(details, "sqft"), (top, "sqft")])?,
        lot_sqft: number_chain("lotSqft", &[(details, "lotSqft"), (top, "lotSqft")])?,
        image_url: extract_image_url(record)?,
        badges: extract_badges(record),
        ai_score: number_chain("aiScore", &[(top, "aiScore")])?,
        created_at: date_chain("createdAt", &[(top, "createdAt"), (metadata, "listDate")])?,
        description: string_chain("description", &[(top, "description")])?,
    };

    Ok(validate(candidate)?)
}

/// A present, non-null value. JSON `null` counts as absent so chains fall
/// through it the way the upstream payloads intend.
fn defined<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn nested<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    defined(obj, key).and_then(Value::as_object)
}

/// Resolve a string field through an ordered list of (object, key) sources.
/// The first defined source wins; a defined source of the wrong type is a
/// validation failure, not a fall-through.
fn string_chain(
    field: &'static str,
    sources: &[(Option<&Map<String, Value>>, &str)],
) -> Result<Option<String>, ValidationError> {
    for (obj, key) in sources {
        let Some(map) = obj else { continue };
        match defined(map, key) {
            None => continue,
            Some(Value::String(s)) => return Ok(Some(s.clone())),
            Some(_) => return Err(ValidationError::NotAString { field }),
        }
    }
    Ok(None)
}

fn number_chain(
    field: &'static str,
    sources: &[(Option<&Map<String, Value>>, &str)],
) -> Result<Option<f64>, ValidationError> {
    for (obj, key) in sources {
        let Some(map) = obj else { continue };
        match defined(map, key) {
            None => continue,
            Some(Value::Number(n)) => return Ok(n.as_f64()),
            Some(_) => return Err(ValidationError::NotANumber { field }),
        }
    }
    Ok(None)
}

/// Timestamps arrive as strings or epoch-millisecond numbers depending on
/// the shape; both are handed to the schema for canonical coercion.
fn date_chain(
    field: &'static str,
    sources: &[(Option<&Map<String, Value>>, &str)],
) -> Result<Option<DateInput>, ValidationError> {
    for (obj, key) in sources {
        let Some(map) = obj else { continue };
        match defined(map, key) {
            None => continue,
            Some(Value::String(s)) => return Ok(Some(DateInput::Text(s.clone()))),
            Some(Value::Number(n)) => {
                let millis = n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f as i64))
                    .unwrap_or(i64::MAX);
                return Ok(Some(DateInput::EpochMillis(millis)));
            }
            Some(_) => return Err(ValidationError::NotAString { field }),
        }
    }
    Ok(None)
}

/// id: `id` -> `propertyId` -> `_id`, stringified. Evaluation stops at the
/// first defined source; an empty or non-scalar id there is a rejection,
/// never a fall-through to the next alias.
fn extract_id(record: &Map<String, Value>) -> Result<String, ValidationError> {
    for key in ["id", "propertyId", "_id"] {
        match defined(record, key) {
            None => continue,
            Some(Value::String(s)) if !s.is_empty() => return Ok(s.clone()),
            Some(Value::Number(n)) => return Ok(n.to_string()),
            Some(_) => return Err(ValidationError::MissingId),
        }
    }
    Err(ValidationError::MissingId)
}

/// imageUrl: `media.images[0].url` -> `primary_photo` -> absent. A missing
/// link anywhere in the nested path falls through to the flat field.
fn extract_image_url(record: &Map<String, Value>) -> Result<Option<String>, ValidationError> {
    let first_image = nested(record, "media")
        .and_then(|media| defined(media, "images"))
        .and_then(Value::as_array)
        .and_then(|images| images.first())
        .and_then(Value::as_object);

    if let Some(image) = first_image {
        match defined(image, "url") {
            Some(Value::String(s)) => return Ok(Some(s.clone())),
            Some(_) => return Err(ValidationError::NotAString { field: "imageUrl" }),
            None => {}
        }
    }

    string_chain("imageUrl", &[(Some(record), "primary_photo")])
}

/// badges: keep each entry with a non-empty string label, in order, and
/// drop malformed entries. An absent (or non-array) source omits the field
/// entirely so serialized output distinguishes "none" from "empty".
fn extract_badges(record: &Map<String, Value>) -> Option<Vec<Badge>> {
    let entries = defined(record, "badges").and_then(Value::as_array)?;
    Some(entries.iter().filter_map(badge_from).collect())
}

fn badge_from(entry: &Value) -> Option<Badge> {
    let obj = entry.as_object()?;
    let label = obj.get("label")?.as_str().filter(|s| !s.is_empty())?;
    let tone = obj.get("tone").and_then(Value::as_str).and_then(tone_from);
    Some(Badge {
        label: label.to_string(),
        tone,
    })
}

fn tone_from(raw: &str) -> Option<BadgeTone> {
    match raw {
        "default" => Some(BadgeTone::Default),
        "info" => Some(BadgeTone::Info),
        "success" => Some(BadgeTone::Success),
        "warning" => Some(BadgeTone::Warning),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
