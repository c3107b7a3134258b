// src/domain/schema.rs

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use thiserror::Error;
use url::Url;

use crate::domain::types::{Badge, FilterSpec, Pagination, PropertySummary};

/// A field-level schema violation. Carries enough context for the
/// orchestration layer to surface a human-readable message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("id could not be produced as a non-empty string from id, propertyId, or _id")]
    MissingId,
    #[error("addressLine must not be empty")]
    EmptyAddressLine,
    #[error("{field} must be a string")]
    NotAString { field: &'static str },
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("aiScore {0} is outside the 0-100 range")]
    AiScoreOutOfRange(f64),
    #[error("imageUrl {0:?} is not a valid url")]
    InvalidImageUrl(String),
    #[error("createdAt timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
    #[error("minPrice {min} cannot exceed maxPrice {max}")]
    PriceRange { min: f64, max: f64 },
    #[error("pageSize must be positive")]
    ZeroPageSize,
}

/// A timestamp as the backend may deliver it: a string, or an epoch value
/// in milliseconds. [`validate`] coerces both to the canonical string form.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Text(String),
    EpochMillis(i64),
}

/// The loosely-typed shape the adapter assembles before validation.
///
/// A candidate carries raw field values in their post-extraction form;
/// nothing here is guaranteed yet. [`validate`] is the only way to turn a
/// candidate into a [`PropertySummary`].
#[derive(Debug, Clone, Default)]
pub struct PropertyCandidate {
    pub id: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub price: Option<f64>,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub sqft: Option<f64>,
    pub lot_sqft: Option<f64>,
    pub image_url: Option<String>,
    pub badges: Option<Vec<Badge>>,
    pub ai_score: Option<f64>,
    pub created_at: Option<DateInput>,
    pub description: Option<String>,
}

impl From<PropertySummary> for PropertyCandidate {
    fn from(summary: PropertySummary) -> Self {
        Self {
            id: summary.id,
            address_line: summary.address_line,
            city: summary.city,
            state: summary.state,
            zip: summary.zip,
            price: summary.price,
            beds: summary.beds,
            baths: summary.baths,
            sqft: summary.sqft,
            lot_sqft: summary.lot_sqft,
            image_url: summary.image_url,
            badges: summary.badges,
            ai_score: summary.ai_score,
            created_at: summary.created_at.map(DateInput::Text),
            description: summary.description,
        }
    }
}

/// Validate a candidate into a [`PropertySummary`], enforcing every domain
/// invariant structurally: non-empty `id` and `address_line`, finite
/// numbers, `ai_score` within [0, 100], a parseable `image_url`, and a
/// canonical `created_at` string.
///
/// Pure, and idempotent on valid input: feeding a validated entity back in
/// (via `PropertyCandidate::from`) yields an equal entity.
pub fn validate(candidate: PropertyCandidate) -> Result<PropertySummary, ValidationError> {
    if candidate.id.is_empty() {
        return Err(ValidationError::MissingId);
    }
    if candidate.address_line.is_empty() {
        return Err(ValidationError::EmptyAddressLine);
    }

    require_finite("price", candidate.price)?;
    require_finite("beds", candidate.beds)?;
    require_finite("baths", candidate.baths)?;
    require_finite("sqft", candidate.sqft)?;
    require_finite("lotSqft", candidate.lot_sqft)?;
    require_finite("aiScore", candidate.ai_score)?;

    if let Some(score) = candidate.ai_score {
        if !(0.0..=100.0).contains(&score) {
            return Err(ValidationError::AiScoreOutOfRange(score));
        }
    }

    if let Some(raw) = &candidate.image_url {
        Url::parse(raw).map_err(|_| ValidationError::InvalidImageUrl(raw.clone()))?;
    }

    let created_at = candidate.created_at.map(canonical_timestamp).transpose()?;

    Ok(PropertySummary {
        id: candidate.id,
        address_line: candidate.address_line,
        city: candidate.city,
        state: candidate.state,
        zip: candidate.zip,
        price: candidate.price,
        beds: candidate.beds,
        baths: candidate.baths,
        sqft: candidate.sqft,
        lot_sqft: candidate.lot_sqft,
        image_url: candidate.image_url,
        badges: candidate.badges,
        ai_score: candidate.ai_score,
        created_at,
        description: candidate.description,
    })
}

fn require_finite(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(n) if !n.is_finite() => Err(ValidationError::NonFinite { field }),
        _ => Ok(()),
    }
}

/// Coerce a timestamp into the canonical representation: whole-second UTC
/// RFC 3339. Epoch input is interpreted as milliseconds; string input that
/// parses as RFC 3339 is renormalized, any other string passes through
/// unchanged (the backend sends free-form dates for some legacy sources).
fn canonical_timestamp(input: DateInput) -> Result<String, ValidationError> {
    match input {
        DateInput::EpochMillis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            .ok_or(ValidationError::TimestampOutOfRange(ms)),
        DateInput::Text(text) => Ok(match DateTime::parse_from_rfc3339(&text) {
            Ok(dt) => dt
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            Err(_) => text,
        }),
    }
}

impl FilterSpec {
    /// Enforce the cross-field invariant: a populated price range must not
    /// be inverted. Violations fail loudly rather than clamping.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(ValidationError::PriceRange { min, max });
            }
        }
        Ok(())
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page_size == 0 {
            return Err(ValidationError::ZeroPageSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::BadgeTone;

    fn candidate() -> PropertyCandidate {
        PropertyCandidate {
            id: "realtor:884".to_string(),
            address_line: "455 Summit Ave".to_string(),
            city: "St Paul".to_string(),
            state: "MN".to_string(),
            zip: "55102".to_string(),
            price: Some(1_250_000.0),
            beds: Some(5.0),
            baths: Some(3.5),
            sqft: Some(4_800.0),
            lot_sqft: Some(12_000.0),
            image_url: Some("https://photos.example.com/455-summit.jpg".to_string()),
            badges: Some(vec![Badge {
                label: "Open House".to_string(),
                tone: Some(BadgeTone::Info),
            }]),
            ai_score: Some(88.0),
            created_at: Some(DateInput::Text("2026-03-14T09:30:00Z".to_string())),
            description: Some("Restored Victorian on the hill.".to_string()),
        }
    }

    #[test]
    fn validate_is_idempotent_on_valid_candidates() {
        let first = validate(candidate()).unwrap();
        let second = validate(PropertyCandidate::from(first.clone())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_empty_id() {
        let mut bad = candidate();
        bad.id = String::new();
        assert_eq!(validate(bad), Err(ValidationError::MissingId));
    }

    #[test]
    fn rejects_empty_address_line() {
        let mut bad = candidate();
        bad.address_line = String::new();
        assert_eq!(validate(bad), Err(ValidationError::EmptyAddressLine));
    }

    #[test]
    fn rejects_ai_score_outside_range() {
        let mut bad = candidate();
        bad.ai_score = Some(100.5);
        assert_eq!(validate(bad), Err(ValidationError::AiScoreOutOfRange(100.5)));
    }

    #[test]
    fn rejects_non_finite_price() {
        let mut bad = candidate();
        bad.price = Some(f64::NAN);
        assert_eq!(
            validate(bad),
            Err(ValidationError::NonFinite { field: "price" })
        );
    }

    #[test]
    fn rejects_malformed_image_url() {
        let mut bad = candidate();
        bad.image_url = Some("not a url".to_string());
        assert!(matches!(
            validate(bad),
            Err(ValidationError::InvalidImageUrl(_))
        ));
    }

    #[test]
    fn coerces_epoch_millis_to_rfc3339() {
        let mut input = candidate();
        input.created_at = Some(DateInput::EpochMillis(1_700_000_000_000));
        let summary = validate(input).unwrap();
        assert_eq!(summary.created_at.as_deref(), Some("2023-11-14T22:13:20Z"));
    }

    #[test]
    fn renormalizes_offset_timestamps_to_utc() {
        let mut input = candidate();
        input.created_at = Some(DateInput::Text("2026-03-14T11:30:00+02:00".to_string()));
        let summary = validate(input).unwrap();
        assert_eq!(summary.created_at.as_deref(), Some("2026-03-14T09:30:00Z"));
    }

    #[test]
    fn passes_through_free_form_date_strings() {
        let mut input = candidate();
        input.created_at = Some(DateInput::Text("last Tuesday".to_string()));
        let summary = validate(input).unwrap();
        assert_eq!(summary.created_at.as_deref(), Some("last Tuesday"));
    }

    #[test]
    fn filter_spec_rejects_inverted_price_range() {
        let filters = FilterSpec {
            min_price: Some(500_000.0),
            max_price: Some(100_000.0),
            ..FilterSpec::default()
        };
        assert_eq!(
            filters.validate(),
            Err(ValidationError::PriceRange {
                min: 500_000.0,
                max: 100_000.0
            })
        );
    }

    #[test]
    fn filter_spec_accepts_equal_bounds_and_open_ranges() {
        let equal = FilterSpec {
            min_price: Some(300_000.0),
            max_price: Some(300_000.0),
            ..FilterSpec::default()
        };
        assert!(equal.validate().is_ok());

        let open = FilterSpec {
            min_price: Some(300_000.0),
            ..FilterSpec::default()
        };
        assert!(open.validate().is_ok());
    }

    #[test]
    fn pagination_rejects_zero_page_size() {
        let pagination = Pagination {
            page: 0,
            page_size: 0,
            total: 0,
        };
        assert_eq!(pagination.validate(), Err(ValidationError::ZeroPageSize));
    }
}
