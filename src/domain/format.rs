// src/domain/format.rs

use crate::domain::types::PropertySummary;

/// One-line display address: street, then the non-empty city/state/zip
/// parts. `"455 Summit Ave — St Paul, MN, 55102"`.
pub fn format_address(property: &PropertySummary) -> String {
    let city_state_zip = [
        property.city.as_str(),
        property.state.as_str(),
        property.zip.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(", ");

    [property.address_line.as_str(), city_state_zip.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" — ")
}

/// Whole-dollar display price with thousands separators, or a placeholder
/// dash when the listing has no price.
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|n| n.is_finite()) else {
        return "—".to_string();
    };

    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::adapter::to_property_summary;
    use serde_json::json;

    fn summary(raw: serde_json::Value) -> PropertySummary {
        to_property_summary(&raw).unwrap()
    }

    #[test]
    fn address_joins_only_populated_parts() {
        let full = summary(json!({
            "id": "f1",
            "addressLine": "455 Summit Ave",
            "city": "St Paul",
            "state": "MN",
            "zip": "55102"
        }));
        assert_eq!(format_address(&full), "455 Summit Ave — St Paul, MN, 55102");

        let sparse = summary(json!({ "id": "f2", "addressLine": "PO Box 9" }));
        assert_eq!(format_address(&sparse), "PO Box 9");
    }

    #[test]
    fn currency_groups_thousands_and_handles_missing() {
        assert_eq!(format_currency(Some(500_000.0)), "$500,000");
        assert_eq!(format_currency(Some(1_250_000.4)), "$1,250,000");
        assert_eq!(format_currency(Some(900.0)), "$900");
        assert_eq!(format_currency(None), "—");
    }
}
