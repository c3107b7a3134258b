// src/domain/types.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Tabs available in the listing UI. The store starts on `Results`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKey {
    All,
    Favorites,
    Saved,
    Recent,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Default,
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<BadgeTone>,
}

/// The validated listing entity handed to presentation layers.
///
/// Instances only come out of [`crate::domain::schema::validate`] (usually
/// via the adapter), so every invariant holds by construction: `id` and
/// `address_line` are non-empty, numbers are finite, `ai_score` sits in
/// [0, 100], and `image_url` parses as a URL.
///
/// Optional fields serialize only when present, so `badges: None` and
/// `badges: Some(vec![])` stay distinguishable in output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub id: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baths: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<Badge>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One page of results as echoed back by the server round trip.
///
/// `page` and `page_size` are the request parameters, `total` the server's
/// reported count. The store replaces the triple as one unit; `page` is
/// never advanced without a confirming `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "beds")]
    Beds,
    #[serde(rename = "baths")]
    Baths,
    #[serde(rename = "sqft")]
    Sqft,
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "aiScore")]
    AiScore,
}

impl SortField {
    /// Wire name used in the `sortField` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Beds => "beds",
            SortField::Baths => "baths",
            SortField::Sqft => "sqft",
            SortField::CreatedAt => "createdAt",
            SortField::AiScore => "aiScore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Requested ordering, or `None` to leave ordering to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Optional filter criteria. All fields are independent; only `query`,
/// `city`, and `state` are forwarded to the backend as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baths: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl FilterSpec {
    /// Merge `patch` into `self`, keeping existing values where the patch
    /// leaves a field unset. Mirrors the store's merge-not-replace contract.
    pub fn merge(&mut self, patch: FilterSpec) {
        macro_rules! take_if_set {
            ($field:ident) => {
                if patch.$field.is_some() {
                    self.$field = patch.$field;
                }
            };
        }

        take_if_set!(query);
        take_if_set!(min_price);
        take_if_set!(max_price);
        take_if_set!(beds);
        take_if_set!(baths);
        take_if_set!(property_type);
        take_if_set!(city);
        take_if_set!(state);
    }
}

/// Single-item detail view state, independent of the list.
///
/// `open` and `current_item` are set together by the store's `open_drawer`
/// so no observer ever sees an open drawer with a stale item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerState {
    pub open: bool,
    pub current_item: Option<PropertySummary>,
}

impl DrawerState {
    pub fn closed() -> Self {
        Self {
            open: false,
            current_item: None,
        }
    }
}

/// The whole session-scoped view state owned by the store.
///
/// `items` is replaced wholesale on every successful load, never patched
/// incrementally, and `selected_ids` / `items` are swapped as whole
/// containers on mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct TabbedListState {
    pub items: Vec<PropertySummary>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
    pub sort: Option<SortSpec>,
    pub filters: FilterSpec,
    pub selected_ids: HashSet<String>,
    pub active_tab: TabKey,
    pub drawer: DrawerState,
}

impl TabbedListState {
    /// Fixed defaults used at store creation: first page, configured page
    /// size, no filters or sort, `Results` tab, closed drawer.
    pub fn initial(default_page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            pagination: Pagination {
                page: 0,
                page_size: default_page_size,
                total: 0,
            },
            sort: None,
            filters: FilterSpec::default(),
            selected_ids: HashSet::new(),
            active_tab: TabKey::Results,
            drawer: DrawerState::closed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_merge_keeps_unset_fields() {
        let mut filters = FilterSpec {
            query: Some("lakefront".to_string()),
            min_price: Some(250_000.0),
            ..FilterSpec::default()
        };

        filters.merge(FilterSpec {
            min_price: Some(300_000.0),
            city: Some("Duluth".to_string()),
            ..FilterSpec::default()
        });

        assert_eq!(filters.query.as_deref(), Some("lakefront"));
        assert_eq!(filters.min_price, Some(300_000.0));
        assert_eq!(filters.city.as_deref(), Some("Duluth"));
        assert_eq!(filters.max_price, None);
    }

    #[test]
    fn summary_serializes_without_absent_optionals() {
        let summary = PropertySummary {
            id: "p-1".to_string(),
            address_line: "12 Birch Ln".to_string(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            price: Some(415_000.0),
            beds: None,
            baths: None,
            sqft: None,
            lot_sqft: None,
            image_url: None,
            badges: None,
            ai_score: None,
            created_at: None,
            description: None,
        };

        let json = serde_json::to_value(&summary).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("addressLine"));
        assert!(obj.contains_key("price"));
        assert!(!obj.contains_key("badges"));
        assert!(!obj.contains_key("beds"));
    }
}
