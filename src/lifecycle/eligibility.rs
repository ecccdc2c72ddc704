use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;

use crate::models::accounts;
use crate::models::requests::{self, AssignmentType, Categories, RequestState};

/// Capability snapshot for the calling provider, read from the identity
/// provider's account row at the start of the operation and treated as valid
/// for its duration.
#[derive(Debug, Clone)]
pub struct ProviderCapabilities {
    pub company_name: Option<String>,
    pub company_size: Option<i32>,
    pub rating: Option<f64>,
}

impl ProviderCapabilities {
    pub fn from_account(account: &accounts::Model) -> Self {
        Self {
            company_name: account.company_name.clone(),
            company_size: account.company_size,
            rating: account.rating,
        }
    }
}

/// Optional exact-match filters a provider can pass when listing requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestFilter {
    pub category: Option<Categories>,
    pub subcategory: Option<String>,
    pub assignment_type: Option<AssignmentType>,
}

/// Parse a threshold string ("10", ">=10", "4.5+", "Any") into a numeric
/// floor. Unparseable input means 0, which always passes: the policy favors
/// visibility over stricter exclusion.
pub fn threshold_floor(raw: &str) -> f64 {
    let numeric: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse().unwrap_or(0.0)
}

/// Whether `request` is visible to a provider with capabilities `caps`.
///
/// A request is visible iff it is still open for offers, the provider has no
/// offer on it yet, the provider clears both the size and rating floors, the
/// owning purchaser has not blocked the provider's company, and the caller's
/// optional category/subcategory/assignment-type filters match exactly.
///
/// A provider with no size or rating on file sees nothing: absence of
/// capability data is not "any request qualifies".
pub fn visible(
    request: &requests::Model,
    caps: &ProviderCapabilities,
    owner_blocklist: &[String],
    already_offered: &HashSet<i32>,
    now: DateTime<Utc>,
    filter: &RequestFilter,
) -> bool {
    if request.state != RequestState::Pending || now >= request.offers_deadline {
        return false;
    }
    if already_offered.contains(&request.id) {
        return false;
    }

    let (Some(size), Some(rating)) = (caps.company_size, caps.rating) else {
        return false;
    };
    if (size as f64) < threshold_floor(&request.min_provider_size) {
        return false;
    }
    if rating < threshold_floor(&request.min_provider_rating) {
        return false;
    }

    if let Some(name) = &caps.company_name {
        if owner_blocklist.iter().any(|b| b.eq_ignore_ascii_case(name)) {
            return false;
        }
    }

    if let Some(category) = &filter.category {
        if request.category != *category {
            return false;
        }
    }
    if let Some(subcategory) = &filter.subcategory {
        if request.subcategory.as_deref() != Some(subcategory.as_str()) {
            return false;
        }
    }
    if let Some(assignment_type) = &filter.assignment_type {
        if request.assignment_type != *assignment_type {
            return false;
        }
    }

    true
}
