//! Filter and sort over an in-memory provider list.
//!
//! The output of `filter_providers` is always a subset of its input in the
//! original order; `sort_providers` is stable, so `Relevance` and ties keep
//! whatever order the upstream directory returned.

use crate::domains::providers::models::{Provider, SearchCriteria, SortKey};

/// Keep only providers matching every non-empty criterion (case-insensitive)
pub fn filter_providers(providers: &[Provider], criteria: &SearchCriteria) -> Vec<Provider> {
    let location = lowered(criteria.location.as_deref());
    let specialty = lowered(criteria.specialty.as_deref());
    let insurance = criteria
        .insurance
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    providers
        .iter()
        .filter(|p| {
            location
                .as_deref()
                .map_or(true, |loc| p.location.to_lowercase().contains(loc))
        })
        .filter(|p| {
            specialty
                .as_deref()
                .map_or(true, |spec| p.specialty.to_lowercase().contains(spec))
        })
        .filter(|p| insurance.map_or(true, |plan| p.accepts_insurance(plan)))
        .cloned()
        .collect()
}

/// Sort in place by the requested key
pub fn sort_providers(providers: &mut [Provider], sort_by: SortKey) {
    match sort_by {
        SortKey::Rating => providers.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::PriceLow => providers.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => providers.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Relevance => {}
    }
}

/// Filter, then sort
pub fn apply(providers: &[Provider], criteria: &SearchCriteria) -> Vec<Provider> {
    let mut results = filter_providers(providers, criteria);
    sort_providers(&mut results, criteria.sort_by);
    results
}

/// Case-insensitive substring filter over location names; blank query returns all
pub fn filter_locations(locations: &[&str], query: Option<&str>) -> Vec<String> {
    match lowered(query) {
        Some(q) => locations
            .iter()
            .filter(|city| city.to_lowercase().contains(&q))
            .map(|city| city.to_string())
            .collect(),
        None => locations.iter().map(|city| city.to_string()).collect(),
    }
}

fn lowered(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}
