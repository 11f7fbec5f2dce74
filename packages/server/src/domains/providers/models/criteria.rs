use serde::{Deserialize, Serialize};

/// Requested result ordering
///
/// Only `Rating`, `PriceLow` and `PriceHigh` impose an order. Anything else the
/// caller sends parses to `Relevance`, which keeps upstream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Relevance,
    Rating,
    PriceLow,
    PriceHigh,
}

impl SortKey {
    /// Lenient parse: unknown or blank keys are a no-op sort
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("rating") => SortKey::Rating,
            Some("price_low") => SortKey::PriceLow,
            Some("price_high") => SortKey::PriceHigh,
            _ => SortKey::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::Rating => "rating",
            SortKey::PriceLow => "price_low",
            SortKey::PriceHigh => "price_high",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search criteria shared by the mock API, the search pipeline and every
/// directory backend. Absent or blank fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub location: Option<String>,
    pub specialty: Option<String>,
    pub insurance: Option<String>,
    pub sort_by: SortKey,
}

impl SearchCriteria {
    /// Build criteria from raw query-string values, dropping blanks
    pub fn from_query(
        location: Option<String>,
        specialty: Option<String>,
        insurance: Option<String>,
        sort_by: Option<String>,
    ) -> Self {
        Self {
            location: non_blank(location),
            specialty: non_blank(specialty),
            insurance: non_blank(insurance),
            sort_by: SortKey::parse(sort_by.as_deref()),
        }
    }
}

/// Trim a value and drop it if nothing remains
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse(Some("rating")), SortKey::Rating);
        assert_eq!(SortKey::parse(Some("PRICE_LOW")), SortKey::PriceLow);
        assert_eq!(SortKey::parse(Some(" price_high ")), SortKey::PriceHigh);
        assert_eq!(SortKey::parse(Some("distance")), SortKey::Relevance);
        assert_eq!(SortKey::parse(None), SortKey::Relevance);
    }

    #[test]
    fn test_from_query_drops_blank_fields() {
        let criteria = SearchCriteria::from_query(
            Some("  Detroit ".into()),
            Some("   ".into()),
            None,
            Some("rating".into()),
        );
        assert_eq!(criteria.location.as_deref(), Some("Detroit"));
        assert_eq!(criteria.specialty, None);
        assert_eq!(criteria.insurance, None);
        assert_eq!(criteria.sort_by, SortKey::Rating);
    }
}
