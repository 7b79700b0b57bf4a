//! Match a reverse-geocoded address against the district/DS catalog.
//!
//! OpenStreetMap reports administrative areas under varying keys and often
//! with a " District" suffix, so matching is case-insensitive and tolerant
//! of both.

use super::catalog;
use super::providers::AddressBreakdown;
use serde::Serialize;

/// Outcome of matching a detected address against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "match", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Reconciled {
    /// Both the district and the DS were recognised.
    Full {
        district: &'static str,
        divisional_secretariat: &'static str,
    },
    /// District recognised; the DS must be picked manually.
    DistrictOnly {
        district: &'static str,
        detected_divisional_secretariat: Option<String>,
    },
    /// Nothing recognised; the user selects both manually.
    Unmatched {
        detected_district: Option<String>,
        detected_divisional_secretariat: Option<String>,
    },
}

impl Reconciled {
    pub fn district(&self) -> Option<&'static str> {
        match self {
            Self::Full { district, .. } | Self::DistrictOnly { district, .. } => Some(*district),
            Self::Unmatched { .. } => None,
        }
    }

    pub fn divisional_secretariat(&self) -> Option<&'static str> {
        match self {
            Self::Full { divisional_secretariat, .. } => Some(*divisional_secretariat),
            _ => None,
        }
    }
}

fn first_present<'a>(fields: &[&'a Option<String>]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| f.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn strip_district_suffix(name: &str) -> &str {
    const SUFFIX: &str = " district";
    let trimmed = name.trim();
    if trimmed.len() >= SUFFIX.len() && trimmed.is_char_boundary(trimmed.len() - SUFFIX.len()) {
        let (head, tail) = trimmed.split_at(trimmed.len() - SUFFIX.len());
        if tail.eq_ignore_ascii_case(SUFFIX) {
            return head.trim_end();
        }
    }
    trimmed
}

/// District text detected in an address: `county`, then `state_district`,
/// then `district`, with any " District" suffix removed.
pub fn detected_district(addr: &AddressBreakdown) -> Option<String> {
    first_present(&[&addr.county, &addr.state_district, &addr.district])
        .map(strip_district_suffix)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// DS text detected in an address: `suburb`, `village`, `town`, `hamlet`.
pub fn detected_division(addr: &AddressBreakdown) -> Option<String> {
    first_present(&[&addr.suburb, &addr.village, &addr.town, &addr.hamlet]).map(str::to_string)
}

/// Catalog district whose name equals `text` ignoring ASCII case.
pub fn match_district(text: &str) -> Option<&'static str> {
    let text = strip_district_suffix(text);
    catalog::districts().find(|d| d.eq_ignore_ascii_case(text))
}

/// DS of `district` whose name equals `text` ignoring ASCII case.
pub fn match_division(district: &str, text: &str) -> Option<&'static str> {
    let text = text.trim();
    catalog::divisions_of(district)
        .iter()
        .copied()
        .find(|ds| ds.eq_ignore_ascii_case(text))
}

/// Reconcile an address breakdown with the catalog.
pub fn reconcile_address(addr: &AddressBreakdown) -> Reconciled {
    let detected_district = detected_district(addr);
    let detected_ds = detected_division(addr);

    let Some(district) = detected_district.as_deref().and_then(match_district) else {
        return Reconciled::Unmatched {
            detected_district,
            detected_divisional_secretariat: detected_ds,
        };
    };

    match detected_ds.as_deref().and_then(|ds| match_division(district, ds)) {
        Some(ds) => Reconciled::Full {
            district,
            divisional_secretariat: ds,
        },
        None => Reconciled::DistrictOnly {
            district,
            detected_divisional_secretariat: detected_ds,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(county: Option<&str>, town: Option<&str>) -> AddressBreakdown {
        AddressBreakdown {
            county: county.map(String::from),
            town: town.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_district_suffix("Galle District"), "Galle");
        assert_eq!(strip_district_suffix("galle district "), "galle");
        assert_eq!(strip_district_suffix("Galle"), "Galle");
        assert_eq!(strip_district_suffix("District"), "District");
    }

    #[test]
    fn test_full_match() {
        let r = reconcile_address(&addr(Some("Galle District"), Some("hikkaduwa")));
        assert_eq!(
            r,
            Reconciled::Full {
                district: "Galle",
                divisional_secretariat: "Hikkaduwa",
            }
        );
        assert_eq!(r.district(), Some("Galle"));
        assert_eq!(r.divisional_secretariat(), Some("Hikkaduwa"));
    }

    #[test]
    fn test_district_only() {
        let r = reconcile_address(&addr(Some("KANDY"), Some("Peradeniya Junction")));
        assert_eq!(
            r,
            Reconciled::DistrictOnly {
                district: "Kandy",
                detected_divisional_secretariat: Some("Peradeniya Junction".into()),
            }
        );
        assert_eq!(r.divisional_secretariat(), None);
    }

    #[test]
    fn test_ds_must_belong_to_matched_district() {
        // Hikkaduwa exists, but not in Kandy.
        let r = reconcile_address(&addr(Some("Kandy"), Some("Hikkaduwa")));
        assert!(matches!(r, Reconciled::DistrictOnly { district: "Kandy", .. }));
    }

    #[test]
    fn test_unmatched_keeps_detected_text() {
        let r = reconcile_address(&addr(Some("Western Province"), None));
        assert_eq!(
            r,
            Reconciled::Unmatched {
                detected_district: Some("Western Province".into()),
                detected_divisional_secretariat: None,
            }
        );
        assert_eq!(r.district(), None);
    }

    #[test]
    fn test_field_precedence() {
        let a = AddressBreakdown {
            county: Some("".into()),
            state_district: Some("Matara District".into()),
            district: Some("Galle".into()),
            suburb: None,
            village: Some("Akuressa".into()),
            town: Some("Matara".into()),
            ..Default::default()
        };
        assert_eq!(detected_district(&a).as_deref(), Some("Matara"));
        assert_eq!(detected_division(&a).as_deref(), Some("Akuressa"));
    }

    #[test]
    fn test_empty_address() {
        let r = reconcile_address(&AddressBreakdown::default());
        assert_eq!(
            r,
            Reconciled::Unmatched {
                detected_district: None,
                detected_divisional_secretariat: None,
            }
        );
    }
}
