use devices::Address;

pub const LOCATION_NOT_FOUND: &str = "Location not found";

/// Joins the present address components with ", ". Blank components count as
/// absent. Returns `None` when nothing is present.
pub fn format_address(address: &Address) -> Option<String> {
    let parts: Vec<&str> = address
        .components()
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Human-readable location for the first geocode result.
pub fn describe_location(results: &[Address]) -> String {
    results
        .first()
        .and_then(format_address)
        .unwrap_or_else(|| LOCATION_NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(parts: [Option<&str>; 6]) -> Address {
        let [name, street, postal_code, city, region, country] = parts.map(|p| p.map(String::from));
        Address {
            name,
            street,
            postal_code,
            city,
            region,
            country,
        }
    }

    #[test]
    fn city_and_country_only() {
        let result = describe_location(&[address([
            None,
            None,
            None,
            Some("Springfield"),
            None,
            Some("USA"),
        ])]);
        assert_eq!(result, "Springfield, USA");
    }

    #[test]
    fn all_components_in_order() {
        let result = format_address(&address([
            Some("City Hall"),
            Some("Main St"),
            Some("62701"),
            Some("Springfield"),
            Some("IL"),
            Some("USA"),
        ]));
        assert_eq!(
            result.as_deref(),
            Some("City Hall, Main St, 62701, Springfield, IL, USA")
        );
    }

    #[test]
    fn no_trailing_separator_without_country() {
        let result = format_address(&address([
            Some("Depot"),
            Some("Elm St"),
            None,
            None,
            None,
            None,
        ]));
        assert_eq!(result.as_deref(), Some("Depot, Elm St"));
    }

    #[test]
    fn every_subset_joins_present_parts() {
        let values = ["n", "s", "p", "c", "r", "k"];
        for mask in 0u8..64 {
            let mut parts = [None; 6];
            for (index, value) in values.iter().enumerate() {
                if mask & (1 << index) != 0 {
                    parts[index] = Some(*value);
                }
            }
            let expected: Vec<&str> = parts.iter().flatten().copied().collect();
            let result = describe_location(&[address(parts)]);
            if expected.is_empty() {
                assert_eq!(result, LOCATION_NOT_FOUND);
            } else {
                assert_eq!(result, expected.join(", "));
                assert!(!result.ends_with(", "));
            }
        }
    }

    #[test]
    fn empty_geocode_result_is_not_found() {
        assert_eq!(describe_location(&[]), LOCATION_NOT_FOUND);
        assert_eq!(
            describe_location(&[address([Some("  "), None, None, None, None, None])]),
            LOCATION_NOT_FOUND
        );
    }
}
