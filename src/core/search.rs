//! Suggestion filtering for the city picker.

use crate::api::City;

/// Cities whose name contains `term`, ignoring case, in their original order.
///
/// An empty term suggests nothing: the list only opens once the user types.
pub fn suggestions<'a>(cities: &'a [City], term: &str) -> Vec<&'a City> {
    if term.is_empty() {
        return Vec::new();
    }

    let needle = term.to_lowercase();
    cities
        .iter()
        .filter(|city| city.name.to_lowercase().contains(&needle))
        .collect()
}
