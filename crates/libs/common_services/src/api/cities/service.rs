use crate::api::cities::error::CitiesError;
use crate::database::stores::PlaceSubmissionStore;
use common_types::CitiesResponse;
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Distinct cities of all approved submissions, sorted case-insensitively.
#[instrument(skip(pool))]
pub async fn list_cities(pool: &PgPool) -> Result<CitiesResponse, CitiesError> {
    let values = PlaceSubmissionStore::list_city_values(pool).await?;
    let cities = normalize_cities(values);
    debug!("Listing {} distinct cities", cities.len());
    Ok(CitiesResponse { cities })
}

/// Trims, drops blanks, dedupes exact values, sorts by lowercase then original.
#[must_use]
pub fn normalize_cities(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut cities: Vec<String> = values
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .filter(|c| seen.insert(c.clone()))
        .collect();
    cities.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    cities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn dedupes_and_sorts() {
        let cities = normalize_cities(strings(&["Seoul", "Paris", "Seoul", "Berlin"]));
        assert_eq!(cities, strings(&["Berlin", "Paris", "Seoul"]));
    }

    #[test]
    fn trims_and_drops_blank() {
        let cities = normalize_cities(strings(&["  Lisbon ", "", "   ", "Lisbon"]));
        assert_eq!(cities, strings(&["Lisbon"]));
    }

    #[test]
    fn sort_ignores_case() {
        let cities = normalize_cities(strings(&["amsterdam", "Berlin", "Zürich", "cairo"]));
        assert_eq!(cities, strings(&["amsterdam", "Berlin", "cairo", "Zürich"]));
    }

    #[test]
    fn empty_input() {
        assert!(normalize_cities(Vec::new()).is_empty());
    }
}
