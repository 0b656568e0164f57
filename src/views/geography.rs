//! Production-country overview: map/pie counts, per-country movies and the
//! yearly release line.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::model::Catalog;

/// One (movie, country) pair after exploding the mapped country lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRow {
    pub country: String,
    pub title: String,
    pub release_year: Option<i32>,
    pub popularity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub release_year: i32,
    pub count: usize,
}

/// One row per movie per country. Mapped names are split again on commas,
/// trimmed, and empty pieces dropped.
pub fn explode_countries(catalog: &Catalog) -> Vec<CountryRow> {
    catalog
        .records()
        .iter()
        .flat_map(|record| {
            record
                .mapped_production_countries
                .iter()
                .flat_map(|name| name.split(','))
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(move |country| CountryRow {
                    country: country.to_string(),
                    title: record.title.clone(),
                    release_year: record.release_year,
                    popularity: record.popularity,
                })
        })
        .collect()
}

/// Frequency and share per country, most frequent first. Ties keep the order
/// in which the countries first appear.
pub fn country_counts(rows: &[CountryRow]) -> Vec<CountryCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for row in rows {
        *counts.entry(row.country.as_str()).or_insert(0) += 1;
    }
    counts.sort_by(|_, a, _, b| b.cmp(a));

    let total = rows.len();
    counts
        .into_iter()
        .map(|(country, count)| CountryCount {
            country: country.to_string(),
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect()
}

/// Countries in order of first appearance, for the country selector.
pub fn country_options(rows: &[CountryRow]) -> Vec<String> {
    rows.iter()
        .map(|r| r.country.as_str())
        .unique()
        .map(str::to_string)
        .collect()
}

/// Movies produced in `country`, randomly sampled down to `limit` when there
/// are more.
pub fn movies_from_country<R: Rng + ?Sized>(
    rows: &[CountryRow],
    country: &str,
    limit: usize,
    rng: &mut R,
) -> Vec<CountryRow> {
    let matching: Vec<&CountryRow> = rows.iter().filter(|r| r.country == country).collect();
    if matching.len() <= limit {
        return matching.into_iter().cloned().collect();
    }
    matching
        .choose_multiple(rng, limit)
        .map(|row| (*row).clone())
        .collect()
}

/// Number of movies per release year, ascending. Rows without a year are skipped.
pub fn yearly_release_counts(catalog: &Catalog) -> Vec<YearCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for year in catalog.records().iter().filter_map(|r| r.release_year) {
        *by_year.entry(year).or_insert(0) += 1;
    }
    by_year
        .into_iter()
        .map(|(release_year, count)| YearCount {
            release_year,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::doc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::from_documents(&[
            doc(json!({"title": "Oldboy", "release_year": 2003, "popularity": 20.0,
                "production_countries": "['South Korea']"})),
            doc(json!({"title": "Amelie", "release_year": 2001, "popularity": 30.0,
                "production_countries": ["France", "Germany"]})),
            doc(json!({"title": "Heat", "release_year": 1995, "popularity": 25.0,
                "production_countries": "United States of America"})),
            doc(json!({"title": "Ronin", "release_year": 1998,
                "production_countries": "['France', 'United States of America']"})),
            doc(json!({"title": "Undated", "production_countries": "France"})),
        ])
    }

    #[test]
    fn explodes_and_splits_comma_bearing_names() {
        let rows = explode_countries(&catalog());
        let countries: Vec<&str> = rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(
            countries,
            vec![
                "Korea",
                "Republic of",
                "France",
                "Germany",
                "United States",
                "France",
                "United States",
                "France"
            ]
        );
        assert_eq!(rows[0].title, "Oldboy");
    }

    #[test]
    fn blank_country_entries_produce_no_rows() {
        let catalog = Catalog::from_documents(&[doc(json!({
            "title": "Blank Slate",
            "production_countries": "   ",
        }))]);
        assert_eq!(catalog.len(), 1);
        assert!(explode_countries(&catalog).is_empty());
    }

    #[test]
    fn counts_sorted_with_percentages() {
        let rows = explode_countries(&catalog());
        let counts = country_counts(&rows);
        assert_eq!(counts[0].country, "France");
        assert_eq!(counts[0].count, 3);
        assert_eq!(counts[1].country, "United States");
        assert_eq!(counts[1].count, 2);
        // ties keep first appearance
        assert_eq!(counts[2].country, "Korea");
        let total: f64 = counts.iter().map(|c| c.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!((counts[0].percentage - 37.5).abs() < 1e-9);
        assert!(country_counts(&[]).is_empty());
    }

    #[test]
    fn options_in_first_appearance_order() {
        let rows = explode_countries(&catalog());
        assert_eq!(
            country_options(&rows),
            vec!["Korea", "Republic of", "France", "Germany", "United States"]
        );
    }

    #[test]
    fn samples_at_most_limit_movies() {
        let rows = explode_countries(&catalog());
        let mut rng = StdRng::seed_from_u64(7);

        let france = movies_from_country(&rows, "France", 2, &mut rng);
        assert_eq!(france.len(), 2);
        assert!(france.iter().all(|r| r.country == "France"));

        let all = movies_from_country(&rows, "France", 5, &mut rng);
        let titles: Vec<&str> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Amelie", "Ronin", "Undated"]);

        assert!(movies_from_country(&rows, "Peru", 5, &mut rng).is_empty());
    }

    #[test]
    fn yearly_counts_skip_missing_years() {
        let years = yearly_release_counts(&catalog());
        let pairs: Vec<(i32, usize)> = years.iter().map(|y| (y.release_year, y.count)).collect();
        assert_eq!(pairs, vec![(1995, 1), (1998, 1), (2001, 1), (2003, 1)]);
    }
}
