//! Popularity chart, title search and movie detail lookup.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;

use crate::model::{Catalog, MovieRecord};

/// Genre selector value that disables genre filtering.
pub const ALL_GENRES: &str = "All";
pub const DEFAULT_TOP_N: usize = 5;

/// One bar of the popularity chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularityBar {
    pub title: String,
    pub popularity: Option<f64>,
}

/// Selector options derived from the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub genres: Vec<String>,
}

/// Inclusive range of release years present in the table.
pub fn year_bounds(catalog: &Catalog) -> Option<(i32, i32)> {
    catalog
        .records()
        .iter()
        .filter_map(|r| r.release_year)
        .minmax()
        .into_option()
}

/// Sorted unique genres, with the `All` sentinel first.
pub fn genre_options(catalog: &Catalog) -> Vec<String> {
    let genres: BTreeSet<&str> = catalog
        .records()
        .iter()
        .flat_map(|r| r.genres_list.iter().map(String::as_str))
        .filter(|g| *g != ALL_GENRES)
        .collect();
    std::iter::once(ALL_GENRES)
        .chain(genres)
        .map(str::to_string)
        .collect()
}

pub fn filter_options(catalog: &Catalog) -> FilterOptions {
    let bounds = year_bounds(catalog);
    FilterOptions {
        min_year: bounds.map(|(lo, _)| lo),
        max_year: bounds.map(|(_, hi)| hi),
        genres: genre_options(catalog),
    }
}

/// Movies released in `year` (and tagged `genre`, unless it is `All` or
/// absent), most popular first. Missing popularity sorts last; ties keep
/// table order.
pub fn top_by_popularity<'a>(
    catalog: &'a Catalog,
    year: i32,
    genre: Option<&str>,
    limit: usize,
) -> Vec<&'a MovieRecord> {
    let genre = genre.filter(|g| !g.is_empty() && *g != ALL_GENRES);
    let mut matches: Vec<&MovieRecord> = catalog
        .records()
        .iter()
        .filter(|r| r.release_year == Some(year))
        .filter(|r| genre.map_or(true, |g| r.genres_list.iter().any(|x| x == g)))
        .collect();
    matches.sort_by(|a, b| popularity_desc(a.popularity, b.popularity));
    matches.truncate(limit);
    matches
}

pub fn bars(records: &[&MovieRecord]) -> Vec<PopularityBar> {
    records
        .iter()
        .map(|r| PopularityBar {
            title: r.title.clone(),
            popularity: r.popularity,
        })
        .collect()
}

fn popularity_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// First record whose title is exactly `title`.
pub fn find_by_title<'a>(catalog: &'a Catalog, title: &str) -> Option<&'a MovieRecord> {
    catalog.records().iter().find(|r| r.title == title)
}

/// Titles containing `query`, case-insensitive, in table order.
pub fn search_titles(catalog: &Catalog, query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    catalog
        .records()
        .iter()
        .filter(|r| r.title.to_lowercase().contains(&needle))
        .map(|r| r.title.clone())
        .collect()
}

/// Score as text, always with a fractional part (`80.0`, `15.25`).
fn fmt_score(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("{p:.1}")
    } else {
        p.to_string()
    }
}

/// Detail panel for one movie, with the display fallbacks filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetail {
    pub title: String,
    pub release_date: String,
    pub popularity: String,
    pub runtime: String,
    pub genres: String,
    pub status: String,
    pub overview: String,
}

impl From<&MovieRecord> for MovieDetail {
    fn from(r: &MovieRecord) -> Self {
        Self {
            title: r.title.clone(),
            release_date: r.release_date.clone().unwrap_or_else(|| "N/A".into()),
            popularity: r.popularity.map_or_else(|| "N/A".into(), fmt_score),
            runtime: r
                .runtime
                .as_deref()
                .map_or_else(|| "N/A".into(), |m| format!("{m} minutes")),
            genres: if r.genres_list.is_empty() {
                "Unknown".into()
            } else {
                r.genres_list.join(", ")
            },
            status: r.status.clone().unwrap_or_else(|| "Unknown".into()),
            overview: r
                .overview
                .clone()
                .unwrap_or_else(|| "No overview available".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{doc, movie};
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::from_documents(&[
            movie("Tenet", 2020, 60.0, &["Action", "Thriller"]),
            movie("Soul", 2020, 80.0, &["Animation"]),
            movie("Mank", 2020, 20.0, &["Drama"]),
            movie("Nomadland", 2020, 40.0, &["Drama"]),
            movie("Minari", 2020, 35.0, &["Drama"]),
            movie("Palm Springs", 2020, 50.0, &["Comedy"]),
            movie("Dune", 2021, 99.0, &["Science Fiction"]),
            doc(json!({
                "title": "No Score",
                "release_year": 2020,
                "genres_list": "Drama",
                "production_countries": "France",
            })),
        ])
    }

    fn titles(records: &[&MovieRecord]) -> Vec<String> {
        records.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn top_five_for_year_ordered_by_popularity() {
        let catalog = catalog();
        let top = top_by_popularity(&catalog, 2020, Some(ALL_GENRES), DEFAULT_TOP_N);
        assert_eq!(
            titles(&top),
            vec!["Soul", "Tenet", "Palm Springs", "Nomadland", "Minari"]
        );
    }

    #[test]
    fn genre_filter_and_missing_popularity_sorts_last() {
        let catalog = catalog();
        let top = top_by_popularity(&catalog, 2020, Some("Drama"), 10);
        assert_eq!(titles(&top), vec!["Nomadland", "Minari", "Mank", "No Score"]);
    }

    #[test]
    fn no_match_yields_empty_result() {
        let catalog = catalog();
        assert!(top_by_popularity(&catalog, 1950, None, 5).is_empty());
        assert!(top_by_popularity(&catalog, 2021, Some("Drama"), 5).is_empty());
    }

    #[test]
    fn options_come_from_data() {
        let catalog = catalog();
        assert_eq!(year_bounds(&catalog), Some((2020, 2021)));
        let genres = genre_options(&catalog);
        assert_eq!(genres[0], ALL_GENRES);
        assert_eq!(
            &genres[1..],
            &["Action", "Animation", "Comedy", "Drama", "Science Fiction", "Thriller"]
        );
        assert_eq!(year_bounds(&Catalog::default()), None);
    }

    #[test]
    fn title_search_is_case_insensitive_substring() {
        let catalog = catalog();
        assert_eq!(search_titles(&catalog, "IN"), vec!["Minari", "Palm Springs"]);
        assert!(search_titles(&catalog, "  ").is_empty());
        assert!(search_titles(&catalog, "zzz").is_empty());
    }

    #[test]
    fn detail_uses_display_fallbacks() {
        let catalog = catalog();
        let record = find_by_title(&catalog, "No Score").expect("present");
        let detail = MovieDetail::from(record);
        assert_eq!(detail.popularity, "N/A");
        assert_eq!(detail.runtime, "N/A");
        assert_eq!(detail.genres, "Drama");
        assert_eq!(detail.status, "Unknown");
        assert_eq!(detail.overview, "No overview available");
        assert!(find_by_title(&catalog, "no score").is_none());
    }

    #[test]
    fn detail_popularity_keeps_fractional_part() {
        let catalog = catalog();
        let soul = MovieDetail::from(find_by_title(&catalog, "Soul").expect("present"));
        assert_eq!(soul.popularity, "80.0");

        let mut record = find_by_title(&catalog, "Soul").expect("present").clone();
        record.popularity = Some(15.25);
        assert_eq!(MovieDetail::from(&record).popularity, "15.25");
    }

    #[test]
    fn data_genre_named_all_is_not_listed_twice() {
        let catalog = Catalog::from_documents(&[
            movie("Odd", 2020, 1.0, &["All", "Drama"]),
            movie("Even", 2020, 2.0, &["Drama"]),
        ]);
        assert_eq!(genre_options(&catalog), vec!["All", "Drama"]);
    }
}
