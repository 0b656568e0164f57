use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::normalization::{
    coerce_f64, coerce_year, display_text, normalize_list, reconcile_all,
};

/// One raw document as returned by a store: field name -> value.
pub type Document = Map<String, Value>;

/// Legacy key some exports use for the cast list.
const LEGACY_CAST_KEY: &str = "Cast_list";

/// A normalized movie row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub release_year: Option<i32>,
    pub popularity: Option<f64>,
    pub genres_list: Vec<String>,
    pub production_countries: Vec<String>,
    pub mapped_production_countries: Vec<String>,
    pub cast_list: Vec<String>,
    pub release_date: Option<String>,
    pub runtime: Option<String>,
    pub status: Option<String>,
    pub overview: Option<String>,
}

impl MovieRecord {
    /// Normalize a raw document. Field-level problems degrade to empty lists or
    /// missing values; this never fails.
    pub fn from_document(doc: &Document) -> Self {
        let production_countries: Vec<String> = normalize_list(doc.get("production_countries"))
            .into_iter()
            .map(|c| c.trim().to_string())
            .collect();
        let mapped_production_countries = reconcile_all(&production_countries);

        let cast_list = match doc.get("cast_list") {
            Some(v) if !v.is_null() => normalize_list(Some(v)),
            _ => normalize_list(doc.get(LEGACY_CAST_KEY)),
        };

        Self {
            title: display_text(doc.get("title")).unwrap_or_default(),
            release_year: coerce_year(doc.get("release_year")),
            popularity: coerce_f64(doc.get("popularity")),
            genres_list: normalize_list(doc.get("genres_list")),
            production_countries,
            mapped_production_countries,
            cast_list,
            release_date: display_text(doc.get("release_date")),
            runtime: display_text(doc.get("runtime")),
            status: display_text(doc.get("status")),
            overview: display_text(doc.get("overview")),
        }
    }

    /// Rows without any canonical production country are dropped from every view.
    pub fn is_complete(&self) -> bool {
        !self.mapped_production_countries.is_empty()
    }
}

/// The normalized, completeness-filtered table for one render cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    records: Vec<MovieRecord>,
    fetched: usize,
}

impl Catalog {
    pub fn from_documents(docs: &[Document]) -> Self {
        let fetched = docs.len();
        let records: Vec<MovieRecord> = docs
            .iter()
            .map(MovieRecord::from_document)
            .filter(|record| {
                let keep = record.is_complete();
                if !keep {
                    debug!(title = %record.title, "dropping movie without production countries");
                }
                keep
            })
            .collect();
        info!(fetched, retained = records.len(), "catalog normalized");
        Self { records, fetched }
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Number of documents before the completeness filter.
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
