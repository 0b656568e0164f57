use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::Catalog;

/// Flat CSV row: list columns are joined with `|`.
#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    release_year: Option<i32>,
    popularity: Option<f64>,
    genres: String,
    production_countries: String,
    mapped_production_countries: String,
    cast: String,
    release_date: Option<&'a str>,
    runtime: Option<&'a str>,
    status: Option<&'a str>,
}

/// Write the normalized table as CSV. Returns the number of rows written.
pub fn write_csv<W: Write>(out: W, catalog: &Catalog) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    for r in catalog.records() {
        writer
            .serialize(CsvRow {
                title: &r.title,
                release_year: r.release_year,
                popularity: r.popularity,
                genres: r.genres_list.join("|"),
                production_countries: r.production_countries.join("|"),
                mapped_production_countries: r.mapped_production_countries.join("|"),
                cast: r.cast_list.join("|"),
                release_date: r.release_date.as_deref(),
                runtime: r.runtime.as_deref(),
                status: r.status.as_deref(),
            })
            .with_context(|| format!("writing row for {:?}", r.title))?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(catalog.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::doc;
    use serde_json::json;

    #[test]
    fn writes_header_and_joined_lists() {
        let catalog = Catalog::from_documents(&[doc(json!({
            "title": "Amelie, the movie",
            "release_year": 2001,
            "genres_list": "['Comedy', 'Romance']",
            "production_countries": ["France", "Germany"],
        }))]);
        let mut buf = Vec::new();
        let written = write_csv(&mut buf, &catalog).expect("csv");
        let text = String::from_utf8(buf).expect("utf8");
        let mut lines = text.lines();

        assert_eq!(written, 1);
        assert_eq!(
            lines.next(),
            Some("title,release_year,popularity,genres,production_countries,mapped_production_countries,cast,release_date,runtime,status")
        );
        assert_eq!(
            lines.next(),
            Some("\"Amelie, the movie\",2001,,Comedy|Romance,France|Germany,France|Germany,,,,")
        );
    }
}
