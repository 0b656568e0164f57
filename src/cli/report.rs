//! Plain-text renderings of the views for the `md` CLI.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::model::Catalog;
use crate::normalization::country;
use crate::views::geography::{
    country_counts, explode_countries, movies_from_country, yearly_release_counts,
};
use crate::views::popularity::{
    filter_options, find_by_title, search_titles, top_by_popularity, year_bounds, MovieDetail,
    ALL_GENRES,
};
use crate::views::actors;

/// Output flavour shared by every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

fn emit_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn fmt_popularity(p: Option<f64>) -> String {
    p.map_or_else(|| "N/A".into(), |p| format!("{p:.2}"))
}

fn fmt_year(y: Option<i32>) -> String {
    y.map_or_else(|| "N/A".into(), |y| y.to_string())
}

#[derive(Serialize)]
struct Stats {
    fetched: usize,
    retained: usize,
    dropped_without_country: usize,
    min_year: Option<i32>,
    max_year: Option<i32>,
    genres: usize,
    countries: usize,
}

pub fn stats<W: Write>(out: &mut W, catalog: &Catalog, format: Format) -> Result<()> {
    let options = filter_options(catalog);
    let rows = explode_countries(catalog);
    let stats = Stats {
        fetched: catalog.fetched(),
        retained: catalog.len(),
        dropped_without_country: catalog.fetched() - catalog.len(),
        min_year: options.min_year,
        max_year: options.max_year,
        genres: options.genres.len().saturating_sub(1),
        countries: country_counts(&rows).len(),
    };
    match format {
        Format::Json => emit_json(out, &stats),
        Format::Text => {
            writeln!(out, "fetched:   {}", stats.fetched)?;
            writeln!(out, "retained:  {}", stats.retained)?;
            writeln!(out, "dropped:   {} (no production country)", stats.dropped_without_country)?;
            writeln!(out, "years:     {} - {}", fmt_year(stats.min_year), fmt_year(stats.max_year))?;
            writeln!(out, "genres:    {}", stats.genres)?;
            writeln!(out, "countries: {}", stats.countries)?;
            Ok(())
        }
    }
}

pub fn top<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    year: Option<i32>,
    genre: &str,
    limit: usize,
    format: Format,
) -> Result<()> {
    let Some(year) = year.or_else(|| year_bounds(catalog).map(|(_, hi)| hi)) else {
        writeln!(out, "No release years available.")?;
        return Ok(());
    };
    let top = top_by_popularity(catalog, year, Some(genre), limit);
    if format == Format::Json {
        return emit_json(out, &top);
    }
    if top.is_empty() {
        writeln!(out, "No movies found for the selected year and genre.")?;
        return Ok(());
    }
    writeln!(out, "Top {} Movies in {year} (Genre: {genre})", top.len())?;
    for (rank, movie) in top.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {:<40} {}",
            rank + 1,
            movie.title,
            fmt_popularity(movie.popularity)
        )?;
    }
    Ok(())
}

pub fn genres<W: Write>(out: &mut W, catalog: &Catalog) -> Result<()> {
    let options = filter_options(catalog);
    for genre in options.genres.iter().filter(|g| g.as_str() != ALL_GENRES) {
        writeln!(out, "{genre}")?;
    }
    Ok(())
}

pub fn movie<W: Write>(out: &mut W, catalog: &Catalog, title: &str, format: Format) -> Result<()> {
    let Some(record) = find_by_title(catalog, title) else {
        writeln!(out, "No movie titled {title:?}.")?;
        return Ok(());
    };
    let detail = MovieDetail::from(record);
    if format == Format::Json {
        return emit_json(out, &detail);
    }
    writeln!(out, "{}", detail.title)?;
    writeln!(out, "Release Date: {}", detail.release_date)?;
    writeln!(out, "Popularity:   {}", detail.popularity)?;
    writeln!(out, "Runtime:      {}", detail.runtime)?;
    writeln!(out, "Genres:       {}", detail.genres)?;
    writeln!(out, "Status:       {}", detail.status)?;
    writeln!(out, "---")?;
    writeln!(out, "{}", detail.overview)?;
    Ok(())
}

pub fn search<W: Write>(out: &mut W, catalog: &Catalog, query: &str) -> Result<()> {
    let titles = search_titles(catalog, query);
    if titles.is_empty() {
        writeln!(out, "No matches found.")?;
    }
    for title in titles {
        writeln!(out, "{title}")?;
    }
    Ok(())
}

pub fn countries<W: Write>(out: &mut W, catalog: &Catalog, format: Format) -> Result<()> {
    let counts = country_counts(&explode_countries(catalog));
    if format == Format::Json {
        return emit_json(out, &counts);
    }
    if counts.is_empty() {
        writeln!(out, "No production country data available.")?;
        return Ok(());
    }
    for c in counts {
        writeln!(out, "{:<40} {:>6} {:>7.2}%", c.country, c.count, c.percentage)?;
    }
    Ok(())
}

pub fn country_movies<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    country: &str,
    limit: usize,
) -> Result<()> {
    let rows = explode_countries(catalog);
    let movies = movies_from_country(&rows, country, limit, &mut rand::thread_rng());
    if movies.is_empty() {
        writeln!(out, "No movies found for {country}.")?;
        return Ok(());
    }
    writeln!(out, "Movies from {country}:")?;
    for m in movies {
        writeln!(
            out,
            "- {} (Year: {}, Popularity: {})",
            m.title,
            fmt_year(m.release_year),
            fmt_popularity(m.popularity)
        )?;
    }
    Ok(())
}

pub fn years<W: Write>(out: &mut W, catalog: &Catalog, format: Format) -> Result<()> {
    let years = yearly_release_counts(catalog);
    if format == Format::Json {
        return emit_json(out, &years);
    }
    for y in years {
        writeln!(out, "{} {}", y.release_year, y.count)?;
    }
    Ok(())
}

pub fn actor<W: Write>(out: &mut W, catalog: &Catalog, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        writeln!(out, "Enter an actor's name to find their movies.")?;
        return Ok(());
    }
    let movies = actors::movies_with_actor(catalog, name);
    if movies.is_empty() {
        writeln!(out, "No movies found featuring {name}.")?;
        return Ok(());
    }
    writeln!(out, "Movies featuring {name}:")?;
    for m in movies {
        writeln!(
            out,
            "- {} (Year: {}, Popularity: {})",
            m.title,
            fmt_year(m.release_year),
            fmt_popularity(m.popularity)
        )?;
    }
    Ok(())
}

/// Show how raw names reconcile; does not touch any store.
pub fn reconcile<W: Write>(out: &mut W, names: &[String]) -> Result<()> {
    for name in names {
        let canonical = country::reconcile(name);
        let note = if country::is_known(name) { "" } else { "  (passthrough)" };
        writeln!(out, "{} -> {canonical}{note}", name.trim())?;
    }
    Ok(())
}
