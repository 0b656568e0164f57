use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use movie_dash::cli::{export, report, Format};
use movie_dash::database_ops::db::Db;
use movie_dash::database_ops::movies::{store_from_env, DEFAULT_COLLECTION};
use movie_dash::database_ops::{MovieStore, NdjsonMovieStore, PgMovieStore};
use movie_dash::logging::{init_tracing, LogSink};
use movie_dash::util::env;
use movie_dash::views::popularity::{ALL_GENRES, DEFAULT_TOP_N};
use movie_dash::{Catalog, CatalogService};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "md", version, about = "Movie dashboard admin CLI")]
struct Cli {
    /// Read documents from an NDJSON / JSON-array export instead of Postgres
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    /// Optional override for the database URL
    #[arg(long, global = true)]
    db_url: Option<String>,
    /// Table holding one JSONB document per movie
    #[arg(long, global = true)]
    collection: Option<String>,
    /// Output format for reports that support it
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Text => Format::Text,
            OutputFormat::Json => Format::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Fetched/retained counts and data ranges
    Stats,
    /// Top movies by popularity for a year
    Top {
        /// Release year (defaults to the latest year present)
        #[arg(long)]
        year: Option<i32>,
        /// Genre filter; "All" disables it
        #[arg(long, default_value = ALL_GENRES)]
        genre: String,
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        limit: usize,
    },
    /// List every genre present in the data
    Genres,
    /// Detail for one movie (exact title)
    Movie { title: String },
    /// Titles containing the query, case-insensitive
    Search { query: String },
    /// Production country counts and shares
    Countries,
    /// Random sample of movies produced in a country
    CountryMovies {
        country: String,
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        limit: usize,
    },
    /// Movies released per year
    Years,
    /// Movies featuring an actor (exact name, case-insensitive)
    Actor { name: String },
    /// Show how raw country names reconcile (no store access)
    Reconcile {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Write the normalized table as CSV
    Export {
        /// Destination file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

async fn open_store(cli: &Cli) -> Result<Box<dyn MovieStore>> {
    if let Some(path) = &cli.file {
        return Ok(Box::new(NdjsonMovieStore::new(path.clone())));
    }
    if cli.db_url.is_none() && cli.collection.is_none() {
        return store_from_env().await;
    }
    let url = match &cli.db_url {
        Some(url) => url.clone(),
        None => env::db_url()?,
    };
    let collection = cli
        .collection
        .clone()
        .or_else(|| env::env_opt("MOVIES_COLLECTION"))
        .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
    let db = Db::connect(&url, env::env_parse("DB_MAX_CONNS", 5u32)).await?;
    Ok(Box::new(PgMovieStore::new(db, &collection)?))
}

async fn load_catalog(cli: &Cli) -> Result<Arc<Catalog>> {
    let store = open_store(cli).await?;
    info!(store = %store.describe(), "loading catalog");
    CatalogService::new(Arc::from(store), None)
        .snapshot()
        .await
        .context("loading movie catalog")
}

#[tokio::main]
async fn main() -> Result<()> {
    env::init_env();
    init_tracing("warn", LogSink::Stderr)?;

    let cli = Cli::parse();
    let format = Format::from(cli.format);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Commands::Reconcile { names } = &cli.command {
        return report::reconcile(&mut out, names);
    }

    let catalog = load_catalog(&cli).await?;
    match &cli.command {
        Commands::Stats => report::stats(&mut out, &catalog, format)?,
        Commands::Top { year, genre, limit } => {
            report::top(&mut out, &catalog, *year, genre, *limit, format)?
        }
        Commands::Genres => report::genres(&mut out, &catalog)?,
        Commands::Movie { title } => report::movie(&mut out, &catalog, title, format)?,
        Commands::Search { query } => report::search(&mut out, &catalog, query)?,
        Commands::Countries => report::countries(&mut out, &catalog, format)?,
        Commands::CountryMovies { country, limit } => {
            report::country_movies(&mut out, &catalog, country, *limit)?
        }
        Commands::Years => report::years(&mut out, &catalog, format)?,
        Commands::Actor { name } => report::actor(&mut out, &catalog, name)?,
        Commands::Export { out: Some(path) } => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let rows = export::write_csv(file, &catalog)?;
            info!(rows, path = %path.display(), "exported catalog");
        }
        Commands::Export { out: None } => {
            export::write_csv(&mut out, &catalog)?;
        }
        Commands::Reconcile { .. } => unreachable!("handled before loading the catalog"),
    }
    out.flush()?;
    Ok(())
}
