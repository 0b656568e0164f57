// HTTP request handlers for API endpoints

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::api::models::*;
use crate::api::server::AppState;
use crate::error::{DashError, DashResult};
use crate::model::Catalog;
use crate::views::geography::{
    country_counts, country_options, explode_countries, movies_from_country, yearly_release_counts,
};
use crate::views::popularity::{
    bars, filter_options, find_by_title, search_titles, top_by_popularity, year_bounds,
    MovieDetail, ALL_GENRES,
};
use crate::views::{actors, ListKind};

/// Upper bound for caller-supplied limits.
const MAX_LIMIT: usize = 100;

async fn snapshot(state: &AppState) -> DashResult<Arc<Catalog>> {
    state.catalog.snapshot().await.map_err(|err| {
        tracing::error!(error = %format!("{err:#}"), "catalog fetch failed");
        DashError::store(&err)
    })
}

fn checked_limit(limit: Option<usize>, default: usize) -> DashResult<usize> {
    match limit.unwrap_or(default) {
        0 => Err(DashError::InvalidRequest("limit must be at least 1".into())),
        n if n > MAX_LIMIT => Err(DashError::InvalidRequest(format!(
            "limit must be at most {MAX_LIMIT}"
        ))),
        n => Ok(n),
    }
}

/// Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> DashResult<HttpResponse> {
    let store = state.catalog.store();
    let reachable = store.ping().await;

    let response = ApiResponse::success(HealthResponse {
        status: if reachable { "healthy" } else { "degraded" }.to_string(),
        store: store.describe(),
        store_reachable: reachable,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        active_sessions: state.sessions.session_count().await,
    });

    Ok(HttpResponse::Ok().json(response))
}

/// Year bounds and genre options for the popularity selectors
pub async fn movie_filters(state: web::Data<AppState>) -> DashResult<HttpResponse> {
    let catalog = snapshot(&state).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(filter_options(&catalog))))
}

/// Top movies by popularity for a year and optional genre
pub async fn top_movies(
    query: web::Query<TopMoviesQuery>,
    state: web::Data<AppState>,
) -> DashResult<HttpResponse> {
    let limit = checked_limit(query.limit, state.top_n)?;
    let catalog = snapshot(&state).await?;
    let genre = query.genre.clone().unwrap_or_else(|| ALL_GENRES.to_string());

    let Some(year) = query.year.or_else(|| year_bounds(&catalog).map(|(_, hi)| hi)) else {
        let empty = TopMoviesResponse {
            year: 0,
            genre,
            movies: Vec::new(),
        };
        return Ok(HttpResponse::Ok().json(ApiResponse::empty(empty, "No release years available.")));
    };

    tracing::debug!(year, genre = %genre, limit, "top movies requested");
    let top = top_by_popularity(&catalog, year, Some(genre.as_str()), limit);
    let body = TopMoviesResponse {
        year,
        genre,
        movies: bars(&top),
    };

    let response = if body.movies.is_empty() {
        ApiResponse::empty(body, "No movies found for the selected year and genre.")
    } else {
        ApiResponse::success(body)
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Title suggestions for the search box
pub async fn search_movies(
    query: web::Query<TitleSearchQuery>,
    state: web::Data<AppState>,
) -> DashResult<HttpResponse> {
    let catalog = snapshot(&state).await?;
    let titles = search_titles(&catalog, &query.q);
    let response = if titles.is_empty() {
        ApiResponse::empty(titles, "No matches found.")
    } else {
        ApiResponse::success(titles)
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Detail panel for one movie
pub async fn movie_detail(
    query: web::Query<MovieDetailQuery>,
    state: web::Data<AppState>,
) -> DashResult<HttpResponse> {
    let catalog = snapshot(&state).await?;
    let record = find_by_title(&catalog, &query.title)
        .ok_or_else(|| DashError::NotFound(format!("movie {:?}", query.title)))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MovieDetail::from(record))))
}

/// Country counts and percentage shares (map and pie chart)
pub async fn country_overview(state: web::Data<AppState>) -> DashResult<HttpResponse> {
    let catalog = snapshot(&state).await?;
    let rows = explode_countries(&catalog);
    let body = CountryOverviewResponse {
        total_rows: rows.len(),
        countries: country_counts(&rows),
        options: country_options(&rows),
    };
    let response = if body.countries.is_empty() {
        ApiResponse::empty(body, "No production country data available.")
    } else {
        ApiResponse::success(body)
    };
    Ok(HttpResponse::Ok().json(response))
}

/// A random handful of movies produced in one country
pub async fn country_movies(
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
    state: web::Data<AppState>,
) -> DashResult<HttpResponse> {
    let country = path.into_inner();
    let limit = checked_limit(query.limit, state.top_n)?;
    let catalog = snapshot(&state).await?;
    let rows = explode_countries(&catalog);

    let movies = movies_from_country(&rows, &country, limit, &mut rand::thread_rng());
    let message = format!("No movies found for {country}.");
    let body = CountryMoviesResponse { country, movies };
    let response = if body.movies.is_empty() {
        ApiResponse::empty(body, message)
    } else {
        ApiResponse::success(body)
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Movies released per year (line chart)
pub async fn yearly_counts(state: web::Data<AppState>) -> DashResult<HttpResponse> {
    let catalog = snapshot(&state).await?;
    let body = YearlyCountsResponse {
        years: yearly_release_counts(&catalog),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(body)))
}

/// Filmography for an actor
pub async fn actor_movies(
    query: web::Query<ActorQuery>,
    state: web::Data<AppState>,
) -> DashResult<HttpResponse> {
    if query.name.trim().is_empty() {
        return Err(DashError::InvalidRequest(
            "enter an actor's name to find their movies".into(),
        ));
    }
    let catalog = snapshot(&state).await?;
    let movies: Vec<ActorMovie> = actors::movies_with_actor(&catalog, &query.name)
        .into_iter()
        .map(|r| ActorMovie {
            title: r.title.clone(),
            release_year: r.release_year,
            popularity: r.popularity,
        })
        .collect();

    let message = format!("No movies found featuring {}.", query.name);
    let body = ActorMoviesResponse {
        actor: query.name.clone(),
        movies,
    };
    let response = if body.movies.is_empty() {
        ApiResponse::empty(body, message)
    } else {
        ApiResponse::success(body)
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Both watch-lists of a session
pub async fn session_lists(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> DashResult<HttpResponse> {
    let session_id = path.into_inner();
    let lists = state.sessions.get(&session_id).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(SessionListsResponse {
        session_id,
        lists,
        added: None,
    })))
}

pub async fn add_to_watch(
    path: web::Path<String>,
    payload: web::Json<AddTitleRequest>,
    state: web::Data<AppState>,
) -> DashResult<HttpResponse> {
    add_to_list(path.into_inner(), payload.into_inner(), ListKind::ToWatch, &state).await
}

pub async fn add_watched(
    path: web::Path<String>,
    payload: web::Json<AddTitleRequest>,
    state: web::Data<AppState>,
) -> DashResult<HttpResponse> {
    add_to_list(path.into_inner(), payload.into_inner(), ListKind::Watched, &state).await
}

async fn add_to_list(
    session_id: String,
    payload: AddTitleRequest,
    kind: ListKind,
    state: &AppState,
) -> DashResult<HttpResponse> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(DashError::InvalidRequest("title must not be empty".into()));
    }
    let catalog = snapshot(state).await?;
    if find_by_title(&catalog, title).is_none() {
        return Err(DashError::NotFound(format!("movie {title:?}")));
    }

    let (lists, added) = state.sessions.add(&session_id, kind, title).await;
    tracing::info!(session = %session_id, ?kind, title, added, "watch-list add");
    Ok(HttpResponse::Ok().json(ApiResponse::success(SessionListsResponse {
        session_id,
        lists,
        added: Some(added),
    })))
}
