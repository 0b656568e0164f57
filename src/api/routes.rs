// API route configuration

use crate::api::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check (no auth required)
        .route("/health", web::get().to(handlers::health_check))
        .route("/", web::get().to(handlers::health_check))
        .service(
            web::scope("/api/v1")
                // Popularity view
                .route("/movies/filters", web::get().to(handlers::movie_filters))
                .route("/movies/top", web::get().to(handlers::top_movies))
                .route("/movies/search", web::get().to(handlers::search_movies))
                .route("/movies/detail", web::get().to(handlers::movie_detail))
                // Geography view
                .route("/countries", web::get().to(handlers::country_overview))
                .route(
                    "/countries/{country}/movies",
                    web::get().to(handlers::country_movies),
                )
                .route("/years", web::get().to(handlers::yearly_counts))
                // Actor view
                .route("/actors", web::get().to(handlers::actor_movies))
                // Watch-lists
                .route(
                    "/sessions/{session_id}/lists",
                    web::get().to(handlers::session_lists),
                )
                .route(
                    "/sessions/{session_id}/to-watch",
                    web::post().to(handlers::add_to_watch),
                )
                .route(
                    "/sessions/{session_id}/watched",
                    web::post().to(handlers::add_watched),
                ),
        );
}
