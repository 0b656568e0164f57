// API server implementation using actix-web

use std::time::Instant;

use crate::api::{auth, middleware, routes};
use crate::catalog::CatalogService;
use crate::util::env as env_util;
use crate::views::popularity::DEFAULT_TOP_N;
use crate::views::SessionLists;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};

/// Shared state handed to every handler.
pub struct AppState {
    pub catalog: CatalogService,
    pub sessions: SessionLists,
    pub top_n: usize,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(catalog: CatalogService, top_n: usize) -> Self {
        Self {
            catalog,
            sessions: SessionLists::new(),
            top_n: top_n.max(1),
            started_at: Instant::now(),
        }
    }

    pub fn with_sessions(mut self, sessions: SessionLists) -> Self {
        self.sessions = sessions;
        self
    }
}

pub struct ApiServer {
    pub host: String,
    pub port: u16,
    pub api_secret: Option<String>,
    pub allowed_origins: String,
    pub top_n: usize,
}

impl ApiServer {
    /// Create server from environment variables
    pub fn from_env() -> Result<Self> {
        env_util::init_env();

        let host = env_util::env_opt("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = env_util::env_opt("API_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .context("Invalid API_PORT")?;
        let api_secret = env_util::env_opt("API_SECRET");
        if api_secret.is_none() {
            tracing::warn!("API_SECRET not set; API runs without authentication");
        }
        let allowed_origins = env_util::env_opt("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string());
        let top_n = env_util::env_parse("TOP_N", DEFAULT_TOP_N);

        Ok(Self {
            host,
            port,
            api_secret,
            allowed_origins,
            top_n,
        })
    }

    /// Start the HTTP server
    pub async fn run(self, catalog: CatalogService) -> Result<()> {
        let bind_addr = format!("{}:{}", self.host, self.port);

        tracing::info!(
            host = %self.host,
            port = %self.port,
            store = %catalog.store().describe(),
            "Starting movie-dash API server"
        );

        let state = web::Data::new(
            AppState::new(catalog, self.top_n).with_sessions(SessionLists::from_env()),
        );
        let api_secret = self.api_secret.clone();
        let allowed_origins = self.allowed_origins.clone();

        HttpServer::new(move || {
            let (logger, compress) = middleware::setup_middleware();
            let cors = middleware::setup_cors(&allowed_origins);
            let auth = auth::Auth::new(api_secret.clone());

            App::new()
                .app_data(state.clone())
                .wrap(logger)
                .wrap(compress)
                .wrap(cors)
                .wrap(auth)
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}
