//! Atom feed HTTP server.
//!
//! Every feed request runs one crawl cycle against the shared state. Unless
//! running dry, the pages delivered in the response are dropped from the
//! state and the state is saved; the in-memory state is only replaced once
//! the whole cycle, including the save, has succeeded.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{Config, CrawlState, ShardSelector};
use crate::pipeline::{filter_pages, render_feed, update};
use crate::services::PageFetcher;
use crate::storage::StateStorage;

/// Shared state of the feed server.
pub struct AppState {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    /// `None` in dry-run mode
    storage: Option<Arc<dyn StateStorage>>,
    selector: Option<ShardSelector>,
    /// Single timestamp stamped on the feed and every entry
    updated: DateTime<Utc>,
    crawl: Mutex<CrawlState>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        fetcher: Arc<dyn PageFetcher>,
        storage: Option<Arc<dyn StateStorage>>,
        selector: Option<ShardSelector>,
        initial: CrawlState,
    ) -> Self {
        Self {
            config,
            fetcher,
            storage,
            selector,
            updated: Utc::now(),
            crawl: Mutex::new(initial),
        }
    }

    /// Run one update cycle and render the feed.
    ///
    /// Cycles are serialised by the state lock.
    pub async fn refresh_feed(&self) -> Result<String> {
        let mut current = self.crawl.lock().await;

        let mut next = update(
            current.clone(),
            self.fetcher.as_ref(),
            &self.config.source,
            self.config.crawler.max_concurrent,
        )
        .await?;

        if let Some(selector) = &self.selector {
            filter_pages(&mut next.pages, selector);
        }

        let xml = render_feed(
            &next.pages,
            &self.config.feed,
            &self.config.source,
            self.updated,
        )?;

        if let Some(storage) = &self.storage {
            let delivered = next.take_pages();
            storage.save_state(&next).await?;
            if !delivered.is_empty() {
                log::info!("Delivered {} announcements", delivered.len());
            }
        }

        *current = next;
        Ok(xml)
    }

    /// Snapshot of the current crawl state.
    pub async fn snapshot(&self) -> CrawlState {
        self.crawl.lock().await.clone()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("Feed update failed: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

async fn feed(State(app): State<Arc<AppState>>) -> Result<Response> {
    let xml = app.refresh_feed().await?;
    Ok((
        [(header::CONTENT_TYPE, "application/atom+xml; charset=utf-8")],
        xml,
    )
        .into_response())
}

async fn health() -> &'static str {
    "ok"
}

/// Build the router: the feed path from config plus `/health`.
pub fn build_router(app: Arc<AppState>) -> Router {
    let feed_path = app.config.feed.path.clone();
    Router::new()
        .route(&feed_path, get(feed))
        .route("/health", get(health))
        .with_state(app)
}

/// Serve the feed until the process is stopped.
pub async fn serve(listen_addr: &str, app: Arc<AppState>) -> Result<()> {
    let feed_path = app.config.feed.path.clone();
    let router = build_router(app);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    log::info!("Serving feed on http://{listen_addr}{feed_path}");
    axum::serve(listener, router).await?;
    Ok(())
}
