//! Search controller
//!
//! Owns the loaded artist list, the view state, the debounce gate and the
//! search sequence counter. All mutation funnels through here; engines in
//! [`crate::search`] stay pure and the front end only ever sees rendered
//! [`Document`]s.
//!
//! Concurrency model: callers share the controller behind
//! `Arc<Mutex<_>>`. Each keystroke bumps a debounce generation and spawns
//! a delayed pass; only the pass whose generation is still current runs,
//! so a burst of keystrokes produces exactly one filter/suggest pass.
//! Network responses (fallback location search, suggestion enrichment)
//! carry the search sequence number they were issued under and are
//! discarded when a newer pass has since run.

use crate::client::{DirectoryClient, LOCATION_SUGGESTION_LIMIT};
use crate::keys::{EnterOutcome, Key};
use crate::loader::ArtistLoader;
use crate::search::{self, filter::filter, suggest::append_locations};
use crate::view::{render, Banner, Document, ViewState};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use troupe_common::{Artist, UiConfig};

/// Controller shared between the front end and spawned passes.
pub type SharedController = Arc<Mutex<SearchController>>;

/// Side effect a key press asks the front end to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEffect {
    None,
    /// Escape: drop input focus
    Defocus,
    /// Committed suggestion referencing an artist: navigate to it
    Navigate(u32),
}

pub struct SearchController {
    loader: ArtistLoader,
    config: UiConfig,
    /// Last successfully loaded full list; the view is always derived
    /// from this (or a wholesale server-side result set)
    all_artists: Vec<Artist>,
    view: ViewState,
    /// Debounce generation; a spawned pass runs only if still current
    debounce_gen: u64,
    /// Search pass sequence; stale network responses are discarded
    search_seq: u64,
    /// Completed filter/suggest passes (observable for diagnostics)
    searches_run: u64,
    version: u64,
    notify: watch::Sender<u64>,
}

impl SearchController {
    /// Build a controller from resolved configuration. The receiver fires
    /// whenever the view changes, including late async enrichment.
    pub fn new(config: UiConfig) -> (SharedController, watch::Receiver<u64>) {
        let client = DirectoryClient::new(config.api_base.clone(), config.query_max_len);
        let loader = ArtistLoader::new(client, config.cache_ttl);
        let (notify, rx) = watch::channel(0);
        let controller = SearchController {
            loader,
            config,
            all_artists: Vec::new(),
            view: ViewState::default(),
            debounce_gen: 0,
            search_seq: 0,
            searches_run: 0,
            version: 0,
            notify,
        };
        (Arc::new(Mutex::new(controller)), rx)
    }

    /// Render the current view.
    pub fn document(&self) -> Document {
        render(&self.view)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Completed filter/suggest passes since startup.
    pub fn searches_run(&self) -> u64 {
        self.searches_run
    }

    fn bump(&mut self) {
        self.version += 1;
        let _ = self.notify.send(self.version);
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Startup load: retries on a fixed delay (optionally capped). On
    /// final failure the view shows a retryable error banner instead of
    /// propagating the error.
    pub async fn init(&mut self) {
        self.view.loading = Some("Loading artists...".to_string());
        self.bump();

        let result = self
            .loader
            .load_with_retry(self.config.retry_delay, self.config.max_retries)
            .await;
        self.view.loading = None;
        match result {
            Ok(artists) => {
                self.all_artists = artists;
                self.view.artists = self.all_artists.clone();
                self.view.banner = None;
            }
            Err(e) => {
                warn!("Startup load failed: {}", e);
                self.view.banner = Some(Banner::error("Unable to fetch data—try again?"));
            }
        }
        self.bump();
    }

    /// Single load attempt (the retry affordance on the error banner).
    pub async fn load_artists(&mut self) {
        self.view.loading = Some("Loading artists...".to_string());
        self.bump();

        match self.loader.load().await {
            Ok(artists) => {
                self.all_artists = artists;
                self.view.artists = self.all_artists.clone();
                self.view.banner = None;
            }
            Err(e) => {
                warn!("Artist load failed: {}", e);
                self.view.banner = Some(Banner::error("Unable to fetch data—try again?"));
            }
        }
        self.view.loading = None;
        self.bump();
    }

    // ------------------------------------------------------------------
    // Input and search passes
    // ------------------------------------------------------------------

    /// Record a keystroke and arm the debounce gate. The scheduled pass
    /// runs only if no newer keystroke arrives within the debounce
    /// window.
    pub async fn handle_input(ctrl: &SharedController, raw: String) {
        let (generation, delay) = {
            let mut this = ctrl.lock().await;
            this.view.query = raw.clone();
            if !raw.trim().is_empty() {
                this.view.panel.open();
            }
            this.debounce_gen += 1;
            this.bump();
            (this.debounce_gen, this.config.debounce)
        };

        let ctrl = ctrl.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            let still_current = { ctrl.lock().await.debounce_gen == generation };
            if still_current {
                Self::run_search(&ctrl, raw).await;
            }
        });
    }

    /// Run a filter/suggest pass immediately (Enter or an elapsed
    /// debounce window), opening the suggestion panel.
    pub async fn run_search(ctrl: &SharedController, raw: String) {
        Self::run_pass(ctrl, raw, true).await;
    }

    /// The pass itself. A committed suggestion runs with `open_panel`
    /// false so the panel stays closed after the commit.
    async fn run_pass(ctrl: &SharedController, raw: String, open_panel: bool) {
        let pass = {
            let mut this = ctrl.lock().await;
            this.apply_filter_pass(&raw, open_panel)
        };

        let Some((query, seq, needs_fallback)) = pass else {
            return;
        };

        if needs_fallback {
            Self::location_fallback(ctrl, &query, seq).await;
        }

        // Async enrichment: location suggestions appended when they
        // arrive, which may be after the primary render.
        let ctrl = ctrl.clone();
        tokio::spawn(async move {
            Self::enrich_location_suggestions(&ctrl, &query, seq).await;
        });
    }

    /// Synchronous part of a pass. Returns `None` when the pass is
    /// complete (empty or rejected query), otherwise the normalized
    /// query, its sequence number, and whether the zero-result fallback
    /// should run.
    fn apply_filter_pass(&mut self, raw: &str, open_panel: bool) -> Option<(String, u64, bool)> {
        self.searches_run += 1;
        let query = raw.trim().to_string();

        if query.is_empty() {
            self.view.artists = self.all_artists.clone();
            self.view.suggestions.clear();
            self.view.panel.close();
            self.view.banner = None;
            self.bump();
            return None;
        }

        if query.chars().count() > self.config.query_max_len {
            self.view.banner = Some(Banner::warning(format!(
                "Search query must be under {} characters",
                self.config.query_max_len
            )));
            self.bump();
            return None;
        }

        self.search_seq += 1;
        let seq = self.search_seq;

        self.view.artists = filter(&query, &self.all_artists);
        self.view.suggestions = search::suggest(&query, &self.all_artists);
        if open_panel {
            self.view.panel.open();
        } else {
            self.view.panel.close();
        }
        self.view.banner = None;
        self.bump();

        Some((query, seq, self.view.artists.is_empty()))
    }

    /// Zero-result fallback: replace the view wholesale with the
    /// server-side venue/location search, if it finds anything. This is a
    /// widening, not a merge.
    async fn location_fallback(ctrl: &SharedController, query: &str, seq: u64) {
        let client = {
            let mut this = ctrl.lock().await;
            this.view.loading = Some("Searching locations...".to_string());
            this.bump();
            this.loader.client().clone()
        };

        let result = client.search_locations(query).await;

        let mut this = ctrl.lock().await;
        this.view.loading = None;
        if this.search_seq != seq {
            debug!(seq, "Discarding stale location search response");
            this.bump();
            return;
        }
        match result {
            Ok(artists) if !artists.is_empty() => {
                this.view.banner = Some(Banner::success(format!(
                    "Found {} artist(s) performing in locations matching \"{}\"",
                    artists.len(),
                    query
                )));
                this.view.artists = artists;
            }
            Ok(_) => {
                // Nothing anywhere: the no-results placeholder stands
            }
            Err(e) => {
                warn!("Location search failed: {}", e);
                this.view.banner =
                    Some(Banner::warning("Location search failed. Please try again."));
            }
        }
        this.bump();
    }

    /// Fetch location suggestions and append them to the open panel,
    /// unless a newer pass has run in the meantime.
    async fn enrich_location_suggestions(ctrl: &SharedController, query: &str, seq: u64) {
        let client = { ctrl.lock().await.loader.client().clone() };

        match client
            .location_suggestions(query, LOCATION_SUGGESTION_LIMIT)
            .await
        {
            Ok(locations) if !locations.is_empty() => {
                let mut this = ctrl.lock().await;
                if this.search_seq != seq {
                    debug!(seq, "Discarding stale location suggestions");
                    return;
                }
                append_locations(&mut this.view.suggestions, locations);
                this.bump();
            }
            Ok(_) => {}
            Err(e) => {
                debug!("Location suggestion fetch failed: {}", e);
            }
        }
    }

    /// Server-side search across all artist fields, replacing the view
    /// wholesale with the backend's result set. Empty queries restore
    /// the full list.
    pub async fn server_search(ctrl: &SharedController, raw: String) {
        let query = raw.trim().to_string();
        let client = {
            let mut this = ctrl.lock().await;
            this.view.query = query.clone();
            if query.is_empty() {
                this.clear_filters();
                return;
            }
            // Invalidate any in-flight fallback or enrichment response
            this.search_seq += 1;
            this.view.loading = Some("Searching...".to_string());
            this.bump();
            this.loader.client().clone()
        };

        let result = client.search(&query).await;

        let mut this = ctrl.lock().await;
        this.view.loading = None;
        match result {
            Ok(artists) => {
                this.view.artists = artists;
                this.view.suggestions.clear();
                this.view.panel.close();
                this.view.banner = None;
            }
            Err(e) => {
                warn!("Server search failed: {}", e);
                this.view.banner = Some(Banner::warning("Search failed. Please try again."));
            }
        }
        this.bump();
    }

    // ------------------------------------------------------------------
    // Keyboard navigation
    // ------------------------------------------------------------------

    /// Apply a navigation key to the suggestion panel.
    pub async fn handle_key(ctrl: &SharedController, key: Key) -> KeyEffect {
        match key {
            Key::ArrowDown => {
                let mut this = ctrl.lock().await;
                let len = this.view.suggestions.len();
                this.view.panel.arrow_down(len);
                this.bump();
                KeyEffect::None
            }
            Key::ArrowUp => {
                let mut this = ctrl.lock().await;
                this.view.panel.arrow_up();
                this.bump();
                KeyEffect::None
            }
            Key::Escape => {
                let mut this = ctrl.lock().await;
                this.view.panel.close();
                this.bump();
                KeyEffect::Defocus
            }
            Key::Enter => Self::handle_enter(ctrl).await,
        }
    }

    async fn handle_enter(ctrl: &SharedController) -> KeyEffect {
        let (query_to_run, open_panel) = {
            let mut this = ctrl.lock().await;
            match this.view.panel.enter() {
                EnterOutcome::CommitSelected(i) => {
                    let Some(suggestion) = this.view.suggestions.get(i).cloned() else {
                        return KeyEffect::None;
                    };
                    this.view.panel.close();
                    this.bump();
                    match suggestion.artist_id {
                        // Suggestion references an artist: navigate to it
                        Some(id) => return KeyEffect::Navigate(id),
                        // Location suggestion: commit its text as the
                        // query and search; the panel stays closed
                        None => {
                            this.view.query = suggestion.text.clone();
                            (suggestion.text, false)
                        }
                    }
                }
                EnterOutcome::SearchRawQuery => (this.view.query.clone(), true),
            }
        };

        // Enter bypasses the debounce gate
        Self::run_pass(ctrl, query_to_run, open_panel).await;
        KeyEffect::None
    }

    /// Input focus opens the panel.
    pub async fn handle_focus(ctrl: &SharedController) {
        let mut this = ctrl.lock().await;
        this.view.panel.open();
        this.bump();
    }

    /// Blur closes it.
    pub async fn handle_blur(ctrl: &SharedController) {
        let mut this = ctrl.lock().await;
        this.view.panel.close();
        this.bump();
    }

    // ------------------------------------------------------------------
    // Directory maintenance
    // ------------------------------------------------------------------

    /// Reset the query and restore the full list.
    pub fn clear_filters(&mut self) {
        self.view.query.clear();
        self.view.artists = self.all_artists.clone();
        self.view.suggestions.clear();
        self.view.panel.close();
        self.view.banner = None;
        self.bump();
    }

    /// Ask the backend to invalidate its cache, then drop the local
    /// snapshot and reload.
    pub async fn refresh_cache(&mut self) {
        let client = self.loader.client().clone();
        match client.refresh_cache().await {
            Ok(()) => {
                info!("Backend cache refreshed");
                self.loader.invalidate();
                self.load_artists().await;
                // Keep the reload's error banner if the refetch failed
                if self.view.banner.is_none() {
                    self.view.banner = Some(Banner::success("Data refreshed successfully"));
                    self.bump();
                }
            }
            Err(e) => {
                warn!("Cache refresh failed: {}", e);
                self.view.banner =
                    Some(Banner::error("Failed to refresh data. Please try again."));
                self.bump();
            }
        }
    }

    /// Informational backend cache status, logged only.
    pub async fn check_api_availability(&self) {
        let client = self.loader.client().clone();
        match client.cache_status().await {
            Ok(status) => info!(%status, "Backend cache status"),
            Err(e) => debug!("Cache status check failed: {}", e),
        }
    }
}
