use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::Result;
use crate::i18n::Strings;
use crate::models::{PageOutcome, SidebarItem};
use crate::page::PageAggregator;
use crate::services::{CmsClient, ContentSource};
use crate::session::{DwellState, SessionMarkers, ViewCountDebouncer, ViewIncrement};
use crate::tui::AppAction;

// Message for a completed page load
pub struct PageResult {
    pub slug: String,
    pub lang: String,
    pub outcome: PageOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarTab {
    #[default]
    MostViewed,
    Popular,
    Related,
}

impl SidebarTab {
    pub fn cycle(self) -> Self {
        match self {
            SidebarTab::MostViewed => SidebarTab::Popular,
            SidebarTab::Popular => SidebarTab::Related,
            SidebarTab::Related => SidebarTab::MostViewed,
        }
    }

    pub fn label(self, strings: &Strings) -> &'static str {
        match self {
            SidebarTab::MostViewed => strings.most_viewed,
            SidebarTab::Popular => strings.popular_news,
            SidebarTab::Related => strings.related_strong,
        }
    }
}

pub struct App {
    // Data
    pub page: Option<PageOutcome>,
    pub slug: String,
    pub lang: String,
    history: Vec<String>,

    // UI State
    pub scroll: u16,
    pub sidebar_tab: SidebarTab,
    pub sidebar_index: usize,
    pub show_help: bool,

    // Async state
    pub is_loading: bool,
    pending_page: Option<(String, String)>,
    page_rx: mpsc::Receiver<PageResult>,
    page_tx: mpsc::Sender<PageResult>,

    // View counting
    debouncer: Option<ViewCountDebouncer>,
    markers: SessionMarkers,
    view_dwell: Duration,

    // Services
    aggregator: Arc<PageAggregator>,
    source: Arc<dyn ContentSource>,
    site_url: String,
}

impl App {
    pub fn new(config: &Config, slug: &str, lang: &str) -> Result<Self> {
        let source: Arc<dyn ContentSource> = Arc::new(CmsClient::new(config)?);
        Self::with_source(source, config, slug, lang)
    }

    pub fn with_source(
        source: Arc<dyn ContentSource>,
        config: &Config,
        slug: &str,
        lang: &str,
    ) -> Result<Self> {
        let aggregator = Arc::new(PageAggregator::new(Arc::clone(&source), config)?);
        let (page_tx, page_rx) = mpsc::channel(4);

        Ok(Self {
            page: None,
            slug: slug.to_string(),
            lang: lang.to_string(),
            history: Vec::new(),
            scroll: 0,
            sidebar_tab: SidebarTab::default(),
            sidebar_index: 0,
            show_help: false,
            is_loading: false,
            pending_page: None,
            page_rx,
            page_tx,
            debouncer: None,
            markers: SessionMarkers::new(),
            view_dwell: config.view_dwell(),
            aggregator,
            source,
            site_url: config.site_url.clone(),
        })
    }

    pub fn strings(&self) -> &'static Strings {
        Strings::for_lang(&self.lang)
    }

    pub fn sidebar_items(&self) -> &[SidebarItem] {
        let Some(page) = self.page.as_ref().and_then(|p| p.view_model()) else {
            return &[];
        };
        match self.sidebar_tab {
            SidebarTab::MostViewed => &page.most_viewed,
            SidebarTab::Popular => &page.popular,
            SidebarTab::Related => &page.related,
        }
    }

    pub fn selected_sidebar_item(&self) -> Option<&SidebarItem> {
        self.sidebar_items().get(self.sidebar_index)
    }

    pub fn view_state(&self) -> Option<DwellState> {
        self.debouncer.as_ref().map(|d| d.state())
    }

    pub fn page_url(&self) -> String {
        format!(
            "{}/{}/article/{}",
            self.site_url.trim_end_matches('/'),
            self.lang,
            self.slug
        )
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
            }

            AppAction::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
            }

            AppAction::NextTab => {
                self.sidebar_tab = self.sidebar_tab.cycle();
                self.sidebar_index = 0;
            }

            AppAction::SidebarDown => {
                let len = self.sidebar_items().len();
                if len > 0 && self.sidebar_index < len - 1 {
                    self.sidebar_index += 1;
                }
            }

            AppAction::SidebarUp => {
                self.sidebar_index = self.sidebar_index.saturating_sub(1);
            }

            AppAction::OpenSelected => {
                if let Some(item) = self.selected_sidebar_item() {
                    let next = item.slug.clone();
                    if next != self.slug {
                        self.history.push(self.slug.clone());
                        self.open_page(next, self.lang.clone());
                    }
                }
            }

            AppAction::Back => {
                if let Some(previous) = self.history.pop() {
                    self.open_page(previous, self.lang.clone());
                }
            }

            AppAction::ToggleLanguage => {
                let lang = if self.lang == "en" { "bn" } else { "en" };
                self.open_page(self.slug.clone(), lang.to_string());
            }

            AppAction::Reload => {
                self.open_page(self.slug.clone(), self.lang.clone());
            }

            AppAction::OpenInBrowser => {
                let url = self.page_url();
                if let Err(e) = open::that(&url) {
                    tracing::warn!("Failed to open {}: {}", url, e);
                }
            }

            AppAction::OpenVideo => {
                let video = self
                    .page
                    .as_ref()
                    .and_then(|p| p.view_model())
                    .and_then(|p| p.video.as_ref())
                    .map(|v| v.embed_url.clone());
                if let Some(url) = video {
                    if let Err(e) = open::that(&url) {
                        tracing::warn!("Failed to open {}: {}", url, e);
                    }
                }
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }
        }

        Ok(false)
    }

    /// Start loading the current slug in the background.
    pub fn start(&mut self) {
        self.open_page(self.slug.clone(), self.lang.clone());
    }

    fn open_page(&mut self, slug: String, lang: String) {
        // The page being left must not count a view after this point
        if let Some(mut debouncer) = self.debouncer.take() {
            debouncer.deactivate();
        }

        self.slug = slug.clone();
        self.lang = lang.clone();
        self.is_loading = true;
        self.pending_page = Some((slug.clone(), lang.clone()));

        let aggregator = Arc::clone(&self.aggregator);
        let tx = self.page_tx.clone();

        tokio::spawn(async move {
            let outcome = aggregator.load(&slug, &lang).await;
            let _ = tx.send(PageResult { slug, lang, outcome }).await;
        });
    }

    /// Load the current slug in the foreground, for headless use.
    pub async fn load_now(&mut self) -> &PageOutcome {
        let outcome = self.aggregator.load(&self.slug, &self.lang).await;
        self.page.insert(outcome)
    }

    /// Poll for completed page loads (non-blocking)
    pub fn poll_page_result(&mut self) {
        while let Ok(result) = self.page_rx.try_recv() {
            // Only the most recent navigation counts
            if self.pending_page.as_ref() != Some(&(result.slug.clone(), result.lang.clone())) {
                continue;
            }
            self.pending_page = None;
            self.is_loading = false;
            self.scroll = 0;
            self.sidebar_index = 0;

            self.debouncer = result.outcome.view_model().and_then(|page| {
                let id = page.view_key.clone()?;
                let mut debouncer = ViewCountDebouncer::new(id, page.view_count, self.view_dwell);
                debouncer.activate(&self.markers, Instant::now());
                Some(debouncer)
            });

            self.page = Some(result.outcome);
        }
    }

    /// Send the view increment once the dwell window has passed.
    pub fn poll_view_counter(&mut self) {
        let Some(debouncer) = self.debouncer.as_mut() else {
            return;
        };
        let Some(increment) = debouncer.poll(&mut self.markers, Instant::now()) else {
            return;
        };

        tracing::debug!(
            "Counting view for {} ({} counted this session)",
            debouncer.article_id(),
            self.markers.len()
        );
        self.send_increment(increment);
    }

    fn send_increment(&self, increment: ViewIncrement) {
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            if let Err(e) = source
                .increment_view_count(&increment.article_id, increment.current_count)
                .await
            {
                tracing::warn!(
                    "Failed to increment view count for {}: {}",
                    increment.article_id,
                    e
                );
            }
        });
    }
}
