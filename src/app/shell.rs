use std::time::{Duration, Instant};

pub const SPLASH_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Explore,
}

/// Root of the window: a one-shot splash timer, then the current page.
#[derive(Debug)]
pub struct PageShell {
    started: Instant,
    splash: Duration,
    page: Page,
}

impl PageShell {
    pub fn new(started: Instant) -> Self {
        Self {
            started,
            splash: SPLASH_DURATION,
            page: Page::Home,
        }
    }

    pub fn splash_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) < self.splash
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn navigate(&mut self, page: Page) {
        tracing::debug!("Navigating to {:?}", page);
        self.page = page;
    }
}
