//! Pages and navigation
//!
//! A page does its network work inside the [`PageScope`] it was entered with.
//! Leaving the page closes the scope, and any result that arrives afterwards
//! is dropped instead of being written into page state.

pub mod chat;
pub mod horoscope;
pub mod kundali;
pub mod recommendations;

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::state::AppState;

pub use chat::{ChatPage, SendOutcome};
pub use horoscope::HoroscopePage;
pub use kundali::{KundaliOutcome, KundaliPage, SubmitStatus};
pub use recommendations::{CategoryFilter, RecommendationSource, RecommendationView, RecommendationsPage};

pub const BIRTH_DETAILS_CTA: &str =
    "Please complete your birth details on the Kundali page first to get personalized guidance.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Kundali,
    Horoscope,
    Chat,
    Recommendations,
    Blog,
    Videos,
}

impl Page {
    pub fn all() -> &'static [Page; 7] {
        &[
            Page::Home,
            Page::Kundali,
            Page::Horoscope,
            Page::Chat,
            Page::Recommendations,
            Page::Blog,
            Page::Videos,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Kundali => "kundali",
            Page::Horoscope => "horoscope",
            Page::Chat => "chat",
            Page::Recommendations => "recommendations",
            Page::Blog => "blog",
            Page::Videos => "videos",
        }
    }

    /// Pages that personalize their content from stored birth details
    pub fn uses_birth_details(&self) -> bool {
        matches!(self, Page::Chat | Page::Recommendations)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Page::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| format!("Unknown page: {}", s))
    }
}

/// Lifetime of one visit to a page
#[derive(Debug, Clone)]
pub struct PageScope {
    page: Page,
    visit: u64,
    token: CancellationToken,
}

impl PageScope {
    pub fn new(page: Page, visit: u64) -> Self {
        Self {
            page,
            visit,
            token: CancellationToken::new(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Counter distinguishing successive visits
    pub fn visit(&self) -> u64 {
        self.visit
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    /// Run `fut` for as long as the page is shown; `None` once the page was left
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = fut => self.is_active().then_some(output),
        }
    }
}

/// Result of entering a page
#[derive(Debug, Clone)]
pub struct Navigation {
    pub scope: PageScope,
    /// Shown instead of personalized content when birth details are missing
    pub call_to_action: Option<&'static str>,
}

/// Single current-page selector; no history
#[derive(Debug)]
pub struct Router {
    scope: PageScope,
    visits: u64,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            scope: PageScope::new(Page::Home, 0),
            visits: 0,
        }
    }

    pub fn current(&self) -> Page {
        self.scope.page
    }

    pub fn scope(&self) -> PageScope {
        self.scope.clone()
    }

    /// Show `page`. Staying on the current page keeps its scope; switching
    /// closes the old scope.
    pub fn navigate(&mut self, page: Page, state: &AppState) -> Navigation {
        if page != self.scope.page || !self.scope.is_active() {
            info!("Navigating from {} to {}", self.scope.page, page);
            self.scope.close();
            self.visits += 1;
            self.scope = PageScope::new(page, self.visits);
        }

        Navigation {
            scope: self.scope.clone(),
            call_to_action: call_to_action(page, state),
        }
    }
}

/// Navigation guard for pages that need the user's birth details
pub fn call_to_action(page: Page, state: &AppState) -> Option<&'static str> {
    if page.uses_birth_details() && state.birth_details().is_none() {
        Some(BIRTH_DETAILS_CTA)
    } else {
        None
    }
}
