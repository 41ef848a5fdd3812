use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::PageScope;
use crate::api::SoulBuddyApi;
use crate::models::{default_catalog, Category, Recommendation};
use crate::state::AppState;

pub const NOTICE_NO_DETAILS: &str =
    "Complete your birth details to receive personalized recommendations. Showing our general picks.";
pub const NOTICE_REQUEST_FAILED: &str =
    "We couldn't load your personalized recommendations. Showing default recommendations instead.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    Personalized,
    Fallback,
}

/// Category selector; `all` or one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub source: RecommendationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub items: Vec<Recommendation>,
}

impl RecommendationView {
    fn fallback(notice: &'static str) -> Self {
        Self {
            source: RecommendationSource::Fallback,
            notice: Some(notice),
            items: default_catalog(),
        }
    }

    pub fn filtered(&self, filter: CategoryFilter) -> Vec<&Recommendation> {
        self.items
            .iter()
            .filter(|r| filter.matches(r.category))
            .collect()
    }
}

pub struct RecommendationsPage {
    state: AppState,
    api: Arc<dyn SoulBuddyApi>,
    /// Loaded list and the visit it belongs to
    view: Option<(u64, RecommendationView)>,
}

impl RecommendationsPage {
    pub fn new(state: AppState, api: Arc<dyn SoulBuddyApi>) -> Self {
        Self {
            state,
            api,
            view: None,
        }
    }

    /// Recommendations for this visit, fetched on first use.
    ///
    /// `None` when the page was left while the request was in flight.
    pub async fn load(&mut self, scope: &PageScope) -> Option<&RecommendationView> {
        let cached = matches!(&self.view, Some((visit, _)) if *visit == scope.visit());
        if !cached {
            let view = self.fetch(scope).await?;
            self.view = Some((scope.visit(), view));
        }
        self.view.as_ref().map(|(_, view)| view)
    }

    async fn fetch(&self, scope: &PageScope) -> Option<RecommendationView> {
        let Some(details) = self.state.birth_details() else {
            info!("No birth details stored, showing default recommendations");
            return Some(RecommendationView::fallback(NOTICE_NO_DETAILS));
        };

        let api = Arc::clone(&self.api);
        let response = scope
            .guard(async move { api.personalized_recommendations(&details).await })
            .await;

        let view = match response? {
            Ok(envelope) => match envelope.into_success() {
                Some(items) => RecommendationView {
                    source: RecommendationSource::Personalized,
                    notice: None,
                    items,
                },
                None => {
                    warn!("Recommendations response was not a success envelope, using defaults");
                    RecommendationView::fallback(NOTICE_REQUEST_FAILED)
                }
            },
            Err(e) => {
                warn!("Error fetching recommendations: {}", e);
                RecommendationView::fallback(NOTICE_REQUEST_FAILED)
            }
        };
        Some(view)
    }
}
