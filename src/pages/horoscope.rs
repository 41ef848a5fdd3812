use std::sync::Arc;

use tracing::error;

use super::PageScope;
use crate::api::{ApiError, SoulBuddyApi};
use crate::models::{SignProfile, Transits, ZodiacSign};

/// Zodiac grid, per-sign daily readings and current transits
pub struct HoroscopePage {
    api: Arc<dyn SoulBuddyApi>,
    selected: Option<ZodiacSign>,
}

impl HoroscopePage {
    pub fn new(api: Arc<dyn SoulBuddyApi>) -> Self {
        Self {
            api,
            selected: None,
        }
    }

    pub fn profiles() -> Vec<SignProfile> {
        ZodiacSign::all().iter().map(|s| s.profile()).collect()
    }

    pub fn selected(&self) -> Option<ZodiacSign> {
        self.selected
    }

    pub fn select(&mut self, sign: ZodiacSign) -> SignProfile {
        self.selected = Some(sign);
        sign.profile()
    }

    /// Daily reading for `sign`; `Ok(None)` if the page was left meanwhile
    pub async fn daily(
        &mut self,
        sign: ZodiacSign,
        scope: &PageScope,
    ) -> Result<Option<String>, ApiError> {
        self.selected = Some(sign);
        let api = Arc::clone(&self.api);
        match scope.guard(async move { api.daily_horoscope(sign).await }).await {
            None => Ok(None),
            Some(Ok(daily)) => Ok(Some(daily.horoscope)),
            Some(Err(e)) => {
                error!("Error fetching daily horoscope for {}: {}", sign, e);
                Err(e)
            }
        }
    }

    pub async fn transits(&self, scope: &PageScope) -> Result<Option<Transits>, ApiError> {
        let api = Arc::clone(&self.api);
        match scope.guard(async move { api.current_transits().await }).await {
            None => Ok(None),
            Some(Ok(transits)) => Ok(Some(transits)),
            Some(Err(e)) => {
                error!("Error fetching current transits: {}", e);
                Err(e)
            }
        }
    }
}
