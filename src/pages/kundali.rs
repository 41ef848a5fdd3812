use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use super::PageScope;
use crate::api::{ApiError, SoulBuddyApi};
use crate::chart::{render_svg, ChartError, ChartLayout, ChartSummary};
use crate::models::{
    insight_cards, BirthDetails, HoroscopePanel, HoroscopeRequest, HoroscopeResult, InsightCard,
    KundaliResult, TimeFrame,
};
use crate::state::{AppState, Store};

/// Whether a finished submission was written into the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    Applied,
    /// The page was left before both responses arrived
    Discarded,
}

/// Chart and daily horoscope for one set of birth details
#[derive(Debug, Clone)]
pub struct KundaliOutcome {
    pub details: BirthDetails,
    pub kundali: KundaliResult,
    pub horoscope: HoroscopeResult,
}

impl KundaliOutcome {
    pub fn insight_cards(&self) -> Vec<InsightCard> {
        insight_cards(&self.kundali.insights())
    }

    pub fn panels(&self) -> Vec<HoroscopePanel> {
        self.horoscope.panels()
    }

    /// Chart diagram, when the backend returned a structured chart
    pub fn chart_svg(&self) -> Option<Result<String, ChartError>> {
        let data = self.kundali.kundali_data.as_ref()?;
        Some(ChartLayout::compute(data).map(|layout| render_svg(&layout)))
    }

    pub fn chart_summary(&self) -> Option<Result<ChartSummary, ChartError>> {
        self.kundali.kundali_data.as_ref().map(ChartSummary::build)
    }
}

/// Birth form results: kundali chart followed by the daily prediction
pub struct KundaliPage {
    state: AppState,
    api: Arc<dyn SoulBuddyApi>,
    loading: Store<bool>,
    result: Option<KundaliOutcome>,
    alert: Option<String>,
}

impl KundaliPage {
    pub fn new(state: AppState, api: Arc<dyn SoulBuddyApi>) -> Self {
        Self {
            state,
            api,
            loading: Store::new(false),
            result: None,
            alert: None,
        }
    }

    /// Shared flag covering both requests of a submission
    pub fn loading(&self) -> Store<bool> {
        self.loading.clone()
    }

    pub fn result(&self) -> Option<&KundaliOutcome> {
        self.result.as_ref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Request the chart, then the daily horoscope, and show both.
    ///
    /// The birth details are stored for the other pages as soon as they are
    /// submitted. A failure of either call leaves the previous result untouched.
    pub async fn submit(
        &mut self,
        details: BirthDetails,
        scope: &PageScope,
    ) -> Result<SubmitStatus, ApiError> {
        info!(
            "Generating kundali for {}-{:02}-{:02} {:02}:{:02} in {}, {}",
            details.year,
            details.month,
            details.day,
            details.hour,
            details.minute,
            details.city,
            details.country
        );
        self.state.user.set(Some(details.clone()));
        self.alert = None;
        self.loading.set(true);

        let api = Arc::clone(&self.api);
        let request = HoroscopeRequest {
            birth_details: details.clone(),
            time_frame: TimeFrame::Daily,
        };
        let outcome = scope
            .guard(async {
                let kundali = api.generate_kundali(&request.birth_details).await?;
                let horoscope = api.predict_horoscope(&request).await?;
                Ok::<_, ApiError>((kundali, horoscope))
            })
            .await;

        self.loading.set(false);

        match outcome {
            None => {
                info!("Kundali page left before results arrived, discarding");
                Ok(SubmitStatus::Discarded)
            }
            Some(Err(e)) => {
                error!("Error generating kundali: {}", e);
                self.alert = Some(format!("Failed to generate kundali: {}", e));
                Err(e)
            }
            Some(Ok((kundali, horoscope))) => {
                self.result = Some(KundaliOutcome {
                    details,
                    kundali,
                    horoscope,
                });
                Ok(SubmitStatus::Applied)
            }
        }
    }

    /// "Generate another": back to the empty form
    pub fn reset(&mut self) {
        info!("Clearing kundali result and stored birth details");
        self.result = None;
        self.alert = None;
        self.state.user.set(None);
    }
}
