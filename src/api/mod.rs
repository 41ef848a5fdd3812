//! Backend API surface
//!
//! [`SoulBuddyApi`] has one method per backend endpoint so pages can be driven
//! by a fake in tests. [`HttpApi`] is the reqwest implementation.

mod client;

pub use client::HttpApi;

use async_trait::async_trait;

use crate::models::{
    BirthDetails, ChatReply, ChatRequest, DailyHoroscope, HoroscopeRequest, HoroscopeResult,
    KundaliResult, RecommendationEnvelope, Transits, ZodiacSign,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response; `message` is the body's `detail` field when present
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected response: {0}")]
    Envelope(String),
}

#[async_trait]
pub trait SoulBuddyApi: Send + Sync {
    /// POST `/api/kundali/generate`
    async fn generate_kundali(&self, details: &BirthDetails) -> Result<KundaliResult, ApiError>;

    /// POST `/api/horoscope/predict`
    async fn predict_horoscope(
        &self,
        request: &HoroscopeRequest,
    ) -> Result<HoroscopeResult, ApiError>;

    /// GET `/api/horoscope/signs/{sign}/daily`
    async fn daily_horoscope(&self, sign: ZodiacSign) -> Result<DailyHoroscope, ApiError>;

    /// GET `/api/horoscope/transits/current`
    async fn current_transits(&self) -> Result<Transits, ApiError>;

    /// POST `/api/chat`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;

    /// POST `/api/recommendations/personalized`
    async fn personalized_recommendations(
        &self,
        details: &BirthDetails,
    ) -> Result<RecommendationEnvelope, ApiError>;
}
