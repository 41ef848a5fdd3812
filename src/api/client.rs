use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{ApiError, SoulBuddyApi};
use crate::config::Config;
use crate::models::{
    BirthDetails, ChatReply, ChatRequest, DailyHoroscope, HoroscopeRequest, HoroscopeResult,
    KundaliResult, RecommendationEnvelope, Transits, ZodiacSign,
};

/// JSON-over-HTTP client for the SoulBuddy backend
#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        read_json(response).await
    }

    async fn get_json<R>(&self, path: &str) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }
}

async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").cloned())
            .map(|detail| match detail {
                Value::String(s) => s,
                other => other.to_string(),
            });
        let message = detail.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl SoulBuddyApi for HttpApi {
    async fn generate_kundali(&self, details: &BirthDetails) -> Result<KundaliResult, ApiError> {
        self.post_json("/api/kundali/generate", details).await
    }

    async fn predict_horoscope(
        &self,
        request: &HoroscopeRequest,
    ) -> Result<HoroscopeResult, ApiError> {
        self.post_json("/api/horoscope/predict", request).await
    }

    async fn daily_horoscope(&self, sign: ZodiacSign) -> Result<DailyHoroscope, ApiError> {
        self.get_json(&format!("/api/horoscope/signs/{}/daily", sign.slug()))
            .await
    }

    async fn current_transits(&self) -> Result<Transits, ApiError> {
        self.get_json("/api/horoscope/transits/current").await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.post_json("/api/chat", request).await
    }

    async fn personalized_recommendations(
        &self,
        details: &BirthDetails,
    ) -> Result<RecommendationEnvelope, ApiError> {
        self.post_json(
            "/api/recommendations/personalized",
            &json!({ "birth_details": details }),
        )
        .await
    }
}
