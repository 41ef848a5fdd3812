use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::BirthDetails;

/// Period a horoscope prediction covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Body of `/horoscope/predict`
#[derive(Debug, Clone, Serialize)]
pub struct HoroscopeRequest {
    pub birth_details: BirthDetails,
    pub time_frame: TimeFrame,
}

/// Prediction returned by `/horoscope/predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoroscopeResult {
    pub general: String,
    pub career: String,
    pub love: String,
    pub health: String,
    pub finances: String,
    pub lucky_number: u32,
    pub lucky_color: String,
}

/// One category panel under the general reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoroscopePanel {
    pub title: &'static str,
    pub text: String,
}

impl HoroscopeResult {
    /// Career, love, health and finances panels, in display order
    pub fn panels(&self) -> Vec<HoroscopePanel> {
        vec![
            HoroscopePanel {
                title: "Career",
                text: self.career.clone(),
            },
            HoroscopePanel {
                title: "Love",
                text: self.love.clone(),
            },
            HoroscopePanel {
                title: "Health",
                text: self.health.clone(),
            },
            HoroscopePanel {
                title: "Finances",
                text: self.finances.clone(),
            },
        ]
    }
}

/// Response of `/horoscope/signs/{sign}/daily`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHoroscope {
    pub horoscope: String,
}

/// Current planetary transits, planet name -> position description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transits(pub BTreeMap<String, String>);

impl Transits {
    pub fn get(&self, planet: &str) -> Option<&str> {
        self.0.get(planet).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Accepts either a flat `{planet: description}` object or the
/// `{"transits": [{"planet": .., ...}]}` list form.
impl<'de> Deserialize<'de> for Transits {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let map = match value {
            Value::Object(mut obj) => match obj.remove("transits") {
                Some(Value::Array(items)) => items
                    .into_iter()
                    .filter_map(|item| transit_entry(&item))
                    .collect(),
                Some(other) => {
                    obj.insert("transits".to_string(), other);
                    obj.into_iter()
                        .map(|(k, v)| (k, describe(&v)))
                        .collect()
                }
                None => obj.into_iter().map(|(k, v)| (k, describe(&v))).collect(),
            },
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected transit object, got {}",
                    other
                )))
            }
        };
        Ok(Transits(map))
    }
}

fn transit_entry(item: &Value) -> Option<(String, String)> {
    let obj = item.as_object()?;
    let planet = obj.get("planet")?.as_str()?.to_string();

    let mut parts = Vec::new();
    if let Some(sign) = obj.get("zodiac_sign").and_then(Value::as_str) {
        parts.push(sign.to_string());
    }
    if let Some(degree) = obj.get("degree").and_then(Value::as_f64) {
        parts.push(format!("{:.1}°", degree));
    }
    if let Some(house) = obj.get("house").and_then(Value::as_u64) {
        parts.push(format!("house {}", house));
    }
    if obj.get("is_retrograde").and_then(Value::as_bool) == Some(true) {
        parts.push("retrograde".to_string());
    }

    Some((planet, parts.join(", ")))
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
