use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of recommendation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Crystals,
    Books,
    Practices,
    Rituals,
}

impl Category {
    pub fn all() -> &'static [Category; 4] {
        &[
            Category::Crystals,
            Category::Books,
            Category::Practices,
            Category::Rituals,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Crystals => "crystals",
            Category::Books => "books",
            Category::Practices => "practices",
            Category::Rituals => "rituals",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// A recommendation card, either from the built-in catalog or personalized by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// General rating on a 0-5 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Astrological affinity as a 0-100 percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<f32>,
}

/// Envelope returned by `/recommendations/personalized`
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub recommendations: Option<Vec<Recommendation>>,
}

impl RecommendationEnvelope {
    /// The recommendation list, only when the envelope reports success
    pub fn into_success(self) -> Option<Vec<Recommendation>> {
        match (self.status.as_deref(), self.recommendations) {
            (Some("success"), Some(list)) => Some(list),
            _ => None,
        }
    }
}

fn entry(id: &str, title: &str, description: &str, category: Category, rating: f32) -> Recommendation {
    Recommendation {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        rating: Some(rating),
        affinity: None,
    }
}

/// Built-in catalog shown when personalization is unavailable
pub fn default_catalog() -> Vec<Recommendation> {
    vec![
        entry(
            "1",
            "Amethyst Crystal",
            "A powerful stone for spiritual growth and inner peace. Perfect for meditation and stress relief.",
            Category::Crystals,
            4.8,
        ),
        entry(
            "2",
            "The Power of Now",
            "Essential reading for spiritual awakening and mindfulness practice by Eckhart Tolle.",
            Category::Books,
            4.9,
        ),
        entry(
            "3",
            "Morning Meditation",
            "Start your day with 10 minutes of mindful breathing to center yourself and set positive intentions.",
            Category::Practices,
            4.7,
        ),
        entry(
            "4",
            "Full Moon Ritual",
            "A powerful cleansing and manifestation ritual to perform during the full moon phase.",
            Category::Rituals,
            4.6,
        ),
        entry(
            "5",
            "Rose Quartz",
            "The stone of universal love, promoting healing and emotional well-being.",
            Category::Crystals,
            4.7,
        ),
        entry(
            "6",
            "Loving-Kindness Practice",
            "A heart-centered meditation practice to cultivate compassion for yourself and others.",
            Category::Practices,
            4.8,
        ),
    ]
}
