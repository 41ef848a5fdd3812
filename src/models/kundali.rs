use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::Planet;

/// Gender code accepted by the kundali backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Normalized birth details, as produced by the birth form and sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BirthDetails {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Hour in 24-hour format (0-23)
    pub hour: u32,
    pub minute: u32,
    pub city: String,
    pub country: String,
    pub gender: Gender,
}

impl BirthDetails {
    /// The calendar date and time these details name, or `None` when the
    /// fields do not form a real date (e.g. 31 February).
    pub fn nominal_datetime(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?;
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0)?;
        Some(date.and_time(time))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLocation {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Birth details as echoed back inside the chart record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBirthDetails {
    pub date: String,
    pub time: String,
    pub location: ChartLocation,
}

/// Structured chart returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KundaliData {
    pub birth_details: ChartBirthDetails,
    /// Ascendant longitude in degrees (0-360)
    pub ascendant: f64,
    pub planet_positions: BTreeMap<Planet, f64>,
    /// House boundaries in house order, index 0 = 1st house
    pub house_cusps: Vec<f64>,
    #[serde(default)]
    pub insights: Vec<String>,
}

/// Response of `/kundali/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KundaliResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_base64: Option<String>,
    #[serde(default)]
    pub analysis_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kundali_data: Option<KundaliData>,
}

impl KundaliResult {
    /// Flat heading/body sequence for the insight cards.
    ///
    /// Structured insights from the chart record win; otherwise they are mined
    /// from the analysis text.
    pub fn insights(&self) -> Vec<String> {
        match &self.kundali_data {
            Some(data) if !data.insights.is_empty() => data.insights.clone(),
            _ => derive_insights(&self.analysis_text),
        }
    }
}

/// One card of the insights section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightCard {
    pub heading: String,
    pub body: String,
}

/// Pair a flat heading/body sequence into cards. A trailing unpaired heading is dropped.
pub fn insight_cards(insights: &[String]) -> Vec<InsightCard> {
    insights
        .chunks_exact(2)
        .map(|pair| InsightCard {
            heading: pair[0].clone(),
            body: pair[1].clone(),
        })
        .collect()
}

struct InsightTopic {
    heading: &'static str,
    keywords: &'static [&'static str],
    matched: &'static str,
    fallback: &'static str,
}

const INSIGHT_TOPICS: [InsightTopic; 5] = [
    InsightTopic {
        heading: "Personality",
        keywords: &["leadership", "confident", "ascendant"],
        matched: "Your chart points to natural leadership and a confident presence. Others look to you for direction when things are uncertain.",
        fallback: "Your chart reveals a balanced temperament that adapts well to the people around you.",
    },
    InsightTopic {
        heading: "Career",
        keywords: &["career", "profession", "10th house"],
        matched: "Strong placements around your career houses favour steady professional growth. Recognition comes through persistence.",
        fallback: "Your professional path rewards patience and continuous learning more than sudden leaps.",
    },
    InsightTopic {
        heading: "Relationships",
        keywords: &["venus", "relationship", "marriage", "7th house"],
        matched: "Venus colours your relationships with warmth and loyalty. Partnerships are a major source of growth for you.",
        fallback: "Relationships flourish when you give them time and honest communication.",
    },
    InsightTopic {
        heading: "Health",
        keywords: &["health", "6th house", "vitality"],
        matched: "Your chart highlights vitality, but routine matters. Regular rest and movement keep your energy steady.",
        fallback: "Simple daily routines are the foundation of your wellbeing.",
    },
    InsightTopic {
        heading: "Spiritual Growth",
        keywords: &["jupiter", "spiritual", "ketu", "dharma"],
        matched: "Jupiter and Ketu draw you toward reflection and higher learning. Meditation deepens your intuition.",
        fallback: "Quiet reflection and mindful practice will open new perspectives for you.",
    },
];

/// Heuristic insight extraction from free analysis text.
///
/// Always yields five heading/body pairs. The body for each topic depends only
/// on whether one of its keywords occurs in the text (case-insensitive).
pub fn derive_insights(analysis_text: &str) -> Vec<String> {
    let text = analysis_text.to_lowercase();
    let mut insights = Vec::with_capacity(INSIGHT_TOPICS.len() * 2);

    for topic in &INSIGHT_TOPICS {
        let body = if topic.keywords.iter().any(|k| text.contains(k)) {
            topic.matched
        } else {
            topic.fallback
        };
        insights.push(topic.heading.to_string());
        insights.push(body.to_string());
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mumbai() -> BirthDetails {
        BirthDetails {
            year: 1990,
            month: 6,
            day: 15,
            hour: 10,
            minute: 30,
            city: "Mumbai".to_string(),
            country: "India".to_string(),
            gender: Gender::Male,
        }
    }

    #[test]
    fn birth_details_serialize_flat_with_gender_code() {
        let value = serde_json::to_value(mumbai()).unwrap();
        assert_eq!(value["gender"], "M");
        assert_eq!(value["hour"], 10);
        assert_eq!(value["city"], "Mumbai");
    }

    #[test]
    fn impossible_calendar_dates_have_no_datetime() {
        let mut details = mumbai();
        assert!(details.nominal_datetime().is_some());

        details.month = 2;
        details.day = 31;
        assert!(details.nominal_datetime().is_none());
    }

    #[test]
    fn kundali_data_rejects_unknown_planet_keys() {
        let json = r#"{
            "birth_details": {"date": "1990-06-15", "time": "10:30",
                "location": {"city": "Mumbai", "country": "India", "latitude": 19.07, "longitude": 72.87}},
            "ascendant": 100.0,
            "planet_positions": {"Sun": 60.0, "Pluto": 12.0},
            "house_cusps": []
        }"#;
        assert!(serde_json::from_str::<KundaliData>(json).is_err());
    }

    #[test]
    fn derived_insights_pick_matching_bodies() {
        let insights = derive_insights("Strong LEADERSHIP qualities. Venus is well placed.");
        assert_eq!(insights.len(), 10);
        assert_eq!(insights[0], "Personality");
        assert!(insights[1].contains("natural leadership"));
        assert!(insights[5].contains("Venus colours"));
        assert!(insights[3].contains("patience"));
    }

    #[test]
    fn structured_insights_take_precedence() {
        let result = KundaliResult {
            chart_base64: None,
            analysis_text: "leadership".to_string(),
            kundali_data: Some(KundaliData {
                birth_details: ChartBirthDetails {
                    date: "1990-06-15".to_string(),
                    time: "10:30".to_string(),
                    location: ChartLocation {
                        city: "Mumbai".to_string(),
                        country: "India".to_string(),
                        latitude: 19.07,
                        longitude: 72.87,
                    },
                },
                ascendant: 0.0,
                planet_positions: BTreeMap::new(),
                house_cusps: Vec::new(),
                insights: vec!["Heading".to_string(), "Body".to_string()],
            }),
        };
        assert_eq!(result.insights(), vec!["Heading", "Body"]);
    }

    #[test]
    fn cards_drop_unpaired_heading() {
        let flat: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let cards = insight_cards(&flat);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].heading, "a");
        assert_eq!(cards[0].body, "b");
    }
}
