use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Zodiac signs in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Get sign from ecliptic longitude (0-360 degrees)
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        let sign_index = (normalized / 30.0).floor() as usize;
        Self::from_index(sign_index)
    }

    /// Get sign from index (0 = Aries, 11 = Pisces)
    pub fn from_index(index: usize) -> Self {
        Self::all()[index % 12]
    }

    /// Get sign index (0 = Aries, 11 = Pisces)
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn all() -> &'static [ZodiacSign; 12] {
        &[
            ZodiacSign::Aries,
            ZodiacSign::Taurus,
            ZodiacSign::Gemini,
            ZodiacSign::Cancer,
            ZodiacSign::Leo,
            ZodiacSign::Virgo,
            ZodiacSign::Libra,
            ZodiacSign::Scorpio,
            ZodiacSign::Sagittarius,
            ZodiacSign::Capricorn,
            ZodiacSign::Aquarius,
            ZodiacSign::Pisces,
        ]
    }

    /// Lowercase path segment used by the daily horoscope endpoint
    pub fn slug(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }

    /// Static profile shown on the horoscope page
    pub fn profile(&self) -> SignProfile {
        let (dates, element, ruling_planet, symbol, traits, description) = match self {
            ZodiacSign::Aries => (
                "March 21 - April 19",
                Element::Fire,
                "Mars",
                "♈",
                ["Confident", "Courageous", "Enthusiastic", "Impulsive", "Natural leader"],
                "Aries is the first sign of the zodiac, representing new beginnings, leadership, and initiative. They are dynamic individuals known for their pioneering spirit and fearless approach to life.",
            ),
            ZodiacSign::Taurus => (
                "April 20 - May 20",
                Element::Earth,
                "Venus",
                "♉",
                ["Patient", "Reliable", "Determined", "Practical", "Sensual"],
                "Taurus is the steady, stable sign of the zodiac. They are known for their practicality, reliability, and appreciation for beauty and comfort in all forms.",
            ),
            ZodiacSign::Gemini => (
                "May 21 - June 20",
                Element::Air,
                "Mercury",
                "♊",
                ["Versatile", "Curious", "Communicative", "Witty", "Adaptable"],
                "Gemini is the twin sign of the zodiac, representing duality and communication. They are intellectual, quick-witted, and excellent communicators.",
            ),
            ZodiacSign::Cancer => (
                "June 21 - July 22",
                Element::Water,
                "Moon",
                "♋",
                ["Nurturing", "Protective", "Intuitive", "Emotional", "Home-loving"],
                "Cancer is the nurturing mother of the zodiac. They are deeply emotional, intuitive, and connected to home and family life.",
            ),
            ZodiacSign::Leo => (
                "July 23 - August 22",
                Element::Fire,
                "Sun",
                "♌",
                ["Generous", "Creative", "Enthusiastic", "Dramatic", "Proud"],
                "Leo is the royal sign of the zodiac. They are natural leaders with a flair for drama and creativity, known for their warmth and generosity.",
            ),
            ZodiacSign::Virgo => (
                "August 23 - September 22",
                Element::Earth,
                "Mercury",
                "♍",
                ["Analytical", "Practical", "Diligent", "Modest", "Helpful"],
                "Virgo is the perfectionist of the zodiac. They are detail-oriented, practical, and always striving for improvement in themselves and others.",
            ),
            ZodiacSign::Libra => (
                "September 23 - October 22",
                Element::Air,
                "Venus",
                "♎",
                ["Diplomatic", "Harmonious", "Fair", "Social", "Artistic"],
                "Libra is the balanced judge of the zodiac. They seek harmony and fairness in all things, with a natural appreciation for beauty and relationships.",
            ),
            ZodiacSign::Scorpio => (
                "October 23 - November 21",
                Element::Water,
                "Pluto",
                "♏",
                ["Intense", "Passionate", "Strategic", "Perceptive", "Transformative"],
                "Scorpio is the intense investigator of the zodiac. They are deeply passionate and transformative, with an ability to see beneath the surface.",
            ),
            ZodiacSign::Sagittarius => (
                "November 22 - December 21",
                Element::Fire,
                "Jupiter",
                "♐",
                ["Adventurous", "Optimistic", "Philosophical", "Direct", "Honest"],
                "Sagittarius is the explorer of the zodiac. They are philosophical seekers of truth and adventure, always looking to expand their horizons.",
            ),
            ZodiacSign::Capricorn => (
                "December 22 - January 19",
                Element::Earth,
                "Saturn",
                "♑",
                ["Ambitious", "Disciplined", "Patient", "Practical", "Responsible"],
                "Capricorn is the achiever of the zodiac. They are ambitious and disciplined, with a strong sense of responsibility and determination.",
            ),
            ZodiacSign::Aquarius => (
                "January 20 - February 18",
                Element::Air,
                "Uranus",
                "♒",
                ["Innovative", "Progressive", "Original", "Humanitarian", "Independent"],
                "Aquarius is the visionary of the zodiac. They are forward-thinking innovators who value independence and humanitarian causes.",
            ),
            ZodiacSign::Pisces => (
                "February 19 - March 20",
                Element::Water,
                "Neptune",
                "♓",
                ["Compassionate", "Artistic", "Intuitive", "Gentle", "Musical"],
                "Pisces is the mystic of the zodiac. They are deeply intuitive and compassionate, with a strong connection to the spiritual and artistic realms.",
            ),
        };

        SignProfile {
            sign: *self,
            dates,
            element,
            ruling_planet,
            symbol,
            traits,
            description,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ZodiacSign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ZodiacSign::all()
            .iter()
            .copied()
            .find(|sign| sign.slug() == wanted)
            .ok_or_else(|| format!("Unknown zodiac sign: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Descriptive card for a zodiac sign
#[derive(Debug, Clone, Serialize)]
pub struct SignProfile {
    pub sign: ZodiacSign,
    pub dates: &'static str,
    pub element: Element,
    pub ruling_planet: &'static str,
    pub symbol: &'static str,
    pub traits: [&'static str; 5],
    pub description: &'static str,
}

/// The nine grahas reported by the kundali backend.
///
/// Serialized with the exact capitalized keys the backend uses in
/// `planet_positions`, so an unknown or misspelled key is rejected at decode time.
/// Declaration order is the display order of the summary panel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

impl Planet {
    /// Get all planets for iteration
    pub fn all() -> &'static [Planet; 9] {
        &[
            Planet::Sun,
            Planet::Moon,
            Planet::Mars,
            Planet::Mercury,
            Planet::Jupiter,
            Planet::Venus,
            Planet::Saturn,
            Planet::Rahu,
            Planet::Ketu,
        ]
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Planet::Sun => "☉",
            Planet::Moon => "☽",
            Planet::Mars => "♂",
            Planet::Mercury => "☿",
            Planet::Jupiter => "♃",
            Planet::Venus => "♀",
            Planet::Saturn => "♄",
            Planet::Rahu => "☊",
            Planet::Ketu => "☋",
        }
    }

    /// Fill color of the glyph in the chart and summary panel
    pub fn color(&self) -> &'static str {
        match self {
            Planet::Sun => "#eab308",
            Planet::Moon => "#93c5fd",
            Planet::Mars => "#ef4444",
            Planet::Mercury => "#4ade80",
            Planet::Jupiter => "#fb923c",
            Planet::Venus => "#f472b6",
            Planet::Saturn => "#818cf8",
            Planet::Rahu => "#c084fc",
            Planet::Ketu => "#2dd4bf",
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mars => "Mars",
            Planet::Mercury => "Mercury",
            Planet::Jupiter => "Jupiter",
            Planet::Venus => "Venus",
            Planet::Saturn => "Saturn",
            Planet::Rahu => "Rahu",
            Planet::Ketu => "Ketu",
        };
        write!(f, "{}", name)
    }
}

/// A position in the zodiac with sign and degree
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ZodiacPosition {
    pub sign: ZodiacSign,
    /// Degree within the sign (0-29.999...)
    pub degree: f64,
    /// Full ecliptic longitude (0-360)
    pub longitude: f64,
}

impl ZodiacPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        let sign = ZodiacSign::from_longitude(normalized);
        let degree = normalized - sign.index() as f64 * 30.0;
        Self {
            sign,
            degree,
            longitude: normalized,
        }
    }

    /// Format as "X° Sign" (e.g., "28° Scorpio")
    pub fn format_degree_sign(&self) -> String {
        format!("{}° {}", self.degree.floor() as i32, self.sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_from_longitude_wraps() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(359.9), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_longitude(365.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(-10.0), ZodiacSign::Pisces);
    }

    #[test]
    fn sign_parses_case_insensitively() {
        assert_eq!("Leo".parse::<ZodiacSign>(), Ok(ZodiacSign::Leo));
        assert_eq!(" sagittarius ".parse::<ZodiacSign>(), Ok(ZodiacSign::Sagittarius));
        assert!("ophiuchus".parse::<ZodiacSign>().is_err());
    }

    #[test]
    fn every_sign_has_a_profile() {
        for sign in ZodiacSign::all() {
            let profile = sign.profile();
            assert_eq!(profile.sign, *sign);
            assert!(!profile.description.is_empty());
        }
        assert_eq!(ZodiacSign::Scorpio.profile().ruling_planet, "Pluto");
    }

    #[test]
    fn planet_keys_match_backend_names() {
        let json = serde_json::to_string(&Planet::Rahu).unwrap();
        assert_eq!(json, "\"Rahu\"");
        assert!(serde_json::from_str::<Planet>("\"Uranus\"").is_err());
        assert!(serde_json::from_str::<Planet>("\"sun\"").is_err());
    }

    #[test]
    fn position_formats_degree_within_sign() {
        let pos = ZodiacPosition::from_longitude(238.4);
        assert_eq!(pos.sign, ZodiacSign::Scorpio);
        assert_eq!(pos.format_degree_sign(), "28° Scorpio");
    }
}
