use serde::Serialize;

use super::{house_of, ChartError};
use crate::models::{KundaliData, Planet, ZodiacPosition};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuspRow {
    pub house: u8,
    pub degree: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetRow {
    pub planet: Planet,
    pub glyph: &'static str,
    pub color: &'static str,
    pub degree: String,
    /// Sign placement, e.g. "28° Scorpio"
    pub sign: String,
}

/// Text panels shown next to the diagram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSummary {
    pub ascendant: String,
    pub house_cusps: Vec<CuspRow>,
    pub planets: Vec<PlanetRow>,
    pub birth_details: Vec<String>,
}

impl ChartSummary {
    /// Build the panels. Every one of the nine planets must be present.
    pub fn build(data: &KundaliData) -> Result<Self, ChartError> {
        let house_cusps = data
            .house_cusps
            .iter()
            .enumerate()
            .map(|(i, cusp)| CuspRow {
                house: (i + 1) as u8,
                degree: format!("{:.1}°", cusp),
            })
            .collect();

        let planets = Planet::all()
            .iter()
            .map(|&planet| {
                let degree = *data
                    .planet_positions
                    .get(&planet)
                    .ok_or(ChartError::MissingPlanet(planet))?;
                Ok(PlanetRow {
                    planet,
                    glyph: planet.glyph(),
                    color: planet.color(),
                    degree: format!("{:.1}°", degree),
                    sign: ZodiacPosition::from_longitude(degree).format_degree_sign(),
                })
            })
            .collect::<Result<Vec<_>, ChartError>>()?;

        let details = &data.birth_details;
        let location = &details.location;
        let birth_details = vec![
            format!("{} at {}", details.date, details.time),
            format!("{}, {}", location.city, location.country),
            format!(
                "Lat: {:.2}°, Long: {:.2}°",
                location.latitude, location.longitude
            ),
        ];

        Ok(Self {
            ascendant: format!(
                "Ascendant: House {} ({:.2}°)",
                house_of(data.ascendant),
                data.ascendant
            ),
            house_cusps,
            planets,
            birth_details,
        })
    }
}
