use std::collections::BTreeMap;

use super::{
    arc_midpoint, house_of, house_span, ChartError, ChartGeometry, Point, DEGREE_LABEL_OFFSET,
    PLANET_STACK_STEP,
};
use crate::models::{KundaliData, Planet};

/// Radial line through a house cusp with its degree label
#[derive(Debug, Clone, PartialEq)]
pub struct CuspLine {
    pub degree: f64,
    pub start: Point,
    pub end: Point,
    pub label: Point,
}

/// House number drawn at the middle of the house's cusp span
#[derive(Debug, Clone, PartialEq)]
pub struct HouseLabel {
    pub house: u8,
    /// Midpoint of the house's cusp span, in degrees
    pub angle: f64,
    pub anchor: Point,
}

/// A planet glyph stacked under its house label
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetPlacement {
    pub planet: Planet,
    pub degree: f64,
    /// Equal-house number, `floor(degree / 30) + 1`
    pub house: u8,
    /// Angle of the house label the glyph hangs under
    pub anchor_angle: f64,
    pub glyph: Point,
    pub degree_label: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AscendantMarker {
    pub degree: f64,
    pub house: u8,
    pub tip: Point,
    pub label: Point,
}

/// Every computed coordinate of a chart diagram
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub geometry: ChartGeometry,
    pub cusps: [f64; 12],
    pub cusp_lines: Vec<CuspLine>,
    pub houses: Vec<HouseLabel>,
    pub planets: Vec<PlanetPlacement>,
    pub ascendant: AscendantMarker,
}

impl ChartLayout {
    pub fn compute(data: &KundaliData) -> Result<Self, ChartError> {
        Self::with_geometry(data, ChartGeometry::default())
    }

    pub fn with_geometry(data: &KundaliData, geometry: ChartGeometry) -> Result<Self, ChartError> {
        let cusps: [f64; 12] = data
            .house_cusps
            .as_slice()
            .try_into()
            .map_err(|_| ChartError::HouseCuspCount(data.house_cusps.len()))?;

        check_finite("ascendant", data.ascendant)?;
        for (i, cusp) in cusps.iter().enumerate() {
            check_finite(&format!("house cusp {}", i + 1), *cusp)?;
        }
        for (planet, degree) in &data.planet_positions {
            check_finite(&planet.to_string(), *degree)?;
        }

        let radius = geometry.radius;

        let cusp_lines = cusps
            .iter()
            .map(|&cusp| CuspLine {
                degree: cusp,
                start: geometry.point(cusp, radius),
                end: geometry.point(cusp + 180.0, radius),
                label: geometry.point(cusp - 15.0, radius * 1.1),
            })
            .collect();

        let houses: Vec<HouseLabel> = (1..=12u8)
            .map(|house| {
                let (start, end) = house_span(&cusps, house);
                let angle = arc_midpoint(start, end);
                HouseLabel {
                    house,
                    angle,
                    anchor: geometry.point(angle, radius * 0.75),
                }
            })
            .collect();

        // Planets grouped by equal house, each group in planet order
        let mut by_house: BTreeMap<u8, Vec<(Planet, f64)>> = BTreeMap::new();
        for (&planet, &degree) in &data.planet_positions {
            by_house
                .entry(house_of(degree))
                .or_default()
                .push((planet, degree));
        }

        let mut planets = Vec::with_capacity(data.planet_positions.len());
        for (house, members) in by_house {
            let label = &houses[usize::from(house) - 1];
            for (index, (planet, degree)) in members.into_iter().enumerate() {
                let y = label.anchor.y + (index as f64 + 1.0) * PLANET_STACK_STEP;
                planets.push(PlanetPlacement {
                    planet,
                    degree,
                    house,
                    anchor_angle: label.angle,
                    glyph: Point {
                        x: label.anchor.x,
                        y,
                    },
                    degree_label: Point {
                        x: label.anchor.x + DEGREE_LABEL_OFFSET,
                        y,
                    },
                });
            }
        }

        let tip = geometry.point(data.ascendant, radius);
        let ascendant = AscendantMarker {
            degree: data.ascendant,
            house: house_of(data.ascendant),
            tip,
            label: Point {
                x: tip.x,
                y: tip.y - 25.0,
            },
        };

        Ok(Self {
            geometry,
            cusps,
            cusp_lines,
            houses,
            planets,
            ascendant,
        })
    }

    pub fn placement(&self, planet: Planet) -> Option<&PlanetPlacement> {
        self.planets.iter().find(|p| p.planet == planet)
    }
}

fn check_finite(what: &str, value: f64) -> Result<(), ChartError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ChartError::NonFinite {
            what: what.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::arc_contains;
    use crate::models::{ChartBirthDetails, ChartLocation};
    use approx::assert_abs_diff_eq;

    fn chart(cusps: Vec<f64>, positions: &[(Planet, f64)]) -> KundaliData {
        KundaliData {
            birth_details: ChartBirthDetails {
                date: "1990-06-15".into(),
                time: "10:30".into(),
                location: ChartLocation {
                    city: "Mumbai".into(),
                    country: "India".into(),
                    latitude: 19.076,
                    longitude: 72.8777,
                },
            },
            ascendant: 95.5,
            planet_positions: positions.iter().copied().collect(),
            house_cusps: cusps,
            insights: Vec::new(),
        }
    }

    fn shifted_cusps(offset: f64) -> Vec<f64> {
        (0..12).map(|i| (offset + i as f64 * 30.0).rem_euclid(360.0)).collect()
    }

    #[test]
    fn rejects_wrong_cusp_count() {
        let data = chart(vec![0.0; 11], &[]);
        assert!(matches!(
            ChartLayout::compute(&data),
            Err(ChartError::HouseCuspCount(11))
        ));
    }

    #[test]
    fn rejects_nan_degrees() {
        let data = chart(shifted_cusps(0.0), &[(Planet::Sun, f64::NAN)]);
        assert!(matches!(
            ChartLayout::compute(&data),
            Err(ChartError::NonFinite { .. })
        ));
    }

    #[test]
    fn planets_in_one_house_stack_downwards() {
        let data = chart(
            shifted_cusps(0.0),
            &[(Planet::Sun, 62.0), (Planet::Mercury, 75.0), (Planet::Venus, 88.0)],
        );
        let layout = ChartLayout::compute(&data).unwrap();
        let label = &layout.houses[2];
        assert_eq!(label.house, 3);

        let sun = layout.placement(Planet::Sun).unwrap();
        let mercury = layout.placement(Planet::Mercury).unwrap();
        let venus = layout.placement(Planet::Venus).unwrap();
        assert_abs_diff_eq!(sun.glyph.y, label.anchor.y + 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mercury.glyph.y, label.anchor.y + 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(venus.glyph.y, label.anchor.y + 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(venus.degree_label.x, label.anchor.x + 30.0, epsilon = 1e-9);
    }

    #[test]
    fn house_label_sits_at_three_quarter_radius() {
        let data = chart(shifted_cusps(0.0), &[]);
        let layout = ChartLayout::compute(&data).unwrap();
        let first = &layout.houses[0];
        assert_abs_diff_eq!(first.angle, 15.0);
        let dx = first.anchor.x - 200.0;
        let dy = first.anchor.y - 200.0;
        assert_abs_diff_eq!((dx * dx + dy * dy).sqrt(), 120.0, epsilon = 1e-9);
    }

    #[test]
    fn glyph_anchor_lies_in_its_house_span() {
        // Cusps rotated so house 12 wraps through 0 degrees
        let cusps = shifted_cusps(10.0);
        let mut degree = 0.0;
        while degree < 360.0 {
            let data = chart(cusps.clone(), &[(Planet::Moon, degree)]);
            let layout = ChartLayout::compute(&data).unwrap();
            let moon = layout.placement(Planet::Moon).unwrap();
            assert_eq!(moon.house, house_of(degree));
            let (start, end) = house_span(&layout.cusps, moon.house);
            assert!(
                arc_contains(start, end, moon.anchor_angle),
                "degree {} anchored at {} outside {}..{}",
                degree,
                moon.anchor_angle,
                start,
                end
            );
            degree += 0.5;
        }
    }

    #[test]
    fn equal_house_differs_from_cusp_house() {
        // Moon at 5 degrees sits before the first cusp (10 degrees) but is still
        // assigned to house 1 by the equal-house rule
        let data = chart(shifted_cusps(10.0), &[(Planet::Moon, 5.0)]);
        let layout = ChartLayout::compute(&data).unwrap();
        assert_eq!(layout.placement(Planet::Moon).unwrap().house, 1);
    }

    #[test]
    fn ascendant_label_above_tip() {
        let data = chart(shifted_cusps(0.0), &[]);
        let layout = ChartLayout::compute(&data).unwrap();
        assert_eq!(layout.ascendant.house, 4);
        assert_abs_diff_eq!(layout.ascendant.label.y, layout.ascendant.tip.y - 25.0);
    }
}
