//! Birth-chart diagram rendering
//!
//! Maps a [`KundaliData`](crate::models::KundaliData) record onto a circular
//! diagram. Degree 0 points to the top of the diagram and degrees grow
//! clockwise. Everything here is a pure function of its input.

mod layout;
mod summary;
mod svg;

pub use layout::{AscendantMarker, ChartLayout, CuspLine, HouseLabel, PlanetPlacement};
pub use summary::{ChartSummary, CuspRow, PlanetRow};
pub use svg::{render_svg, write_svg};

use crate::models::Planet;

/// Side of the square drawing area
pub const CHART_SIZE: f64 = 400.0;
/// Vertical distance between planets stacked in one house
pub const PLANET_STACK_STEP: f64 = 30.0;
/// Horizontal offset of a planet's degree annotation
pub const DEGREE_LABEL_OFFSET: f64 = 30.0;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("expected 12 house cusps, got {0}")]
    HouseCuspCount(usize),
    #[error("planet position missing for {0}")]
    MissingPlanet(Planet),
    #[error("non-finite degree value {value} for {what}")]
    NonFinite { what: String, value: f64 },
    #[error("failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Fixed circle geometry of the diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub size: f64,
    pub center: f64,
    pub radius: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self::new(CHART_SIZE)
    }
}

impl ChartGeometry {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            center: size / 2.0,
            radius: size * 0.4,
        }
    }

    /// Point at astrological `degrees` on a circle of `radius` around the center
    pub fn point(&self, degrees: f64, radius: f64) -> Point {
        let radians = (degrees - 90.0).to_radians();
        Point {
            x: self.center + radius * radians.cos(),
            y: self.center + radius * radians.sin(),
        }
    }
}

/// Equal-house placement: house `floor(d / 30) + 1`, in 1..=12.
///
/// This ignores the actual cusps of the chart; see [`house_span`] for the
/// cusp-bounded span used to anchor house labels.
pub fn house_of(degrees: f64) -> u8 {
    let normalized = degrees.rem_euclid(360.0);
    ((normalized / 30.0).floor() as u8).min(11) + 1
}

/// Start and end cusp of `house` (1..=12); the last house wraps to the first cusp
pub fn house_span(cusps: &[f64; 12], house: u8) -> (f64, f64) {
    let i = usize::from(house.clamp(1, 12)) - 1;
    (cusps[i], cusps[(i + 1) % 12])
}

/// Angle halfway along the clockwise arc from `start` to `end`, in [0, 360)
pub fn arc_midpoint(start: f64, end: f64) -> f64 {
    let sweep = (end - start).rem_euclid(360.0);
    (start + sweep / 2.0).rem_euclid(360.0)
}

/// Whether `degrees` lies on the clockwise arc from `start` to `end`
pub fn arc_contains(start: f64, end: f64, degrees: f64) -> bool {
    let sweep = (end - start).rem_euclid(360.0);
    let offset = (degrees - start).rem_euclid(360.0);
    offset <= sweep
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_degrees_points_up() {
        let geometry = ChartGeometry::default();
        let top = geometry.point(0.0, geometry.radius);
        assert_abs_diff_eq!(top.x, 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(top.y, 40.0, epsilon = 1e-9);

        let right = geometry.point(90.0, geometry.radius);
        assert_abs_diff_eq!(right.x, 360.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.y, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn equal_house_boundaries() {
        assert_eq!(house_of(0.0), 1);
        assert_eq!(house_of(29.999), 1);
        assert_eq!(house_of(30.0), 2);
        assert_eq!(house_of(359.999), 12);
        assert_eq!(house_of(360.0), 1);
        assert_eq!(house_of(-1.0), 12);
    }

    #[test]
    fn midpoint_follows_wraparound() {
        assert_abs_diff_eq!(arc_midpoint(30.0, 60.0), 45.0);
        assert_abs_diff_eq!(arc_midpoint(330.0, 0.0), 345.0);
        assert_abs_diff_eq!(arc_midpoint(340.0, 20.0), 0.0);
        assert!(arc_contains(340.0, 20.0, 5.0));
        assert!(!arc_contains(340.0, 20.0, 180.0));
    }

    #[test]
    fn span_of_last_house_wraps() {
        let cusps = [
            0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0,
        ];
        assert_eq!(house_span(&cusps, 1), (0.0, 30.0));
        assert_eq!(house_span(&cusps, 12), (330.0, 0.0));
    }
}
