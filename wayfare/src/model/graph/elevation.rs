use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// elevation samples along a street, as (distance from start, elevation) in meters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ElevationProfile {
    pub points: Vec<(f64, f64)>,
}

impl ElevationProfile {
    pub fn new(points: Vec<(f64, f64)>) -> ElevationProfile {
        ElevationProfile { points }
    }

    /// the same profile seen from the other end of the street
    pub fn reversed(&self) -> ElevationProfile {
        let length = self.points.last().map(|(d, _)| *d).unwrap_or_default();
        let points = self
            .points
            .iter()
            .rev()
            .map(|(d, z)| (length - d, *z))
            .collect();
        ElevationProfile { points }
    }
}

/// slope-derived cost factors of one street, computed once when the street
/// is built. each factor scales the street length into an effective length.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ElevationExtension {
    /// steepest uphill or downhill grade, rise over run
    pub max_slope: f64,
    /// scales length into the distance a cyclist covers in the same time
    pub slope_speed_factor: f64,
    /// scales length into the effort of cycling it
    pub slope_work_factor: f64,
    /// scales length into the distance a pedestrian covers in the same time
    pub effective_walk_factor: f64,
    /// street is tagged to ignore elevation for cost, max_slope still applies
    pub flattened: bool,
}

impl ElevationExtension {
    /// summarizes a profile into cost factors.
    ///
    /// # Arguments
    ///
    /// * `profile`   - elevation samples along the street
    /// * `flattened` - keep the slope for accessibility checks but cost the street as flat
    ///
    /// # Returns
    ///
    /// * `None` for profiles with fewer than two samples or zero length
    pub fn from_profile(profile: &ElevationProfile, flattened: bool) -> Option<ElevationExtension> {
        let segments = profile
            .points
            .iter()
            .tuple_windows()
            .filter_map(|((d0, z0), (d1, z1))| {
                let run = d1 - d0;
                (run > 0.0).then(|| (run, (z1 - z0) / run))
            })
            .collect_vec();
        let length: f64 = segments.iter().map(|(run, _)| run).sum();
        if length <= 0.0 {
            return None;
        }
        let max_slope = segments
            .iter()
            .map(|(_, slope)| slope.abs())
            .fold(0.0, f64::max);
        if flattened {
            return Some(ElevationExtension {
                max_slope,
                ..ElevationExtension::flat()
            });
        }
        let weighted = |f: fn(f64) -> f64| {
            segments.iter().map(|(run, slope)| run * f(*slope)).sum::<f64>() / length
        };
        Some(ElevationExtension {
            max_slope,
            slope_speed_factor: weighted(bike_speed_factor),
            slope_work_factor: weighted(bike_work_factor),
            effective_walk_factor: weighted(walk_factor),
            flattened,
        })
    }

    pub fn flat() -> ElevationExtension {
        ElevationExtension {
            max_slope: 0.0,
            slope_speed_factor: 1.0,
            slope_work_factor: 1.0,
            effective_walk_factor: 1.0,
            flattened: true,
        }
    }
}

/// cyclists slow down uphill and gain some speed downhill, capped
fn bike_speed_factor(slope: f64) -> f64 {
    if slope > 0.0 {
        1.0 + 10.0 * slope
    } else {
        (1.0 + 2.0 * slope).max(0.7)
    }
}

/// climbing costs effort, descending costs nothing extra
fn bike_work_factor(slope: f64) -> f64 {
    1.0 + 15.0 * slope.max(0.0)
}

/// ratio of flat walking speed to walking speed on this grade (Tobler's hiking function)
fn walk_factor(slope: f64) -> f64 {
    let flat = (-3.5 * 0.05_f64).exp();
    let sloped = (-3.5 * (slope + 0.05).abs()).exp();
    flat / sloped
}
