//! Bounds and center computation over coordinate sets.
//!
//! Bounds are always the plain lat/lng extrema. Centers are never derived
//! from bounds: the engine has its own notion of "center" for its animation
//! loop and the map has to agree with it, so [`compute_center`] hands the
//! coordinates to a [`CenterAlgorithm`] supplied by the engine.

use crate::core::geo::{LatLng, LatLngBounds};
use crate::{Result, ViewportError};
use geo::{BoundingRect, Centroid, MultiPoint, Point};

/// A centroid algorithm, usually owned by the external engine.
pub trait CenterAlgorithm {
    /// Returns the center of `coords`. Never called with an empty slice.
    fn find_center(&self, coords: &[LatLng]) -> LatLng;
}

impl<T: CenterAlgorithm + ?Sized> CenterAlgorithm for &T {
    fn find_center(&self, coords: &[LatLng]) -> LatLng {
        (**self).find_center(coords)
    }
}

/// Minimal rectangle enclosing every coordinate.
pub fn compute_bounds(coords: &[LatLng]) -> Result<LatLngBounds> {
    let points: MultiPoint<f64> = coords.iter().copied().map(Point::from).collect();
    let rect = points.bounding_rect().ok_or(ViewportError::EmptyInput)?;

    Ok(LatLngBounds::from_coords(
        rect.min().y,
        rect.min().x,
        rect.max().y,
        rect.max().x,
    ))
}

/// Center of `coords` as defined by `algorithm`.
pub fn compute_center<A>(coords: &[LatLng], algorithm: &A) -> Result<LatLng>
where
    A: CenterAlgorithm + ?Sized,
{
    if coords.is_empty() {
        return Err(ViewportError::EmptyInput);
    }
    Ok(algorithm.find_center(coords))
}

/// Shortest mean vector still treated as having a direction
const MIN_MEAN_VECTOR_LENGTH: f64 = 1e-9;

/// Geographic midpoint: the normalized mean of the coordinates' unit vectors
/// on the sphere. Handles sets straddling the antimeridian.
///
/// Sets whose vectors cancel out (e.g. two antipodal points) have no
/// geographic midpoint; they fall back to [`PlanarCentroid`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GeographicMidpoint;

impl CenterAlgorithm for GeographicMidpoint {
    fn find_center(&self, coords: &[LatLng]) -> LatLng {
        let sum = coords
            .iter()
            .map(|coord| coord.to_unit_vector())
            .fold([0.0; 3], |acc, v| [acc[0] + v[0], acc[1] + v[1], acc[2] + v[2]]);
        let n = coords.len() as f64;
        let mean = [sum[0] / n, sum[1] / n, sum[2] / n];

        let length = mean.iter().map(|c| c * c).sum::<f64>().sqrt();
        if length < MIN_MEAN_VECTOR_LENGTH {
            log::debug!("Coordinates cancel out on the sphere, using planar centroid");
            return PlanarCentroid.find_center(coords);
        }
        LatLng::from_vector(mean)
    }
}

/// Flat lat/lng centroid, the arithmetic mean of the points.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarCentroid;

impl CenterAlgorithm for PlanarCentroid {
    fn find_center(&self, coords: &[LatLng]) -> LatLng {
        let points: MultiPoint<f64> = coords.iter().copied().map(Point::from).collect();
        points.centroid().map(LatLng::from).unwrap_or_default()
    }
}
