//! Mapping between film-plane coordinates and normalized film coordinates.
//!
//! Lens math produces positions on the film in film units (the same units as
//! the focal length). Callers work in normalized coordinates where the film
//! spans [-1, 1] on both axes, shifted by the film offset.

use glam::Vec2;

use crate::error::ProjectionError;
use crate::params::LensParameters;

/// Relative tolerance used to detect singular directions.
pub const EPSILON: f32 = 1e-6;

/// Slack allowed past the film edge before a normalized point is rejected.
pub const FILM_TOLERANCE: f32 = 1e-5;

/// Converts a film-plane position into normalized film coordinates.
pub fn film_to_normalized(film: Vec2, params: &LensParameters) -> Vec2 {
    (film - params.film_offset()) * 2.0 / params.film_size()
}

/// Converts normalized film coordinates back into a film-plane position.
pub fn normalized_to_film(point: Vec2, params: &LensParameters) -> Vec2 {
    point * params.film_size() * 0.5 + params.film_offset()
}

/// Returns whether a normalized point lies on the film.
pub fn is_on_film(point: Vec2) -> bool {
    point.is_finite() && point.abs().max_element() <= 1.0
}

/// Checks that a normalized point may be extruded.
pub fn check_domain(point: Vec2) -> Result<(), ProjectionError> {
    if point.is_finite() && point.abs().max_element() <= 1.0 + FILM_TOLERANCE {
        Ok(())
    } else {
        Err(ProjectionError::OutOfRange)
    }
}
