//! Lens models and the conversions they share.
//!
//! The panoramic models (spherical-orthographic, cylindrical, spherical) all
//! map azimuth linearly onto film x and differ only vertically. The helpers
//! here hold the shared horizontal math and the three film/fov relations.

mod cylindrical;
mod fisheye;
mod osphere;
mod perspective;
mod psphere;

pub use cylindrical::CylindricalLens;
pub use fisheye::FisheyeLens;
pub use osphere::OSphereLens;
pub use perspective::PerspectiveLens;
pub use psphere::PSphereLens;

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use panlens_core::film::FILM_TOLERANCE;
use panlens_core::{film_to_normalized, LensParameters, ProjectionError, EPSILON};

/// Rescales a lens-space point so that its largest component is ±1.
///
/// Lenses only see the direction of a point. After rescaling, lengths neither
/// overflow for far points nor underflow for points close to the lens.
pub(crate) fn unit_scale(point: Vec3) -> Result<Vec3, ProjectionError> {
    if !point.is_finite() {
        return Err(ProjectionError::OutOfRange);
    }
    let scale = point.abs().max_element();
    if scale == 0.0 {
        return Err(ProjectionError::DegenerateRadius);
    }
    Ok(point / scale)
}

/// A point decomposed about the vertical axis.
///
/// Lengths are those of the point after [`unit_scale`]; only their ratios
/// are meaningful.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Azimuthal {
    /// Angle from +z toward +x, in radians.
    pub azimuth: f32,
    /// Vertical component.
    pub height: f32,
    /// Distance from the vertical axis.
    pub radius: f32,
    /// Distance from the lens.
    pub distance: f32,
}

/// Decomposes a lens-space point about the vertical axis.
///
/// Points on the vertical axis have no azimuth. Points on the rear seam
/// (straight behind, where azimuth jumps from +180 to -180 degrees) have no
/// single film position.
pub(crate) fn azimuthal(point: Vec3) -> Result<Azimuthal, ProjectionError> {
    let point = unit_scale(point)?;
    let distance = point.length();
    let radius = point.x.hypot(point.z);
    if radius <= EPSILON * distance {
        return Err(ProjectionError::DegenerateRadius);
    }
    if point.z < 0.0 && point.x.abs() <= EPSILON * radius {
        return Err(ProjectionError::BehindCamera);
    }
    Ok(Azimuthal {
        azimuth: point.x.atan2(point.z),
        height: point.y,
        radius,
        distance,
    })
}

/// Turns a film-plane x, in focal lengths, back into an azimuth.
///
/// Beyond half a turn either way the azimuth would wrap around and project
/// onto the opposite side of the film.
pub(crate) fn film_azimuth(x: f32) -> Result<f32, ProjectionError> {
    if x.abs() > PI * (1.0 + FILM_TOLERANCE) {
        return Err(ProjectionError::OutOfRange);
    }
    Ok(x.clamp(-PI, PI))
}

/// Normalizes a film-plane position, refusing anything non-finite.
pub(crate) fn to_film(film: Vec2, params: &LensParameters) -> Result<Vec2, ProjectionError> {
    let point = film_to_normalized(film, params);
    if point.is_finite() {
        Ok(point)
    } else {
        Err(ProjectionError::OutOfRange)
    }
}

// Film linear in angle: film = f * fov.

pub(crate) fn angular_film(fov: f32, focal_length: f32) -> f32 {
    focal_length * fov.to_radians()
}

pub(crate) fn angular_focal_length(fov: f32, film_size: f32) -> f32 {
    film_size / fov.to_radians()
}

pub(crate) fn angular_fov(film_size: f32, focal_length: f32) -> f32 {
    (film_size / focal_length).to_degrees()
}

// Film linear in the tangent of the half angle: film = 2f * tan(fov / 2).

pub(crate) fn tangent_film(fov: f32, focal_length: f32) -> f32 {
    2.0 * focal_length * (fov.to_radians() * 0.5).tan()
}

pub(crate) fn tangent_focal_length(fov: f32, film_size: f32) -> f32 {
    film_size / (2.0 * (fov.to_radians() * 0.5).tan())
}

pub(crate) fn tangent_fov(film_size: f32, focal_length: f32) -> f32 {
    (2.0 * (film_size / (2.0 * focal_length)).atan()).to_degrees()
}

// Film linear in the sine of the half angle: film = 2f * sin(fov / 2).

pub(crate) fn sine_film(fov: f32, focal_length: f32) -> f32 {
    2.0 * focal_length * (fov.to_radians() * 0.5).sin()
}

pub(crate) fn sine_focal_length(fov: f32, film_size: f32) -> f32 {
    film_size / (2.0 * (fov.to_radians() * 0.5).sin())
}

/// NaN when the film is wider than the sphere it images; parameter
/// validation rejects that.
pub(crate) fn sine_fov(film_size: f32, focal_length: f32) -> f32 {
    (2.0 * (film_size / (2.0 * focal_length)).asin()).to_degrees()
}

/// `fov` in (0, max], or (0, max) when `open`.
pub(crate) fn fov_within(fov: f32, max: f32, open: bool) -> bool {
    fov > 0.0 && if open { fov < max } else { fov <= max }
}
