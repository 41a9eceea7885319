//! Spherical-orthographic lens.
//!
//! A nonlinear lens with no physical counterpart, used for 360-degree
//! wraparound images without fisheye distortion. Film x is linear in the
//! azimuth, like [`super::CylindricalLens`]; film y is orthographic. See
//! [`VerticalMapping`] for the two vertical conventions.

use glam::{Vec2, Vec3};
use panlens_core::film::FILM_TOLERANCE;
use panlens_core::{
    check_domain, normalized_to_film, FovConversion, LensModel, LensParameters, ProjectionError,
    VerticalMapping,
};

use super::{
    angular_film, angular_focal_length, angular_fov, azimuthal, film_azimuth, fov_within,
    sine_film, sine_focal_length, sine_fov, tangent_film, tangent_focal_length, tangent_fov,
    to_film,
};
use crate::projection::LensProjection;

/// Spherical-orthographic ("OSphere") lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OSphereLens {
    vertical_mapping: VerticalMapping,
}

impl OSphereLens {
    /// Creates a lens with the [`VerticalMapping::Sine`] convention.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the vertical convention.
    #[must_use]
    pub fn with_vertical_mapping(mut self, vertical_mapping: VerticalMapping) -> Self {
        self.vertical_mapping = vertical_mapping;
        self
    }

    pub fn vertical_mapping(&self) -> VerticalMapping {
        self.vertical_mapping
    }
}

impl FovConversion for OSphereLens {
    fn fov_to_film(&self, fov: f32, focal_length: f32, horiz: bool) -> f32 {
        match (horiz, self.vertical_mapping) {
            (true, _) => angular_film(fov, focal_length),
            (false, VerticalMapping::Sine) => sine_film(fov, focal_length),
            (false, VerticalMapping::Height) => tangent_film(fov, focal_length),
        }
    }

    fn fov_to_focal_length(&self, fov: f32, film_size: f32, horiz: bool) -> f32 {
        match (horiz, self.vertical_mapping) {
            (true, _) => angular_focal_length(fov, film_size),
            (false, VerticalMapping::Sine) => sine_focal_length(fov, film_size),
            (false, VerticalMapping::Height) => tangent_focal_length(fov, film_size),
        }
    }

    fn film_to_fov(&self, film_size: f32, focal_length: f32, horiz: bool) -> f32 {
        match (horiz, self.vertical_mapping) {
            (true, _) => angular_fov(film_size, focal_length),
            (false, VerticalMapping::Sine) => sine_fov(film_size, focal_length),
            (false, VerticalMapping::Height) => tangent_fov(film_size, focal_length),
        }
    }

    fn fov_in_range(&self, fov: f32, horiz: bool) -> bool {
        match (horiz, self.vertical_mapping) {
            (true, _) => fov_within(fov, 360.0, false),
            (false, VerticalMapping::Sine) => fov_within(fov, 180.0, false),
            (false, VerticalMapping::Height) => fov_within(fov, 180.0, true),
        }
    }
}

impl LensProjection for OSphereLens {
    fn model(&self) -> LensModel {
        LensModel::OSphere
    }

    fn project(&self, point: Vec3, params: &LensParameters) -> Result<Vec2, ProjectionError> {
        let a = azimuthal(point)?;
        let height = match self.vertical_mapping {
            VerticalMapping::Sine => a.height / a.distance,
            VerticalMapping::Height => a.height / a.radius,
        };
        to_film(params.focal_length() * Vec2::new(a.azimuth, height), params)
    }

    fn extrude_direction(
        &self,
        point: Vec2,
        params: &LensParameters,
    ) -> Result<Vec3, ProjectionError> {
        check_domain(point)?;
        let film = normalized_to_film(point, params) / params.focal_length();
        let (sin_a, cos_a) = film_azimuth(film.x)?.sin_cos();
        match self.vertical_mapping {
            VerticalMapping::Sine => {
                if film.y.abs() > 1.0 + FILM_TOLERANCE {
                    return Err(ProjectionError::OutOfRange);
                }
                let sin_e = film.y.clamp(-1.0, 1.0);
                let cos_e = (1.0 - sin_e * sin_e).max(0.0).sqrt();
                Ok(Vec3::new(cos_e * sin_a, sin_e, cos_e * cos_a))
            }
            VerticalMapping::Height => Ok(Vec3::new(sin_a, film.y, cos_a).normalize()),
        }
    }
}
