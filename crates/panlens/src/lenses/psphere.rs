//! Spherical lens: linear in azimuth and in elevation.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use panlens_core::film::FILM_TOLERANCE;
use panlens_core::{
    check_domain, normalized_to_film, FovConversion, LensModel, LensParameters, ProjectionError,
};

use super::{
    angular_film, angular_focal_length, angular_fov, azimuthal, film_azimuth, fov_within, to_film,
};
use crate::projection::LensProjection;

/// Equirectangular ("PSphere") lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PSphereLens;

impl FovConversion for PSphereLens {
    fn fov_to_film(&self, fov: f32, focal_length: f32, _horiz: bool) -> f32 {
        angular_film(fov, focal_length)
    }

    fn fov_to_focal_length(&self, fov: f32, film_size: f32, _horiz: bool) -> f32 {
        angular_focal_length(fov, film_size)
    }

    fn film_to_fov(&self, film_size: f32, focal_length: f32, _horiz: bool) -> f32 {
        angular_fov(film_size, focal_length)
    }

    fn fov_in_range(&self, fov: f32, horiz: bool) -> bool {
        fov_within(fov, if horiz { 360.0 } else { 180.0 }, false)
    }
}

impl LensProjection for PSphereLens {
    fn model(&self) -> LensModel {
        LensModel::PSphere
    }

    fn project(&self, point: Vec3, params: &LensParameters) -> Result<Vec2, ProjectionError> {
        let a = azimuthal(point)?;
        let elevation = a.height.atan2(a.radius);
        to_film(
            params.focal_length() * Vec2::new(a.azimuth, elevation),
            params,
        )
    }

    fn extrude_direction(
        &self,
        point: Vec2,
        params: &LensParameters,
    ) -> Result<Vec3, ProjectionError> {
        check_domain(point)?;
        let film = normalized_to_film(point, params) / params.focal_length();
        if film.y.abs() > FRAC_PI_2 * (1.0 + FILM_TOLERANCE) {
            return Err(ProjectionError::OutOfRange);
        }
        let (sin_a, cos_a) = film_azimuth(film.x)?.sin_cos();
        let (sin_e, cos_e) = film.y.clamp(-FRAC_PI_2, FRAC_PI_2).sin_cos();
        Ok(Vec3::new(cos_e * sin_a, sin_e, cos_e * cos_a))
    }
}
