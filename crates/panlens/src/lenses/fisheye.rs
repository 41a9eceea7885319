//! Equidistant fisheye lens: distance from the film center is linear in the
//! angle from the forward axis.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use panlens_core::film::FILM_TOLERANCE;
use panlens_core::{
    check_domain, normalized_to_film, FovConversion, LensModel, LensParameters, ProjectionError,
    EPSILON,
};

use super::{angular_film, angular_focal_length, angular_fov, fov_within, to_film, unit_scale};
use crate::projection::LensProjection;

/// Equidistant fisheye lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FisheyeLens;

impl FovConversion for FisheyeLens {
    fn fov_to_film(&self, fov: f32, focal_length: f32, _horiz: bool) -> f32 {
        angular_film(fov, focal_length)
    }

    fn fov_to_focal_length(&self, fov: f32, film_size: f32, _horiz: bool) -> f32 {
        angular_focal_length(fov, film_size)
    }

    fn film_to_fov(&self, film_size: f32, focal_length: f32, _horiz: bool) -> f32 {
        angular_fov(film_size, focal_length)
    }

    fn fov_in_range(&self, fov: f32, _horiz: bool) -> bool {
        fov_within(fov, 360.0, false)
    }
}

impl LensProjection for FisheyeLens {
    fn model(&self) -> LensModel {
        LensModel::Fisheye
    }

    fn project(&self, point: Vec3, params: &LensParameters) -> Result<Vec2, ProjectionError> {
        let point = unit_scale(point)?;
        let distance = point.length();
        let lateral = point.truncate();
        let rho = lateral.length();
        if rho <= EPSILON * distance {
            if point.z < 0.0 {
                return Err(ProjectionError::BehindCamera);
            }
            return to_film(Vec2::ZERO, params);
        }
        let theta = rho.atan2(point.z);
        to_film(params.focal_length() * theta * lateral / rho, params)
    }

    fn extrude_direction(
        &self,
        point: Vec2,
        params: &LensParameters,
    ) -> Result<Vec3, ProjectionError> {
        check_domain(point)?;
        let film = normalized_to_film(point, params) / params.focal_length();
        let theta = film.length();
        if theta > PI * (1.0 + FILM_TOLERANCE) {
            return Err(ProjectionError::OutOfRange);
        }
        if theta <= EPSILON {
            return Ok(Vec3::Z);
        }
        let (sin_t, cos_t) = theta.min(PI).sin_cos();
        Ok((sin_t * film / theta).extend(cos_t))
    }
}
