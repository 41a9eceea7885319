//! Pinhole perspective lens.

use glam::{Vec2, Vec3};
use panlens_core::{
    check_domain, normalized_to_film, FovConversion, LensModel, LensParameters, ProjectionError,
    EPSILON,
};

use super::{fov_within, tangent_film, tangent_focal_length, tangent_fov, to_film, unit_scale};
use crate::projection::LensProjection;

/// Ordinary perspective lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerspectiveLens;

impl FovConversion for PerspectiveLens {
    fn fov_to_film(&self, fov: f32, focal_length: f32, _horiz: bool) -> f32 {
        tangent_film(fov, focal_length)
    }

    fn fov_to_focal_length(&self, fov: f32, film_size: f32, _horiz: bool) -> f32 {
        tangent_focal_length(fov, film_size)
    }

    fn film_to_fov(&self, film_size: f32, focal_length: f32, _horiz: bool) -> f32 {
        tangent_fov(film_size, focal_length)
    }

    fn fov_in_range(&self, fov: f32, _horiz: bool) -> bool {
        fov_within(fov, 180.0, true)
    }
}

impl LensProjection for PerspectiveLens {
    fn model(&self) -> LensModel {
        LensModel::Perspective
    }

    fn project(&self, point: Vec3, params: &LensParameters) -> Result<Vec2, ProjectionError> {
        let point = unit_scale(point)?;
        if point.z <= EPSILON * point.length() {
            return Err(ProjectionError::BehindCamera);
        }
        to_film(params.focal_length() * point.truncate() / point.z, params)
    }

    fn extrude_direction(
        &self,
        point: Vec2,
        params: &LensParameters,
    ) -> Result<Vec3, ProjectionError> {
        check_domain(point)?;
        let film = normalized_to_film(point, params) / params.focal_length();
        Ok(film.extend(1.0).normalize())
    }
}
