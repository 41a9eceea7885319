//! Cylindrical lens: azimuth-linear horizontally, perspective vertically.

use glam::{Vec2, Vec3};
use panlens_core::{
    check_domain, normalized_to_film, FovConversion, LensModel, LensParameters, ProjectionError,
};

use super::{
    angular_film, angular_focal_length, angular_fov, azimuthal, film_azimuth, fov_within,
    tangent_film, tangent_focal_length, tangent_fov, to_film,
};
use crate::projection::LensProjection;

/// Projects onto a cylinder around the vertical axis, unrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CylindricalLens;

impl FovConversion for CylindricalLens {
    fn fov_to_film(&self, fov: f32, focal_length: f32, horiz: bool) -> f32 {
        if horiz {
            angular_film(fov, focal_length)
        } else {
            tangent_film(fov, focal_length)
        }
    }

    fn fov_to_focal_length(&self, fov: f32, film_size: f32, horiz: bool) -> f32 {
        if horiz {
            angular_focal_length(fov, film_size)
        } else {
            tangent_focal_length(fov, film_size)
        }
    }

    fn film_to_fov(&self, film_size: f32, focal_length: f32, horiz: bool) -> f32 {
        if horiz {
            angular_fov(film_size, focal_length)
        } else {
            tangent_fov(film_size, focal_length)
        }
    }

    fn fov_in_range(&self, fov: f32, horiz: bool) -> bool {
        if horiz {
            fov_within(fov, 360.0, false)
        } else {
            fov_within(fov, 180.0, true)
        }
    }
}

impl LensProjection for CylindricalLens {
    fn model(&self) -> LensModel {
        LensModel::Cylindrical
    }

    fn project(&self, point: Vec3, params: &LensParameters) -> Result<Vec2, ProjectionError> {
        let a = azimuthal(point)?;
        to_film(
            params.focal_length() * Vec2::new(a.azimuth, a.height / a.radius),
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
        let (sin_a, cos_a) = film_azimuth(film.x)?.sin_cos();
        Ok(Vec3::new(sin_a, film.y, cos_a).normalize())
    }
}
