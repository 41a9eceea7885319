//! A lens value: kind, parameters and orientation.
//!
//! [`Lens`] is what the rest of an engine holds. It owns the near and far
//! distances and the lens orientation, and keeps field of view, focal length
//! and film size consistent for its kind. Like [`LensParameters`] it is
//! immutable: setters return a new lens.

use glam::{Mat3, Quat, Vec2, Vec3};
use panlens_core::{
    is_on_film, LensConfig, LensModel, LensParameters, LensUniforms, PanlensError,
    ProjectionError, Result,
};

use crate::kind::LensKind;
use crate::projection::LensProjection;

/// A lens with its parameters and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    kind: LensKind,
    params: LensParameters,
    /// Lens-to-world rotation.
    orientation: Quat,
}

impl Lens {
    /// Creates a lens from a field of view (degrees) and a focal length.
    pub fn from_fov(kind: impl Into<LensKind>, fov: Vec2, focal_length: f32) -> Result<Self> {
        let kind = kind.into();
        let params = LensParameters::from_fov(&kind, fov, focal_length)?;
        Ok(Self::assemble(kind, params))
    }

    /// Creates a lens from a film size and a focal length.
    pub fn from_film_size(
        kind: impl Into<LensKind>,
        film_size: Vec2,
        focal_length: f32,
    ) -> Result<Self> {
        let kind = kind.into();
        let params = LensParameters::from_film_size(&kind, film_size, focal_length)?;
        Ok(Self::assemble(kind, params))
    }

    /// Builds a lens from a configuration.
    pub fn from_config(config: &LensConfig) -> Result<Self> {
        Self::resolve(config).map_err(|err| {
            log::warn!("rejected {} lens configuration: {err}", config.model.name());
            err
        })
    }

    fn resolve(config: &LensConfig) -> Result<Self> {
        let kind = LensKind::from_model(config.model, config.vertical_mapping);
        let params = match (config.fov, config.focal_length, config.film_size) {
            (Some(fov), Some(focal_length), film_size) => {
                if film_size.is_some() {
                    log::warn!(
                        "fov, focal length and film size all given; film size {} ignored",
                        film_size.unwrap_or_default()
                    );
                }
                LensParameters::from_fov(&kind, fov, focal_length)?
            }
            (None, focal_length, Some(film_size)) => {
                LensParameters::from_film_size(&kind, film_size, focal_length.unwrap_or(1.0))?
            }
            (Some(fov), None, Some(film_size)) => {
                LensParameters::from_fov_and_film_width(&kind, fov, film_size.x)?
            }
            (fov, focal_length, None) => LensParameters::from_fov(
                &kind,
                fov.unwrap_or_else(|| config.model.default_fov()),
                focal_length.unwrap_or(1.0),
            )?,
        };
        let params = params
            .with_film_offset(config.film_offset)?
            .with_near_far(config.near, config.far)?;
        Ok(Self::assemble(kind, params))
    }

    fn assemble(kind: LensKind, params: LensParameters) -> Self {
        Self {
            kind,
            params,
            orientation: Quat::IDENTITY,
        }
    }

    pub fn kind(&self) -> LensKind {
        self.kind
    }

    pub fn model(&self) -> LensModel {
        self.kind.model()
    }

    pub fn params(&self) -> &LensParameters {
        &self.params
    }

    /// Lens-to-world rotation.
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// The direction the lens looks along.
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    /// The lens's up direction.
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Projects a point, relative to the lens position, onto normalized film
    /// coordinates.
    pub fn project(&self, point: Vec3) -> std::result::Result<Vec2, ProjectionError> {
        self.kind
            .project(self.orientation.inverse() * point, &self.params)
    }

    /// Returns the near and far points of the ray through a film point,
    /// relative to the lens position.
    pub fn extrude(&self, point: Vec2) -> std::result::Result<(Vec3, Vec3), ProjectionError> {
        let (near, far) = self.kind.extrude(point, &self.params)?;
        Ok((self.orientation * near, self.orientation * far))
    }

    /// Returns the unit direction of the ray through a film point.
    pub fn extrude_direction(&self, point: Vec2) -> std::result::Result<Vec3, ProjectionError> {
        Ok(self.orientation * self.kind.extrude_direction(point, &self.params)?)
    }

    /// Returns whether a point lands on the film.
    pub fn is_visible(&self, point: Vec3) -> bool {
        self.project(point).is_ok_and(is_on_film)
    }

    /// Returns a copy with a new field of view; film width is kept.
    pub fn with_fov(&self, fov: Vec2) -> Result<Self> {
        Ok(Self {
            params: self.params.with_fov(&self.kind, fov)?,
            ..*self
        })
    }

    /// Returns a copy with a new focal length; film size is kept.
    pub fn with_focal_length(&self, focal_length: f32) -> Result<Self> {
        Ok(Self {
            params: self.params.with_focal_length(&self.kind, focal_length)?,
            ..*self
        })
    }

    /// Returns a copy with a new film size; focal length is kept.
    pub fn with_film_size(&self, film_size: Vec2) -> Result<Self> {
        Ok(Self {
            params: self.params.with_film_size(&self.kind, film_size)?,
            ..*self
        })
    }

    /// Returns a copy with a new film aspect ratio (width over height).
    pub fn with_aspect_ratio(&self, aspect_ratio: f32) -> Result<Self> {
        Ok(Self {
            params: self.params.with_aspect_ratio(&self.kind, aspect_ratio)?,
            ..*self
        })
    }

    /// Returns a copy with a new film offset.
    pub fn with_film_offset(&self, offset: Vec2) -> Result<Self> {
        Ok(Self {
            params: self.params.with_film_offset(offset)?,
            ..*self
        })
    }

    /// Returns a copy with new near and far distances.
    pub fn with_near_far(&self, near: f32, far: f32) -> Result<Self> {
        Ok(Self {
            params: self.params.with_near_far(near, far)?,
            ..*self
        })
    }

    /// Returns a copy with a new lens-to-world rotation.
    ///
    /// The rotation is normalized; a zero or non-finite quaternion is
    /// rejected.
    pub fn with_orientation(&self, orientation: Quat) -> Result<Self> {
        let normalized = orientation.normalize();
        if !orientation.is_finite() || !normalized.is_finite() {
            return Err(PanlensError::InvalidParameter(format!(
                "orientation {orientation} is not a rotation"
            )));
        }
        Ok(Self {
            orientation: normalized,
            ..*self
        })
    }

    /// Returns a copy looking along `forward`, rolled so that the lens's up
    /// direction is as close to `up` as possible.
    pub fn look_at(&self, forward: Vec3, up: Vec3) -> Result<Self> {
        let forward = forward.normalize_or_zero();
        let right = up.cross(forward).normalize_or_zero();
        if forward == Vec3::ZERO || right == Vec3::ZERO {
            return Err(PanlensError::InvalidParameter(format!(
                "cannot look along {forward} with up {up}"
            )));
        }
        let up = forward.cross(right);
        let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, forward));
        self.with_orientation(rotation)
    }

    /// Packs the lens for a uniform buffer.
    pub fn uniforms(&self) -> LensUniforms {
        LensUniforms::new(
            self.model(),
            self.kind.vertical_mapping(),
            &self.params,
            self.orientation,
        )
    }
}

#[cfg(test)]
mod tests {
    use panlens_core::{FovConversion, VerticalMapping};

    use super::*;
    use crate::lenses::{OSphereLens, PerspectiveLens};

    fn wraparound() -> Lens {
        Lens::from_fov(OSphereLens::new(), Vec2::new(360.0, 180.0), 1.0).unwrap()
    }

    #[test]
    fn test_orientation_rotates_rays() {
        // Turn the lens to face +x.
        let lens = wraparound().look_at(Vec3::X, Vec3::Y).unwrap();
        assert!((lens.forward() - Vec3::X).length() < 1e-6);
        assert!((lens.up() - Vec3::Y).length() < 1e-6);

        let p = lens.project(Vec3::X * 5.0).unwrap();
        assert!(p.length() < 1e-5);

        let direction = lens.extrude_direction(Vec2::ZERO).unwrap();
        assert!((direction - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_look_at_rejects_parallel_up() {
        assert!(wraparound().look_at(Vec3::Y, Vec3::Y).is_err());
        assert!(wraparound().look_at(Vec3::ZERO, Vec3::Y).is_err());
    }

    #[test]
    fn test_with_orientation_rejects_non_rotations() {
        let lens = wraparound();
        for orientation in [
            Quat::from_xyzw(0.0, 0.0, 0.0, 0.0),
            Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0),
        ] {
            assert!(matches!(
                lens.with_orientation(orientation),
                Err(PanlensError::InvalidParameter(_))
            ));
        }

        let turned = lens
            .with_orientation(Quat::from_xyzw(0.0, 2.0, 0.0, 0.0))
            .unwrap();
        assert!((turned.orientation().length() - 1.0).abs() < 1e-6);
        assert!((turned.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_setters_return_new_lens() {
        let lens = wraparound();
        let narrow = lens.with_fov(Vec2::new(180.0, 90.0)).unwrap();
        assert_eq!(lens.params().hfov(), 360.0);
        assert_eq!(narrow.params().hfov(), 180.0);
        assert!((narrow.params().film_size().x - lens.params().film_size().x).abs() < 1e-5);

        let longer = lens.with_focal_length(2.0).unwrap();
        assert!((longer.params().hfov() - 180.0).abs() < 1e-3);
        assert_eq!(longer.kind(), lens.kind());
    }

    #[test]
    fn test_is_visible() {
        let lens = Lens::from_fov(PerspectiveLens, Vec2::new(90.0, 60.0), 1.0).unwrap();
        assert!(lens.is_visible(Vec3::new(0.5, 0.2, 1.0)));
        assert!(!lens.is_visible(Vec3::new(2.0, 0.0, 1.0)));
        assert!(!lens.is_visible(Vec3::NEG_Z));
    }

    #[test]
    fn test_from_config_defaults() {
        let lens = Lens::from_config(&LensConfig::default()).unwrap();
        assert_eq!(lens.model(), LensModel::OSphere);
        assert_eq!(lens.params().fov(), Vec2::new(360.0, 180.0));
        assert_eq!(lens.params().focal_length(), 1.0);
    }

    #[test]
    fn test_from_config_film_and_focal() {
        let config = LensConfig::new()
            .with_model(LensModel::PSphere)
            .with_film_size(Vec2::new(std::f32::consts::PI, 1.0))
            .with_focal_length(1.0)
            .with_near_far(0.1, 10.0);
        let lens = Lens::from_config(&config).unwrap();
        assert!((lens.params().hfov() - 180.0).abs() < 1e-3);
        assert_eq!(lens.params().near(), 0.1);
    }

    #[test]
    fn test_from_config_fov_and_film() {
        let config = LensConfig::new()
            .with_vertical_mapping(VerticalMapping::Height)
            .with_fov(Vec2::new(180.0, 90.0))
            .with_film_size(Vec2::new(2.0, 7.0));
        let lens = Lens::from_config(&config).unwrap();
        assert_eq!(lens.kind().vertical_mapping(), VerticalMapping::Height);
        assert!((lens.params().film_size().x - 2.0).abs() < 1e-6);
        assert!((lens.params().focal_length() - 2.0 / std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_from_config_fov_and_focal_override_film() {
        let config = LensConfig::new()
            .with_model(LensModel::Cylindrical)
            .with_fov(Vec2::new(180.0, 90.0))
            .with_focal_length(2.0)
            .with_film_size(Vec2::new(10.0, 10.0));
        let lens = Lens::from_config(&config).unwrap();
        let kind = lens.kind();
        assert_eq!(lens.params().fov(), Vec2::new(180.0, 90.0));
        assert_eq!(lens.params().focal_length(), 2.0);
        let expected = Vec2::new(
            kind.fov_to_film(180.0, 2.0, true),
            kind.fov_to_film(90.0, 2.0, false),
        );
        assert!((lens.params().film_size() - expected).length() < 1e-5);
        // The configured 10 x 10 film is ignored.
        let film_size = Vec2::new(2.0 * std::f32::consts::PI, 4.0);
        assert!((lens.params().film_size() - film_size).length() < 1e-5);
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = LensConfig::new()
            .with_model(LensModel::Perspective)
            .with_fov(Vec2::new(200.0, 30.0));
        assert!(matches!(
            Lens::from_config(&config),
            Err(PanlensError::InvalidParameter(_))
        ));

        let config = LensConfig::new().with_near_far(5.0, 1.0);
        assert!(Lens::from_config(&config).is_err());
    }

    #[test]
    fn test_uniforms_follow_lens() {
        let lens = wraparound().with_near_far(0.5, 50.0).unwrap();
        let uniforms = lens.uniforms();
        assert_eq!(uniforms.model, LensModel::OSphere.to_index());
        assert_eq!(uniforms.near, 0.5);
        assert_eq!(uniforms.far, 50.0);
        assert_eq!(uniforms.fov, [360.0, 180.0]);
    }
}
