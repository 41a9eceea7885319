//! Lens parameters: field of view, focal length, film size and clip distances.
//!
//! Field of view, focal length and film size are tied together by a relation
//! that depends on the lens model. [`FovConversion`] supplies that relation;
//! [`LensParameters`] uses it to keep the three quantities consistent.
//!
//! Parameters are immutable. Every `with_*` method returns a fresh value with
//! the dependent quantities recomputed, so a value shared between readers
//! never changes under them.

use glam::Vec2;

use crate::error::{PanlensError, Result};

/// Default near distance.
pub const DEFAULT_NEAR: f32 = 1.0;

/// Default far distance.
pub const DEFAULT_FAR: f32 = 100_000.0;

/// Conversions between field of view, focal length and film size for one
/// lens model.
///
/// `horiz` selects the axis. For a fixed axis the three functions are exact
/// algebraic inverses of one another. Angles are in degrees.
pub trait FovConversion {
    /// Film size covering `fov` at the given focal length.
    fn fov_to_film(&self, fov: f32, focal_length: f32, horiz: bool) -> f32;

    /// Focal length at which `fov` exactly covers `film_size`.
    fn fov_to_focal_length(&self, fov: f32, film_size: f32, horiz: bool) -> f32;

    /// Field of view covered by `film_size` at the given focal length.
    fn film_to_fov(&self, film_size: f32, focal_length: f32, horiz: bool) -> f32;

    /// Whether the model can represent `fov` along the given axis.
    fn fov_in_range(&self, fov: f32, horiz: bool) -> bool {
        let max = if horiz { 360.0 } else { 180.0 };
        fov > 0.0 && fov <= max
    }
}

/// Immutable lens configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensParameters {
    /// Horizontal and vertical field of view in degrees.
    fov: Vec2,
    focal_length: f32,
    /// Film width and height.
    film_size: Vec2,
    film_offset: Vec2,
    near: f32,
    far: f32,
}

impl LensParameters {
    /// Creates parameters from a field of view and a focal length. The film
    /// size is derived.
    pub fn from_fov(lens: &impl FovConversion, fov: Vec2, focal_length: f32) -> Result<Self> {
        check_fov(lens, fov)?;
        check_positive("focal length", focal_length)?;
        let film_size = Vec2::new(
            lens.fov_to_film(fov.x, focal_length, true),
            lens.fov_to_film(fov.y, focal_length, false),
        );
        Self::assemble(fov, focal_length, film_size)
    }

    /// Creates parameters from a film size and a focal length. The field of
    /// view is derived.
    pub fn from_film_size(
        lens: &impl FovConversion,
        film_size: Vec2,
        focal_length: f32,
    ) -> Result<Self> {
        check_positive("film width", film_size.x)?;
        check_positive("film height", film_size.y)?;
        check_positive("focal length", focal_length)?;
        let fov = Vec2::new(
            lens.film_to_fov(film_size.x, focal_length, true),
            lens.film_to_fov(film_size.y, focal_length, false),
        );
        check_fov(lens, fov)?;
        Self::assemble(fov, focal_length, film_size)
    }

    /// Creates parameters from a field of view and a film width.
    ///
    /// The focal length comes from the horizontal axis; the film height is
    /// then derived from the vertical field of view.
    pub fn from_fov_and_film_width(
        lens: &impl FovConversion,
        fov: Vec2,
        film_width: f32,
    ) -> Result<Self> {
        check_fov(lens, fov)?;
        check_positive("film width", film_width)?;
        let focal_length = lens.fov_to_focal_length(fov.x, film_width, true);
        Self::from_fov(lens, fov, focal_length)
    }

    fn assemble(fov: Vec2, focal_length: f32, film_size: Vec2) -> Result<Self> {
        check_positive("film width", film_size.x)?;
        check_positive("film height", film_size.y)?;
        check_positive("focal length", focal_length)?;
        Ok(Self {
            fov,
            focal_length,
            film_size,
            film_offset: Vec2::ZERO,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        })
    }

    /// Returns a copy with a new field of view.
    ///
    /// The film width is kept: the focal length is recomputed from the
    /// horizontal axis and the film height from the vertical one.
    pub fn with_fov(&self, lens: &impl FovConversion, fov: Vec2) -> Result<Self> {
        let next = Self::from_fov_and_film_width(lens, fov, self.film_size.x)?;
        log::debug!(
            "fov set to {fov}: focal length {} -> {}, film {} -> {}",
            self.focal_length,
            next.focal_length,
            self.film_size,
            next.film_size
        );
        Ok(self.carry_over(next))
    }

    /// Returns a copy with a new focal length. The film size is kept and the
    /// field of view recomputed.
    pub fn with_focal_length(&self, lens: &impl FovConversion, focal_length: f32) -> Result<Self> {
        let next = Self::from_film_size(lens, self.film_size, focal_length)?;
        log::debug!(
            "focal length set to {focal_length}: fov {} -> {}",
            self.fov,
            next.fov
        );
        Ok(self.carry_over(next))
    }

    /// Returns a copy with a new film size. The focal length is kept and the
    /// field of view recomputed.
    pub fn with_film_size(&self, lens: &impl FovConversion, film_size: Vec2) -> Result<Self> {
        let next = Self::from_film_size(lens, film_size, self.focal_length)?;
        log::debug!("film size set to {film_size}: fov {} -> {}", self.fov, next.fov);
        Ok(self.carry_over(next))
    }

    /// Returns a copy whose film height matches `aspect_ratio` (width over
    /// height). The vertical field of view follows.
    pub fn with_aspect_ratio(&self, lens: &impl FovConversion, aspect_ratio: f32) -> Result<Self> {
        check_positive("aspect ratio", aspect_ratio)?;
        self.with_film_size(
            lens,
            Vec2::new(self.film_size.x, self.film_size.x / aspect_ratio),
        )
    }

    /// Returns a copy with the film shifted by `offset` (film units).
    pub fn with_film_offset(&self, offset: Vec2) -> Result<Self> {
        if !offset.is_finite() {
            return Err(PanlensError::InvalidParameter(format!(
                "film offset must be finite, got {offset}"
            )));
        }
        Ok(Self {
            film_offset: offset,
            ..*self
        })
    }

    /// Returns a copy with new near and far distances.
    pub fn with_near_far(&self, near: f32, far: f32) -> Result<Self> {
        check_positive("near distance", near)?;
        check_positive("far distance", far)?;
        if far <= near {
            return Err(PanlensError::InvalidParameter(format!(
                "far distance {far} must exceed near distance {near}"
            )));
        }
        Ok(Self { near, far, ..*self })
    }

    fn carry_over(&self, next: Self) -> Self {
        Self {
            film_offset: self.film_offset,
            near: self.near,
            far: self.far,
            ..next
        }
    }

    /// Horizontal and vertical field of view in degrees.
    pub fn fov(&self) -> Vec2 {
        self.fov
    }

    /// Horizontal field of view in degrees.
    pub fn hfov(&self) -> f32 {
        self.fov.x
    }

    /// Vertical field of view in degrees.
    pub fn vfov(&self) -> f32 {
        self.fov.y
    }

    /// The smaller of the two fields of view.
    pub fn min_fov(&self) -> f32 {
        self.fov.min_element()
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// Film width and height.
    pub fn film_size(&self) -> Vec2 {
        self.film_size
    }

    pub fn film_offset(&self) -> Vec2 {
        self.film_offset
    }

    /// Film width over film height.
    pub fn aspect_ratio(&self) -> f32 {
        self.film_size.x / self.film_size.y
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PanlensError::InvalidParameter(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

fn check_fov(lens: &impl FovConversion, fov: Vec2) -> Result<()> {
    if !fov.is_finite() || !lens.fov_in_range(fov.x, true) || !lens.fov_in_range(fov.y, false) {
        return Err(PanlensError::InvalidParameter(format!(
            "field of view {fov} not representable by this lens"
        )));
    }
    Ok(())
}
