//! The capability every lens model provides.

use glam::{Vec2, Vec3};
use panlens_core::{FovConversion, LensModel, LensParameters, ProjectionError};

/// Conversion between lens-space directions and normalized film coordinates.
///
/// Lens space has +z forward, +y up and +x right. Film coordinates span
/// [-1, 1] on both axes. Implementations are pure: the same inputs always
/// give the same result, and singular inputs fail instead of producing NaN.
pub trait LensProjection: FovConversion {
    /// The model this projection implements.
    fn model(&self) -> LensModel;

    /// Projects a lens-space point, taken as a direction from the lens, onto
    /// normalized film coordinates.
    ///
    /// The result may fall outside [-1, 1] when the point is off the film;
    /// see [`panlens_core::is_on_film`].
    fn project(&self, point: Vec3, params: &LensParameters) -> Result<Vec2, ProjectionError>;

    /// Returns the unit direction of the ray that projects to `point`.
    fn extrude_direction(
        &self,
        point: Vec2,
        params: &LensParameters,
    ) -> Result<Vec3, ProjectionError>;

    /// Returns the near and far points of the ray that projects to `point`.
    fn extrude(
        &self,
        point: Vec2,
        params: &LensParameters,
    ) -> Result<(Vec3, Vec3), ProjectionError> {
        let direction = self.extrude_direction(point, params)?;
        Ok((direction * params.near(), direction * params.far()))
    }
}
