//! Closed set of lens kinds with static dispatch.

use glam::{Vec2, Vec3};
use panlens_core::{
    FovConversion, LensModel, LensParameters, ProjectionError, VerticalMapping,
};

use crate::lenses::{CylindricalLens, FisheyeLens, OSphereLens, PSphereLens, PerspectiveLens};
use crate::projection::LensProjection;

/// One of the supported lens models, chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LensKind {
    OSphere(OSphereLens),
    Cylindrical(CylindricalLens),
    PSphere(PSphereLens),
    Perspective(PerspectiveLens),
    Fisheye(FisheyeLens),
}

/// Forwards a call to the lens inside each variant.
macro_rules! dispatch {
    ($kind:expr, $lens:ident => $call:expr) => {
        match $kind {
            LensKind::OSphere($lens) => $call,
            LensKind::Cylindrical($lens) => $call,
            LensKind::PSphere($lens) => $call,
            LensKind::Perspective($lens) => $call,
            LensKind::Fisheye($lens) => $call,
        }
    };
}

impl LensKind {
    /// Builds the lens for a model. `vertical_mapping` only affects
    /// [`LensModel::OSphere`].
    pub fn from_model(model: LensModel, vertical_mapping: VerticalMapping) -> Self {
        match model {
            LensModel::OSphere => {
                LensKind::OSphere(OSphereLens::new().with_vertical_mapping(vertical_mapping))
            }
            LensModel::Cylindrical => LensKind::Cylindrical(CylindricalLens),
            LensModel::PSphere => LensKind::PSphere(PSphereLens),
            LensModel::Perspective => LensKind::Perspective(PerspectiveLens),
            LensModel::Fisheye => LensKind::Fisheye(FisheyeLens),
        }
    }

    /// Vertical convention; [`VerticalMapping::Sine`] for models that have
    /// only one.
    pub fn vertical_mapping(&self) -> VerticalMapping {
        match self {
            LensKind::OSphere(lens) => lens.vertical_mapping(),
            _ => VerticalMapping::default(),
        }
    }
}

impl Default for LensKind {
    fn default() -> Self {
        LensKind::OSphere(OSphereLens::new())
    }
}

impl From<OSphereLens> for LensKind {
    fn from(lens: OSphereLens) -> Self {
        LensKind::OSphere(lens)
    }
}

impl From<CylindricalLens> for LensKind {
    fn from(lens: CylindricalLens) -> Self {
        LensKind::Cylindrical(lens)
    }
}

impl From<PSphereLens> for LensKind {
    fn from(lens: PSphereLens) -> Self {
        LensKind::PSphere(lens)
    }
}

impl From<PerspectiveLens> for LensKind {
    fn from(lens: PerspectiveLens) -> Self {
        LensKind::Perspective(lens)
    }
}

impl From<FisheyeLens> for LensKind {
    fn from(lens: FisheyeLens) -> Self {
        LensKind::Fisheye(lens)
    }
}

impl FovConversion for LensKind {
    fn fov_to_film(&self, fov: f32, focal_length: f32, horiz: bool) -> f32 {
        dispatch!(self, lens => lens.fov_to_film(fov, focal_length, horiz))
    }

    fn fov_to_focal_length(&self, fov: f32, film_size: f32, horiz: bool) -> f32 {
        dispatch!(self, lens => lens.fov_to_focal_length(fov, film_size, horiz))
    }

    fn film_to_fov(&self, film_size: f32, focal_length: f32, horiz: bool) -> f32 {
        dispatch!(self, lens => lens.film_to_fov(film_size, focal_length, horiz))
    }

    fn fov_in_range(&self, fov: f32, horiz: bool) -> bool {
        dispatch!(self, lens => lens.fov_in_range(fov, horiz))
    }
}

impl LensProjection for LensKind {
    fn model(&self) -> LensModel {
        dispatch!(self, lens => lens.model())
    }

    fn project(&self, point: Vec3, params: &LensParameters) -> Result<Vec2, ProjectionError> {
        dispatch!(self, lens => lens.project(point, params))
    }

    fn extrude_direction(
        &self,
        point: Vec2,
        params: &LensParameters,
    ) -> Result<Vec3, ProjectionError> {
        dispatch!(self, lens => lens.extrude_direction(point, params))
    }
}
