//! GPU-compatible lens uniforms for shader-side projection.

use glam::{Mat4, Quat};

use crate::config::{LensModel, VerticalMapping};
use crate::params::LensParameters;

/// Lens state laid out for a uniform buffer (std140 compatible).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LensUniforms {
    /// Lens-to-world rotation, column major.
    pub orientation: [[f32; 4]; 4],
    /// Horizontal and vertical field of view in degrees.
    pub fov: [f32; 2],
    /// Film width and height.
    pub film_size: [f32; 2],
    /// Film offset.
    pub film_offset: [f32; 2],
    pub focal_length: f32,
    pub near: f32,
    pub far: f32,
    /// [`LensModel::to_index`].
    pub model: u32,
    /// [`VerticalMapping::to_index`].
    pub vertical_mapping: u32,
    /// Padding for alignment.
    pub _padding: f32,
}

impl LensUniforms {
    /// Packs a lens into uniforms.
    pub fn new(
        model: LensModel,
        vertical_mapping: VerticalMapping,
        params: &LensParameters,
        orientation: Quat,
    ) -> Self {
        Self {
            orientation: Mat4::from_quat(orientation).to_cols_array_2d(),
            fov: params.fov().to_array(),
            film_size: params.film_size().to_array(),
            film_offset: params.film_offset().to_array(),
            focal_length: params.focal_length(),
            near: params.near(),
            far: params.far(),
            model: model.to_index(),
            vertical_mapping: vertical_mapping.to_index(),
            _padding: 0.0,
        }
    }
}

impl Default for LensUniforms {
    fn default() -> Self {
        Self {
            orientation: Mat4::IDENTITY.to_cols_array_2d(),
            fov: [360.0, 180.0],
            film_size: [0.0; 2],
            film_offset: [0.0; 2],
            focal_length: 1.0,
            near: 0.0,
            far: 0.0,
            model: 0,
            vertical_mapping: 0,
            _padding: 0.0,
        }
    }
}
