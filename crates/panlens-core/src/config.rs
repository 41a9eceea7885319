//! Serializable lens configuration.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{DEFAULT_FAR, DEFAULT_NEAR};

/// The closed set of lens models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LensModel {
    /// Angle-linear horizontally, orthographic vertically.
    #[default]
    #[serde(rename = "osphere")]
    OSphere,
    /// Angle-linear horizontally, perspective vertically.
    Cylindrical,
    /// Angle-linear on both axes.
    #[serde(rename = "psphere")]
    PSphere,
    /// Ordinary pinhole projection.
    Perspective,
    /// Equidistant fisheye.
    Fisheye,
}

impl LensModel {
    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LensModel::OSphere => "OSphere",
            LensModel::Cylindrical => "Cylindrical",
            LensModel::PSphere => "PSphere",
            LensModel::Perspective => "Perspective",
            LensModel::Fisheye => "Fisheye",
        }
    }

    /// Field of view used when a configuration names neither a field of view
    /// nor a film size.
    #[must_use]
    pub fn default_fov(self) -> Vec2 {
        match self {
            LensModel::OSphere | LensModel::PSphere => Vec2::new(360.0, 180.0),
            LensModel::Cylindrical => Vec2::new(360.0, 90.0),
            LensModel::Perspective => Vec2::new(40.0, 30.0),
            LensModel::Fisheye => Vec2::new(180.0, 180.0),
        }
    }

    /// Index used in GPU uniforms.
    #[must_use]
    pub fn to_index(self) -> u32 {
        match self {
            LensModel::OSphere => 0,
            LensModel::Cylindrical => 1,
            LensModel::PSphere => 2,
            LensModel::Perspective => 3,
            LensModel::Fisheye => 4,
        }
    }
}

/// Vertical convention of the spherical-orthographic lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerticalMapping {
    /// Film y is linear in the sine of the elevation: the view sphere seen
    /// orthographically from the side.
    #[default]
    Sine,
    /// Film y is linear in the height of the point on the unit cylinder,
    /// i.e. the vertical offset divided by the horizontal-plane distance.
    Height,
}

impl VerticalMapping {
    /// Index used in GPU uniforms.
    #[must_use]
    pub fn to_index(self) -> u32 {
        match self {
            VerticalMapping::Sine => 0,
            VerticalMapping::Height => 1,
        }
    }
}

/// Lens configuration as stored on disk.
///
/// Any two of `fov`, `focal_length` and `film_size` determine the third.
/// Whatever is left out is derived when the lens is built; with nothing
/// given, the model's default field of view and a focal length of 1 apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Lens model.
    pub model: LensModel,

    /// Vertical convention, only read by the spherical-orthographic model.
    pub vertical_mapping: VerticalMapping,

    /// Horizontal and vertical field of view in degrees.
    pub fov: Option<Vec2>,

    /// Focal length in film units.
    pub focal_length: Option<f32>,

    /// Film width and height.
    pub film_size: Option<Vec2>,

    /// Film offset in film units.
    pub film_offset: Vec2,

    /// Near distance.
    pub near: f32,

    /// Far distance.
    pub far: f32,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            model: LensModel::OSphere,
            vertical_mapping: VerticalMapping::Sine,
            fov: None,
            focal_length: None,
            film_size: None,
            film_offset: Vec2::ZERO,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl LensConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lens model.
    #[must_use]
    pub fn with_model(mut self, model: LensModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the vertical convention.
    #[must_use]
    pub fn with_vertical_mapping(mut self, mapping: VerticalMapping) -> Self {
        self.vertical_mapping = mapping;
        self
    }

    /// Sets the field of view.
    #[must_use]
    pub fn with_fov(mut self, fov: Vec2) -> Self {
        self.fov = Some(fov);
        self
    }

    /// Sets the focal length.
    #[must_use]
    pub fn with_focal_length(mut self, focal_length: f32) -> Self {
        self.focal_length = Some(focal_length);
        self
    }

    /// Sets the film size.
    #[must_use]
    pub fn with_film_size(mut self, film_size: Vec2) -> Self {
        self.film_size = Some(film_size);
        self
    }

    /// Sets the near and far distances.
    #[must_use]
    pub fn with_near_far(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!(
            "loaded {} lens configuration from {}",
            config.model.name(),
            path.display()
        );
        Ok(config)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
