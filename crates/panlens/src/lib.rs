//! Nonlinear camera lenses.
//!
//! A lens converts between lens-space directions (+z forward, +y up) and
//! normalized film coordinates in [-1, 1]. The centrepiece is the
//! spherical-orthographic [`OSphereLens`], which wraps a full turn around the
//! viewer horizontally while staying orthographic vertically, for 360-degree
//! panoramas without fisheye distortion.
//!
//! # Example
//!
//! ```
//! use panlens::{Lens, OSphereLens, Vec2, Vec3};
//!
//! let lens = Lens::from_fov(OSphereLens::new(), Vec2::new(360.0, 180.0), 1.0).unwrap();
//! let film = lens.project(Vec3::X).unwrap();
//! assert!((film.x - 0.5).abs() < 1e-6);
//!
//! let (near, far) = lens.extrude(film).unwrap();
//! assert!(near.normalize().abs_diff_eq(Vec3::X, 1e-5));
//! assert!(far.length() > near.length());
//! ```

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Lens kinds are named after the models they implement
#![allow(clippy::module_name_repetitions)]

pub mod kind;
pub mod lens;
pub mod lenses;
pub mod projection;

pub use kind::LensKind;
pub use lens::Lens;
pub use lenses::{CylindricalLens, FisheyeLens, OSphereLens, PSphereLens, PerspectiveLens};
pub use projection::LensProjection;

pub use panlens_core::{
    film_to_normalized, is_on_film, normalized_to_film, FovConversion, LensConfig, LensModel,
    LensParameters, LensUniforms, NodeRefCount, PanlensError, ProjectionError, Result,
    VerticalMapping,
};

// Re-export glam types for convenience
pub use glam::{Quat, Vec2, Vec3};
