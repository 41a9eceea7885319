//! Core types for panlens.
//!
//! This crate provides the pieces shared by every lens model:
//! - [`LensParameters`] and the [`FovConversion`] relation that keeps field
//!   of view, focal length and film size consistent
//! - Film normalization helpers in [`film`]
//! - The [`ProjectionError`] taxonomy and the crate-wide [`PanlensError`]
//! - JSON lens configuration ([`LensConfig`])
//! - GPU uniforms ([`LensUniforms`]) and the cache [`NodeRefCount`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod film;
pub mod node_ref_count;
pub mod params;
pub mod uniforms;

pub use config::{LensConfig, LensModel, VerticalMapping};
pub use error::{PanlensError, ProjectionError, Result};
pub use film::{check_domain, film_to_normalized, is_on_film, normalized_to_film, EPSILON};
pub use node_ref_count::{NodeRefCount, DELETED_REF_COUNT};
pub use params::{FovConversion, LensParameters, DEFAULT_FAR, DEFAULT_NEAR};
pub use uniforms::LensUniforms;

// Re-export glam types for convenience
pub use glam::{Quat, Vec2, Vec3};
