//! Projection properties shared by every lens model.
//!
//! Project/extrude consistency and the fov/film/focal relations are checked
//! with proptest; the concrete wraparound cases are plain tests.

use panlens::*;
use proptest::prelude::*;

const TOLERANCE: f32 = 1e-4;

/// Lenses paired with a field of view that keeps sampled inputs on film.
fn lenses() -> Vec<(LensKind, Vec2)> {
    vec![
        (OSphereLens::new().into(), Vec2::new(360.0, 180.0)),
        (
            OSphereLens::new()
                .with_vertical_mapping(VerticalMapping::Height)
                .into(),
            Vec2::new(360.0, 170.0),
        ),
        (CylindricalLens.into(), Vec2::new(360.0, 170.0)),
        (PSphereLens.into(), Vec2::new(360.0, 180.0)),
        (FisheyeLens.into(), Vec2::new(360.0, 360.0)),
    ]
}

fn direction(azimuth: f32, elevation: f32) -> Vec3 {
    let (sin_a, cos_a) = azimuth.sin_cos();
    let (sin_e, cos_e) = elevation.sin_cos();
    Vec3::new(cos_e * sin_a, sin_e, cos_e * cos_a)
}

fn wraparound() -> Lens {
    Lens::from_fov(OSphereLens::new(), Vec2::new(360.0, 180.0), 1.0).unwrap()
}

#[test]
fn test_forward_point_projects_to_center() {
    let film = wraparound().project(Vec3::new(0.0, 0.0, 1.0)).unwrap();
    assert!(film.abs_diff_eq(Vec2::ZERO, 1e-6), "{film}");
}

#[test]
fn test_quarter_turn_projects_to_half() {
    let film = wraparound().project(Vec3::new(1.0, 0.0, 0.0)).unwrap();
    assert!((film.x - 0.5).abs() < 1e-6, "{film}");
}

#[test]
fn test_vertical_axis_is_degenerate() {
    for (kind, fov) in lenses() {
        if kind.model() == LensModel::Fisheye {
            continue;
        }
        let lens = Lens::from_fov(kind, fov, 1.0).unwrap();
        assert_eq!(
            lens.project(Vec3::new(0.0, 3.0, 0.0)),
            Err(ProjectionError::DegenerateRadius),
            "{:?}",
            lens.model()
        );
        assert_eq!(
            lens.project(Vec3::new(0.0, -0.5, 0.0)),
            Err(ProjectionError::DegenerateRadius)
        );
    }
}

#[test]
fn test_rear_seam_is_behind_camera() {
    for (kind, fov) in lenses() {
        let lens = Lens::from_fov(kind, fov, 1.0).unwrap();
        assert_eq!(
            lens.project(Vec3::new(0.0, 0.0, -2.0)),
            Err(ProjectionError::BehindCamera),
            "{:?}",
            lens.model()
        );
    }
}

#[test]
fn test_extrude_outside_film_is_out_of_range() {
    for (kind, fov) in lenses() {
        let lens = Lens::from_fov(kind, fov, 1.0).unwrap();
        for point in [
            Vec2::new(1.2, 0.0),
            Vec2::new(0.0, -1.2),
            Vec2::new(f32::NAN, 0.0),
        ] {
            assert_eq!(
                lens.extrude(point),
                Err(ProjectionError::OutOfRange),
                "{:?} {point}",
                lens.model()
            );
        }
    }
}

fn any_component() -> impl Strategy<Value = f32> {
    prop_oneof![
        Just(0.0_f32),
        Just(-0.0_f32),
        -100.0_f32..100.0,
        (-1.0_f32..1.0).prop_map(|v| v * 1e30),
        (-1.0_f32..1.0).prop_map(|v| v * 1e-30),
    ]
}

#[test]
fn test_extreme_magnitudes_project_like_unit_points() {
    let mut kinds = lenses();
    kinds.push((PerspectiveLens.into(), Vec2::new(90.0, 60.0)));
    for (kind, fov) in kinds {
        let lens = Lens::from_fov(kind, fov, 1.0).unwrap();
        let reference = lens.project(Vec3::new(1.0, 0.5, 1.0)).unwrap();
        for scale in [3e19_f32, 1e30, 1e-30] {
            let film = lens.project(Vec3::new(1.0, 0.5, 1.0) * scale).unwrap();
            assert!(
                film.abs_diff_eq(reference, 1e-5),
                "{:?} at {scale}: {film} vs {reference}",
                lens.model()
            );
        }
    }
}

proptest! {
    #[test]
    fn prop_project_then_extrude_recovers_direction(
        azimuth in -3.0_f32..3.0,
        elevation in -1.4_f32..1.4,
        distance in 0.01_f32..1000.0,
        magnitude in -30_i32..30,
        focal_length in 0.1_f32..10.0,
    ) {
        for (kind, fov) in lenses() {
            let lens = Lens::from_fov(kind, fov, focal_length).unwrap();
            let point = direction(azimuth, elevation) * distance * 10.0_f32.powi(magnitude);
            let film = lens.project(point).unwrap();
            prop_assert!(is_on_film(film), "{:?} {film}", lens.model());
            let (near, far) = lens.extrude(film).unwrap();
            prop_assert!(
                near.normalize().abs_diff_eq(point.normalize(), TOLERANCE),
                "{:?}: {near} vs {point}",
                lens.model()
            );
            prop_assert!((near.length() - lens.params().near()).abs() < TOLERANCE);
            prop_assert!(far.normalize().abs_diff_eq(near.normalize(), TOLERANCE));
        }
    }

    #[test]
    fn prop_extrude_then_project_recovers_film(
        x in -0.95_f32..0.95,
        y in -0.95_f32..0.95,
        focal_length in 0.1_f32..10.0,
    ) {
        let film = Vec2::new(x, y);
        for (kind, fov) in lenses() {
            // The fisheye image is a disc.
            if kind.model() == LensModel::Fisheye && film.length() > 0.95 {
                continue;
            }
            let lens = Lens::from_fov(kind, fov, focal_length).unwrap();
            let (_, far) = lens.extrude(film).unwrap();
            let back = lens.project(far).unwrap();
            prop_assert!(back.abs_diff_eq(film, TOLERANCE), "{:?}: {back} vs {film}", lens.model());
        }
    }

    #[test]
    fn prop_extrude_then_project_with_film_offset(
        x in -0.95_f32..0.95,
        y in -0.95_f32..0.95,
        shift in -1.0_f32..1.0,
        focal_length in 0.1_f32..10.0,
    ) {
        let film = Vec2::new(x, y);
        for (kind, fov) in lenses() {
            if kind.model() == LensModel::Fisheye {
                continue;
            }
            // Shift the film by up to half its width.
            let offset = Vec2::new(shift * std::f32::consts::PI * focal_length, 0.0);
            let lens = Lens::from_fov(kind, fov, focal_length)
                .unwrap()
                .with_film_offset(offset)
                .unwrap();
            let azimuth = normalized_to_film(film, lens.params()).x / focal_length;
            let result = lens.extrude(film);
            if azimuth.abs() > std::f32::consts::PI * 1.001 {
                prop_assert_eq!(result, Err(ProjectionError::OutOfRange), "{:?}", lens.model());
                continue;
            }
            if azimuth.abs() > std::f32::consts::PI * 0.999 {
                // Too close to the rear seam to come back unambiguously.
                continue;
            }
            let (_, far) = result.unwrap();
            let back = lens.project(far).unwrap();
            prop_assert!(back.abs_diff_eq(film, TOLERANCE), "{:?}: {back} vs {film}", lens.model());
        }
    }

    #[test]
    fn prop_perspective_round_trip(
        azimuth in -0.7_f32..0.7,
        elevation in -0.5_f32..0.5,
        distance in 0.01_f32..1000.0,
    ) {
        let lens = Lens::from_fov(PerspectiveLens, Vec2::new(120.0, 120.0), 1.0).unwrap();
        let point = direction(azimuth, elevation) * distance;
        let film = lens.project(point).unwrap();
        let back = lens.extrude_direction(film).unwrap();
        prop_assert!(back.abs_diff_eq(point.normalize(), TOLERANCE));
        prop_assert!(lens.project(back).unwrap().abs_diff_eq(film, TOLERANCE));
    }

    #[test]
    fn prop_rotated_lens_round_trip(
        yaw in -3.0_f32..3.0,
        pitch in -1.0_f32..1.0,
        azimuth in -2.5_f32..2.5,
        elevation in -1.0_f32..1.0,
    ) {
        let lens = wraparound()
            .with_orientation(Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch))
            .unwrap();
        let point = lens.orientation() * direction(azimuth, elevation);
        let film = lens.project(point).unwrap();
        let back = lens.extrude_direction(film).unwrap();
        prop_assert!(back.abs_diff_eq(point, TOLERANCE));
    }

    #[test]
    fn prop_fov_conversions_invert(
        fov in 1.0_f32..359.0,
        focal_length in 0.1_f32..100.0,
        horiz in any::<bool>(),
    ) {
        let mut kinds = lenses();
        kinds.push((PerspectiveLens.into(), Vec2::ZERO));
        for (kind, _) in kinds {
            if !kind.fov_in_range(fov, horiz) || (!horiz && fov > 179.0) {
                continue;
            }
            let film = kind.fov_to_film(fov, focal_length, horiz);
            prop_assert!(film.is_finite() && film > 0.0);
            let fov_back = kind.film_to_fov(film, focal_length, horiz);
            prop_assert!((fov_back - fov).abs() < 1e-2, "{:?}: {fov_back} vs {fov}", kind.model());
            let focal_back = kind.fov_to_focal_length(fov, film, horiz);
            prop_assert!((focal_back / focal_length - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn prop_project_never_returns_nan(
        x in any_component(),
        y in any_component(),
        z in any_component(),
    ) {
        let mut kinds = lenses();
        kinds.push((PerspectiveLens.into(), Vec2::new(90.0, 60.0)));
        for (kind, fov) in kinds {
            let lens = Lens::from_fov(kind, fov, 1.0).unwrap();
            if let Ok(film) = lens.project(Vec3::new(x, y, z)) {
                prop_assert!(film.is_finite(), "{:?}: {film}", lens.model());
            }
        }
    }
}
