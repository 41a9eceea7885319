//! Prints where a ring of directions lands on each lens's film.
//!
//! Run with: cargo run --example projection_table [-- lens.json]
//!
//! With a path argument, the lens is read from that JSON file instead.

use panlens::*;

fn print_ring(lens: &Lens) {
    println!(
        "{} lens: fov {} focal length {:.3} film {}",
        lens.model().name(),
        lens.params().fov(),
        lens.params().focal_length(),
        lens.params().film_size()
    );
    for step in 0..8_u8 {
        let azimuth = (f32::from(step) * 45.0 - 180.0).to_radians();
        for elevation in [-60.0_f32, 0.0, 60.0] {
            let elevation = elevation.to_radians();
            let direction = Vec3::new(
                elevation.cos() * azimuth.sin(),
                elevation.sin(),
                elevation.cos() * azimuth.cos(),
            );
            match lens.project(direction) {
                Ok(film) => {
                    let marker = if is_on_film(film) { "" } else { "  (off film)" };
                    println!(
                        "  az {:>6.1} el {:>5.1} -> ({:>7.4}, {:>7.4}){marker}",
                        azimuth.to_degrees(),
                        elevation.to_degrees(),
                        film.x,
                        film.y
                    );
                }
                Err(err) => println!(
                    "  az {:>6.1} el {:>5.1} -> {err}",
                    azimuth.to_degrees(),
                    elevation.to_degrees()
                ),
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    if let Some(path) = std::env::args().nth(1) {
        let config = LensConfig::from_json_file(path)?;
        print_ring(&Lens::from_config(&config)?);
        return Ok(());
    }

    for model in [
        LensModel::OSphere,
        LensModel::Cylindrical,
        LensModel::PSphere,
        LensModel::Perspective,
        LensModel::Fisheye,
    ] {
        let lens = Lens::from_config(&LensConfig::new().with_model(model))?;
        print_ring(&lens);
    }

    let height = LensConfig::new()
        .with_vertical_mapping(VerticalMapping::Height)
        .with_fov(Vec2::new(360.0, 150.0));
    print_ring(&Lens::from_config(&height)?);
    Ok(())
}
