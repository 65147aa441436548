//! Rendering ownership onto the map raster.
//!
//! Painting is strictly sequential: each fill reads and writes the whole
//! buffer, so one call must finish before the next starts.

pub mod fill;
pub mod legend;
pub mod raster;

use std::time::Instant;

use image::RgbImage;

use crate::board::World;

pub use fill::{fill, label_components, FillStrategy, RenderError};
pub use legend::{draw_legend, LegendArea, CELL};
pub use raster::{default_output_path, load_raster, save_raster};

/// Summary of a `paint_world` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintReport {
    /// Provinces whose region was recolored.
    pub painted: usize,
    /// Provinces whose seed lies outside the raster.
    pub skipped: usize,
    /// Total pixels recolored.
    pub pixels: usize,
}

/// Paints every province with its current color, in load order.
pub fn paint_world(world: &World, image: &mut RgbImage, strategy: FillStrategy) -> PaintReport {
    let start = Instant::now();
    tracing::info!(provinces = world.provinces().len(), %strategy, "filling map from data");

    let mut report = PaintReport::default();
    for id in world.province_ids() {
        let province = world.province(id);
        match fill(image, province.position, world.province_color(id), strategy) {
            Ok(pixels) => {
                report.painted += 1;
                report.pixels += pixels;
            }
            Err(e) => {
                tracing::warn!(province = %province.name, error = %e, "skipping province");
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        painted = report.painted,
        skipped = report.skipped,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "filling completed"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Level, Player, Position, ProvinceSpec};
    use image::Rgb;

    const BORDER: [u8; 3] = [0, 0, 0];
    const LAND: Color = Color::new(0, 178, 0);

    // Two 3x3 provinces separated by a black border column, same base color.
    fn map() -> RgbImage {
        let mut img = RgbImage::from_pixel(7, 3, Rgb::from(LAND));
        for y in 0..3 {
            img.put_pixel(3, y, Rgb(BORDER));
        }
        img
    }

    fn world() -> World {
        let mut world = World::new(vec![
            Level::new("level1", "level1", 5, 1, LAND),
            Level::new("level2", "level2", 10, 3, Color::new(0, 127, 0)),
        ]);
        let r = world.add_region("r");
        for (name, x) in [("WEST", 1), ("EAST", 5), ("OFFMAP", 50)] {
            world
                .add_province(
                    r,
                    ProvinceSpec {
                        name: name.to_string(),
                        level: "level1".to_string(),
                        position: Position::new(x, 1),
                        ..ProvinceSpec::default()
                    },
                )
                .unwrap();
        }
        let p = world
            .add_player(Player::new("p", "P", 1, Color::new(255, 0, 0), world.levels()))
            .unwrap();
        world.assign_province(p, "EAST");
        world
    }

    #[test]
    fn owned_and_unowned_provinces_get_their_colors() {
        let world = world();
        let mut img = map();
        let report = paint_world(&world, &mut img, FillStrategy::Labeling);

        assert_eq!(report, PaintReport { painted: 2, skipped: 1, pixels: 18 });
        assert_eq!(img.get_pixel(0, 0).0, LAND.channels());
        assert_eq!(img.get_pixel(6, 2).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(3, 1).0, BORDER);
    }

    #[test]
    fn both_strategies_paint_identically() {
        let world = world();
        let mut a = map();
        let mut b = map();
        paint_world(&world, &mut a, FillStrategy::Labeling);
        paint_world(&world, &mut b, FillStrategy::Propagation);
        assert_eq!(a, b);
    }
}
