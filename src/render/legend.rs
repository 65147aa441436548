//! Player legend.
//!
//! Draws a swatch grid over the bottom-left corner of the map: one row per
//! player, one cell per level showing that player's shade for the level.

use image::{Rgb, RgbImage};

use crate::board::{Color, World};

/// Side length of one swatch, in pixels.
pub const CELL: u32 = 45;

/// Pixel rectangle covered by the legend, before clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Draws the legend and returns the area it covers.
///
/// Cells that fall outside the raster are clipped. A world without players
/// or levels draws nothing.
pub fn draw_legend(image: &mut RgbImage, world: &World) -> Option<LegendArea> {
    let rows = world.players().len() as u32;
    let cols = world.levels().len() as u32;
    if rows == 0 || cols == 0 {
        return None;
    }

    let (width, height) = image.dimensions();
    let area = LegendArea {
        x: 0,
        y: height.saturating_sub(rows * CELL),
        width: cols * CELL,
        height: rows * CELL,
    };
    tracing::debug!(rows, cols, y = area.y, "drawing legend");

    for (row, player) in world.players().iter().enumerate() {
        for (col, level) in world.levels().iter().enumerate() {
            let shade = player.shade(&level.name).unwrap_or(level.color);
            let x0 = area.x + col as u32 * CELL;
            let y0 = area.y + row as u32 * CELL;
            swatch(image, x0, y0, shade, width, height);
        }
    }
    Some(area)
}

/// Fills one cell with `color` and a one-pixel black outline.
fn swatch(image: &mut RgbImage, x0: u32, y0: u32, color: Color, width: u32, height: u32) {
    let fill = Rgb::from(color);
    let outline = Rgb::from(Color::BLACK);
    for y in y0..(y0 + CELL).min(height) {
        for x in x0..(x0 + CELL).min(width) {
            let edge = x == x0 || y == y0 || x == x0 + CELL - 1 || y == y0 + CELL - 1;
            image.put_pixel(x, y, if edge { outline } else { fill });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Level, Player};

    fn world(players: usize) -> World {
        let mut world = World::new(vec![
            Level::new("level1", "level1", 5, 1, Color::new(0, 178, 0)),
            Level::new("level2", "level2", 10, 3, Color::new(0, 127, 0)),
            Level::new("level3", "level3", 15, 5, Color::new(0, 76, 0)),
        ]);
        for i in 0..players {
            let base = Color::new(120, 120, 120);
            let p = Player::new(format!("p{}", i), "P", i as i64, base, world.levels());
            world.add_player(p).unwrap();
        }
        world
    }

    #[test]
    fn grid_sits_in_bottom_left() {
        let mut img = RgbImage::from_pixel(200, 200, Rgb([255, 255, 255]));
        let area = draw_legend(&mut img, &world(2)).unwrap();
        assert_eq!(area, LegendArea { x: 0, y: 110, width: 135, height: 90 });

        // Centre of row 0, column 1 holds the tier-2 shade.
        assert_eq!(img.get_pixel(67, 132).0, [100, 100, 100]);
        // Centre of row 1, column 2 holds the tier-3 shade.
        assert_eq!(img.get_pixel(112, 177).0, [60, 60, 60]);
        // Outline.
        assert_eq!(img.get_pixel(45, 132).0, [0, 0, 0]);
        // Untouched map above and to the right.
        assert_eq!(img.get_pixel(10, 100).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(150, 190).0, [255, 255, 255]);
    }

    #[test]
    fn oversized_legend_is_clipped() {
        let mut img = RgbImage::from_pixel(50, 50, Rgb([255, 255, 255]));
        let area = draw_legend(&mut img, &world(3)).unwrap();
        assert_eq!(area.y, 0);
        assert_eq!(img.get_pixel(20, 20).0, [120, 120, 120]);
    }

    #[test]
    fn empty_world_draws_nothing() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb([1, 2, 3]));
        assert!(draw_legend(&mut img, &world(0)).is_none());
        assert!(img.pixels().all(|p| p.0 == [1, 2, 3]));
    }
}
