//! Connected-region recoloring.
//!
//! Recolors the 4-connected area of identically colored pixels that contains
//! a seed point. Pixels of the same color that are not connected to the seed
//! are left alone.
//!
//! Two strategies produce the same pixel set:
//! - `Labeling` builds a same-color mask over the whole raster, labels its
//!   connected components, and recolors the seed's component. O(pixels) per
//!   call regardless of region size.
//! - `Propagation` walks outward from the seed with a queue and only touches
//!   the region and its border.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::board::{Color, Position};

/// Errors raised while reading, painting, or writing a raster.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("seed {seed} lies outside the {width}x{height} raster")]
    SeedOutOfBounds { seed: Position, width: u32, height: u32 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// How `fill` finds the region to recolor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillStrategy {
    #[default]
    Labeling,
    Propagation,
}

impl FromStr for FillStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "labeling" => Ok(FillStrategy::Labeling),
            "propagation" => Ok(FillStrategy::Propagation),
            other => Err(format!(
                "unknown fill strategy '{}' (expected labeling or propagation)",
                other
            )),
        }
    }
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStrategy::Labeling => f.write_str("labeling"),
            FillStrategy::Propagation => f.write_str("propagation"),
        }
    }
}

/// Recolors the region containing `seed` with `color`.
///
/// Returns the number of pixels in the region.
pub fn fill(
    image: &mut RgbImage,
    seed: Position,
    color: Color,
    strategy: FillStrategy,
) -> Result<usize, RenderError> {
    let (width, height) = image.dimensions();
    if seed.x >= width || seed.y >= height {
        return Err(RenderError::SeedOutOfBounds { seed, width, height });
    }

    let count = match strategy {
        FillStrategy::Labeling => fill_labeled(image, seed, color),
        FillStrategy::Propagation => fill_propagated(image, seed, color),
    };
    tracing::debug!(%seed, %color, pixels = count, "filled region");
    Ok(count)
}

fn fill_labeled(image: &mut RgbImage, seed: Position, color: Color) -> usize {
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);
    let target = image.get_pixel(seed.x, seed.y).0;

    let mask: Vec<bool> = image
        .as_raw()
        .par_chunks_exact(3)
        .map(|px| px == target)
        .collect();

    let (labels, _) = label_components(&mask, w, h);
    let seed_label = labels[seed.y as usize * w + seed.x as usize];

    let paint = Rgb::from(color);
    let mut count = 0;
    for (i, label) in labels.iter().enumerate() {
        if *label == seed_label {
            image.put_pixel((i % w) as u32, (i / w) as u32, paint);
            count += 1;
        }
    }
    count
}

fn fill_propagated(image: &mut RgbImage, seed: Position, color: Color) -> usize {
    let (width, height) = image.dimensions();
    let target = *image.get_pixel(seed.x, seed.y);
    let paint = Rgb::from(color);

    let mut visited = vec![false; width as usize * height as usize];
    let mut queue = VecDeque::new();
    visited[seed.y as usize * width as usize + seed.x as usize] = true;
    queue.push_back((seed.x, seed.y));

    let mut count = 0;
    while let Some((x, y)) = queue.pop_front() {
        image.put_pixel(x, y, paint);
        count += 1;

        for (nx, ny) in neighbors(x, y, width, height) {
            let idx = ny as usize * width as usize + nx as usize;
            if !visited[idx] && *image.get_pixel(nx, ny) == target {
                visited[idx] = true;
                queue.push_back((nx, ny));
            }
        }
    }
    count
}

/// 4-connected neighbors of `(x, y)` inside a `width`x`height` grid.
fn neighbors(x: u32, y: u32, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let left = (x > 0).then(|| (x - 1, y));
    let right = (x + 1 < width).then(|| (x + 1, y));
    let up = (y > 0).then(|| (x, y - 1));
    let down = (y + 1 < height).then(|| (x, y + 1));
    [left, right, up, down].into_iter().flatten()
}

/// Labels the 4-connected components of `mask` (row-major, `width` wide).
///
/// Returns one label per cell, 0 for cells outside the mask and 1..=n for
/// the n components, plus n. Labels are numbered in raster order of each
/// component's first cell.
pub fn label_components(mask: &[bool], width: usize, height: usize) -> (Vec<u32>, u32) {
    debug_assert_eq!(mask.len(), width * height);
    let mut labels = vec![0u32; mask.len()];
    // parent[0] is unused so provisional labels index directly.
    let mut parent: Vec<u32> = vec![0];

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            if !mask[i] {
                continue;
            }
            let left = if x > 0 { labels[i - 1] } else { 0 };
            let up = if y > 0 { labels[i - width] } else { 0 };
            labels[i] = match (left, up) {
                (0, 0) => {
                    let next = parent.len() as u32;
                    parent.push(next);
                    next
                }
                (l, 0) => l,
                (0, u) => u,
                (l, u) => {
                    union(&mut parent, l, u);
                    l.min(u)
                }
            };
        }
    }

    // Compact roots to 1..=n in first-seen order.
    let mut compact = vec![0u32; parent.len()];
    let mut count = 0u32;
    for label in labels.iter_mut() {
        if *label == 0 {
            continue;
        }
        let root = find(&mut parent, *label) as usize;
        if compact[root] == 0 {
            count += 1;
            compact[root] = count;
        }
        *label = compact[root];
    }
    (labels, count)
}

fn find(parent: &mut [u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        parent[x as usize] = parent[parent[x as usize] as usize];
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[hi as usize] = lo;
    }
}
