//! Batch pipeline.
//!
//! Loads the tables and the map raster, applies requested claims, paints
//! every province, draws the legend, and writes the result.

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::RgbImage;

use crate::board::{Palette, World, WorldError};
use crate::claim::ClaimError;
use crate::config::Config;
use crate::protocol::{build_world, SourceError, Tables};
use crate::render::{
    draw_legend, load_raster, paint_world, save_raster, FillStrategy, LegendArea, PaintReport,
    RenderError,
};

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error("unknown player '{0}'")]
    UnknownPlayer(String),

    #[error("unknown province '{0}'")]
    UnknownProvince(String),
}

/// A loaded world together with the raster it is painted on.
pub struct Engine {
    world: World,
    image: RgbImage,
    strategy: FillStrategy,
}

impl Engine {
    pub fn new(world: World, image: RgbImage, strategy: FillStrategy) -> Self {
        Engine { world, image, strategy }
    }

    /// Builds the world from `tables` and decodes the raster at `image`.
    pub fn load(
        tables: &Tables,
        image: &Path,
        strategy: FillStrategy,
    ) -> Result<Self, EngineError> {
        let start = Instant::now();
        let world = build_world(tables, &Palette::css())?;
        let image = load_raster(image)?;
        tracing::info!(
            width = image.width(),
            height = image.height(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "data loaded"
        );
        Ok(Engine::new(world, image, strategy))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Claims a province by name for a player by key.
    pub fn claim(&mut self, player: &str, province: &str) -> Result<u32, EngineError> {
        let player_id = self
            .world
            .player_id(player)
            .ok_or_else(|| EngineError::UnknownPlayer(player.to_string()))?;
        let province_id = self
            .world
            .province_id(province)
            .ok_or_else(|| EngineError::UnknownProvince(province.to_string()))?;
        Ok(self.world.claim(province_id, player_id)?)
    }

    /// Paints every province in its current color.
    pub fn paint(&mut self) -> PaintReport {
        paint_world(&self.world, &mut self.image, self.strategy)
    }

    /// Draws the player legend over the bottom-left corner.
    pub fn legend(&mut self) -> Option<LegendArea> {
        draw_legend(&mut self.image, &self.world)
    }

    pub fn write(&self, path: &Path) -> Result<(), EngineError> {
        save_raster(&self.image, path)?;
        Ok(())
    }

    /// Runs the whole pipeline for `config` and returns the output path.
    ///
    /// Rejected claims are logged and do not stop the run.
    pub fn run(config: &Config) -> Result<PathBuf, EngineError> {
        let tables = config.data.tables();
        let mut engine = Engine::load(&tables, config.image_path(), config.strategy)?;

        for (player, province) in config.claim_requests() {
            if let Err(e) = engine.claim(&player, &province) {
                tracing::warn!(%player, %province, error = %e, "claim rejected");
            }
        }

        engine.paint();
        if !config.no_legend {
            engine.legend();
        }

        let output = config.output_path();
        engine.write(&output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Level, Player, Position, ProvinceSpec};
    use image::Rgb;

    const LAND: Color = Color::new(0, 178, 0);

    fn engine() -> Engine {
        let mut world = World::new(vec![Level::new("level1", "level1", 5, 1, LAND)]);
        let r = world.add_region("r");
        for (name, x, adjacent) in [("W", 1, "E"), ("E", 5, "W")] {
            world
                .add_province(
                    r,
                    ProvinceSpec {
                        name: name.to_string(),
                        level: "level1".to_string(),
                        position: Position::new(x, 1),
                        adjacent: vec![adjacent.to_string()],
                        ..ProvinceSpec::default()
                    },
                )
                .unwrap();
        }
        let p = world
            .add_player(
                Player::new("p1", "Alice", 1, Color::new(200, 0, 0), world.levels())
                    .with_balance(5),
            )
            .unwrap();
        world.assign_province(p, "W");

        let mut image = RgbImage::from_pixel(7, 3, Rgb::from(LAND));
        for y in 0..3 {
            image.put_pixel(3, y, Rgb([0, 0, 0]));
        }
        Engine::new(world, image, FillStrategy::Propagation)
    }

    #[test]
    fn claims_then_paints() {
        let mut engine = engine();
        assert_eq!(engine.claim("p1", "E").unwrap(), 5);
        let report = engine.paint();
        assert_eq!(report.painted, 2);
        assert_eq!(engine.image().get_pixel(6, 2), &Rgb([200, 0, 0]));
        assert_eq!(engine.image().get_pixel(3, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn unknown_names_are_errors() {
        let mut engine = engine();
        assert!(matches!(engine.claim("nobody", "E"), Err(EngineError::UnknownPlayer(_))));
        assert!(matches!(engine.claim("p1", "NOWHERE"), Err(EngineError::UnknownProvince(_))));
        assert!(matches!(engine.claim("p1", "W"), Err(EngineError::Claim(_))));
    }
}
