//! provincemap -- paints province ownership onto a map raster.
//!
//! Reads the level, topology, and ownership tables plus a map image, fills
//! each province with its owner's shade, draws a legend, and writes the
//! result next to the input (or to `--outfile`).

use std::process;
use std::time::Instant;

use clap::Parser;

use provincemap::config::Config;
use provincemap::engine::Engine;

fn main() {
    let config = Config::parse();
    config.data.init_logging();

    let start = Instant::now();
    match Engine::run(&config) {
        Ok(output) => {
            tracing::info!(
                output = %output.display(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "run completed"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("provincemap: {}", e);
            process::exit(1);
        }
    }
}
