//! Application entry point for the fractal tree viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod canvas;
mod viewer;

use tracing_subscriber::EnvFilter;
use viewer::Viewer;

/// Starts the native eframe application.
///
/// Log verbosity follows `RUST_LOG` and defaults to `info`; use
/// `RUST_LOG=tree_core=debug` to see per-draw statistics.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = eframe::NativeOptions::default();

    tracing::info!("starting viewer");
    eframe::run_native(
        "Trees!",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new()))),
    )
}
