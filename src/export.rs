use super::error::CompareError;
use super::render::ChartLayout;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

/// Saves the chart and returns where it went.
pub fn save(layout: &ChartLayout, fout: &Path) -> Result<PathBuf, CompareError> {
    layout.draw_png(fout)?;
    Ok(fout.to_path_buf())
}

pub fn success_line(path: &Path) -> String {
    format!("Graph saved successfully at: {}", path.display())
}

pub fn diagnostic_line(e: &CompareError) -> String {
    format!("Error: {}", e)
}

/// Opens the image with the default viewer of the platform, without waiting for it.
pub fn show(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut viewer = Command::new("open");
    #[cfg(target_os = "windows")]
    let mut viewer = Command::new("explorer");
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut viewer = Command::new("xdg-open");
    viewer.arg(path).spawn()?;
    info!("opened {} in the image viewer", path.display());
    Ok(())
}

/// Runs `viewer` on the saved image. A viewer that fails to start is only
/// a warning, the image is already on disk. Returns whether it started.
pub fn show_with<F>(path: &Path, viewer: F) -> bool
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    match viewer(path) {
        Ok(()) => true,
        Err(e) => {
            warn!("could not open {} in a viewer: {}", path.display(), e);
            false
        }
    }
}

/// Final step of every binary: the success line and the viewer,
/// or the diagnostic and exit code 1. Never returns on failure.
pub fn finish(outcome: Result<PathBuf, CompareError>, show_image: bool) {
    match outcome {
        Ok(path) => {
            println!("{}", success_line(&path));
            if show_image {
                show_with(&path, show);
            }
        }
        Err(e) => {
            eprintln!("{}", diagnostic_line(&e));
            std::process::exit(1);
        }
    }
}
