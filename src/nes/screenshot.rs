// Screenshot functionality
//
// The core has no window; dumping the frame buffer to a PNG is how a
// headless host observes picture output.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::video::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::config::ScreenshotConfig;

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save the frame buffer as a PNG
///
/// The file lands in the configured screenshot directory (created if
/// needed), named `frame.png` or `frame_YYYYMMDD_HHMMSS.png` depending on
/// the timestamp setting.
///
/// # Arguments
///
/// * `frame` - The frame buffer to dump
/// * `config` - Directory and naming settings
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// I/O errors creating the directory or file, or PNG encoding errors.
pub fn save_screenshot(
    frame: &FrameBuffer,
    config: &ScreenshotConfig,
) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(&config.directory)?;

    let filename = if config.include_timestamp {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("frame_{}.png", timestamp)
    } else {
        "frame.png".to_string()
    };
    let path = config.directory.join(filename);

    write_png(frame, &path)?;
    log::info!("screenshot saved to {}", path.display());

    Ok(path)
}

/// Encode the frame buffer into a PNG file at `path`
pub fn write_png(frame: &FrameBuffer, path: &Path) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let writer = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&frame.to_rgba_vec())?;

    Ok(())
}
