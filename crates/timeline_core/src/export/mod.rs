//! PNG export of a laid-out timeline.
//!
//! # Responsibility
//! - Rasterize one element of a `RenderedView` onto a padded canvas.
//! - Encode the canvas as PNG, as a data URL, or as a `timeline.png` file.
//!
//! # Invariants
//! - Canvas size is the element box plus `padding` on every side.
//! - Content is translated by `padding` and clipped to the element box.
//! - A missing element is a silent no-op (`Ok(None)`), never an error.

use crate::render::layout::{RenderedView, Rgba};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, Rgba as Pixel, RgbaImage};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// File name used when saving an export.
pub const EXPORT_FILE_NAME: &str = "timeline.png";
pub const DEFAULT_PADDING: u32 = 32;
pub const WHITE: Rgba = [0xff, 0xff, 0xff, 0xff];

#[derive(Debug)]
pub enum ExportError {
    Encode(image::ImageError),
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "png encoding failed: {err}"),
            Self::Io(err) => write!(f, "writing export failed: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(value: image::ImageError) -> Self {
        Self::Encode(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Canvas options for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub padding: u32,
    pub background: Rgba,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            background: WHITE,
        }
    }
}

/// Encoded PNG export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl ExportedImage {
    /// `data:image/png;base64,...` form of the PNG bytes.
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }

    /// Writes `timeline.png` into `dir`, replacing any previous export.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(EXPORT_FILE_NAME);
        std::fs::write(&path, &self.png)?;
        info!(
            "event=export_save module=export status=ok bytes={} path={}",
            self.png.len(),
            path.display()
        );
        Ok(path)
    }
}

/// Rasterizes element `root_id` of `view` to PNG.
///
/// Returns `Ok(None)` when the element does not exist.
pub fn export_png(
    view: &RenderedView,
    root_id: &str,
    options: &ExportOptions,
) -> Result<Option<ExportedImage>, ExportError> {
    let Some(root) = view.element(root_id) else {
        debug!("event=export_png module=export status=skip reason=missing_element id={root_id}");
        return Ok(None);
    };

    let padding = options.padding;
    let width = root.width.saturating_add(padding.saturating_mul(2));
    let height = root.height.saturating_add(padding.saturating_mul(2));
    let mut canvas = RgbaImage::from_pixel(width, height, Pixel(options.background));

    for op in view.ops() {
        let Some(clip) = op.rect.intersect(&root) else {
            continue;
        };
        let left = clip.x - root.x + padding;
        let top = clip.y - root.y + padding;
        for y in top..top + clip.height {
            for x in left..left + clip.width {
                canvas.put_pixel(x, y, Pixel(op.color));
            }
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    canvas.write_to(&mut cursor, ImageFormat::Png)?;
    let png = cursor.into_inner();
    info!(
        "event=export_png module=export status=ok id={root_id} width={width} height={height} bytes={}",
        png.len()
    );

    Ok(Some(ExportedImage { width, height, png }))
}
