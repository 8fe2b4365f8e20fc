//! Raster file I/O.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::RgbImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterIoError {
    /// Unreadable or undecodable input raster.
    #[error("failed to load raster {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save raster {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads a raster file and converts it to 8-bit RGB.
pub fn load_raster(path: &Path) -> Result<RgbImage, RasterIoError> {
    let img = image::open(path).map_err(|source| RasterIoError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.into_rgb8())
}

/// Saves a raster, creating parent directories as needed. The format
/// follows the file extension.
pub fn save_raster(path: &Path, img: &RgbImage) -> Result<(), RasterIoError> {
    if let Some(parent) = parent_dir(path) {
        fs::create_dir_all(parent).map_err(|source| RasterIoError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    img.save(path).map_err(|source| RasterIoError::Save {
        path: path.to_path_buf(),
        source,
    })
}

/// Output name for the annotated copy of `path`: `<stem>_detections.<ext>`.
pub fn annotated_file_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "raster".to_owned());
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_detections.{ext}"),
        None => format!("{name}_detections.png"),
    }
}

pub(crate) fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn load_failure_carries_the_path() {
        let err = load_raster(Path::new("/nonexistent/raster.png")).unwrap_err();
        match err {
            RasterIoError::Load { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/raster.png"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn save_and_reload_round_trips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        let img = RgbImage::from_pixel(32, 16, Rgb([12, 200, 34]));
        save_raster(&path, &img).unwrap();
        let back = load_raster(&path).unwrap();
        assert_eq!(back.dimensions(), (32, 16));
        assert_eq!(*back.get_pixel(31, 15), Rgb([12, 200, 34]));
    }

    #[test]
    fn annotated_name_inserts_suffix_before_extension() {
        assert_eq!(
            annotated_file_name(Path::new("scene/tract_42.png")),
            "tract_42_detections.png"
        );
        assert_eq!(
            annotated_file_name(Path::new("capture.JPG")),
            "capture_detections.JPG"
        );
        assert_eq!(annotated_file_name(Path::new("bare")), "bare_detections.png");
    }
}
