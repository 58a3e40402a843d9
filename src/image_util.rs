//! Image loading helpers.

use std::path::Path;

use image::DynamicImage;

/// Extensions offered by the open dialog and accepted on drop.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff"];

#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub fn load_image(path: &Path) -> Result<DynamicImage, ImageLoadError> {
    if !path.exists() {
        return Err(ImageLoadError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("path not found: {}", path.display()),
        )));
    }

    Ok(image::open(path)?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::RgbaImage;

    use super::*;

    #[test]
    fn missing_path_reports_io_error() {
        let err = load_image(Path::new("/nonexistent/sheet.png"));
        assert!(matches!(err, Err(ImageLoadError::Io(_))));
    }

    #[test]
    fn roundtrips_a_png_from_disk() {
        let dir = std::env::temp_dir().join(format!("spritecutter-load-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("probe.png");

        RgbaImage::from_pixel(6, 4, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (6, 4));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn corrupt_file_reports_image_error() {
        let dir = std::env::temp_dir().join(format!("spritecutter-corrupt-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not-an-image.png");
        fs::write(&path, b"definitely not a png").unwrap();

        let err = load_image(&path);
        assert!(matches!(err, Err(ImageLoadError::Image(_))));

        fs::remove_dir_all(&dir).unwrap();
    }
}
