//! Raster decode/encode.

use std::path::{Path, PathBuf};

use image::RgbImage;

use super::fill::RenderError;

/// Decodes an image file into an RGB buffer, dropping any alpha channel.
pub fn load_raster(path: &Path) -> Result<RgbImage, RenderError> {
    tracing::info!(path = %path.display(), "loading map image");
    Ok(image::open(path)?.to_rgb8())
}

/// Encodes `image` to `path`; the format follows the file extension.
pub fn save_raster(image: &RgbImage, path: &Path) -> Result<(), RenderError> {
    tracing::info!(path = %path.display(), "writing map image");
    image.save(path)?;
    Ok(())
}

/// `dir/out_<stem>.<ext>` next to the input image.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let mut name = format!("out_{}", stem);
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_is_prefixed_sibling() {
        assert_eq!(
            default_output_path(Path::new("maps/image.png")),
            PathBuf::from("maps/out_image.png")
        );
        assert_eq!(default_output_path(Path::new("image")), PathBuf::from("out_image"));
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let err = load_raster(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, RenderError::Image(_)));
    }
}
