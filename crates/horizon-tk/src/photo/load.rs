//! Loading photo images from disk.

use std::path::Path;

use horizon_tk_core::logging::targets;
use horizon_tk_core::{TkError, TkResult};

use super::{Image, ImageOpt};
use crate::Tk;

/// GIF files are read by the interpreter's own loader.
fn is_gif(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
}

impl Tk {
    /// Create a photo image from a file.
    ///
    /// `.gif` files are handed to the interpreter with `-file`. Any other
    /// format is decoded here and the pixels are transferred into a new
    /// photo created with `options`. If the transfer fails the new photo is
    /// deleted again before the error is returned.
    pub fn load_image(&self, path: impl AsRef<Path>, options: &[ImageOpt]) -> TkResult<Image> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(TkError::InvalidArgument("image path is empty".into()));
        }

        if is_gif(path) {
            let mut options = options.to_vec();
            options.push(ImageOpt::file(path));
            return self.new_image(&options);
        }

        let pixels = image::open(path)
            .inspect_err(|err| {
                tracing::error!(target: targets::IMAGE, path = %path.display(), error = %err, "failed to decode image");
            })?
            .to_rgba8();
        tracing::debug!(
            target: targets::IMAGE,
            path = %path.display(),
            width = pixels.width(),
            height = pixels.height(),
            "decoded image"
        );

        let image = self.new_image(options)?;
        if let Err(err) = image.set_image(&pixels) {
            let id = image.id().to_string();
            if let Err(cleanup) = image.delete() {
                tracing::warn!(target: targets::IMAGE, image = %id, error = %cleanup, "failed to delete photo");
            }
            return Err(err);
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gif() {
        assert!(is_gif(Path::new("logo.gif")));
        assert!(is_gif(Path::new("/tmp/LOGO.GIF")));
        assert!(is_gif(Path::new("a.b.Gif")));
        assert!(!is_gif(Path::new("logo.png")));
        assert!(!is_gif(Path::new("gif")));
        assert!(!is_gif(Path::new("logo.gif.png")));
    }
}
