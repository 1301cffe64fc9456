//! Photo images.
//!
//! A photo image is a pixel buffer owned by the interpreter and named by a
//! string id. [`Image`] is a handle to one: it forwards pixel transfers to
//! the interpreter's [`Photo`] object and reads properties back through
//! scripts.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_tk::{ImageOpt, Tk};
//! use horizon_tk_core::testing::RecordingInterpreter;
//!
//! let tk = Tk::new(Arc::new(RecordingInterpreter::new()));
//! let image = tk.new_image(&[ImageOpt::width(32), ImageOpt::height(16)]).unwrap();
//! assert_eq!(image.size(), (32, 16));
//!
//! let named = tk.new_image(&[ImageOpt::id("logo")]).unwrap();
//! assert_eq!(named.id(), "logo");
//! ```

mod load;
mod options;

use std::fmt;
use std::sync::Arc;

use horizon_tk_core::logging::{span_names, targets};
use horizon_tk_core::{Command, InterpResult, PerfSpan, Photo, TkError, TkResult, Zoom};
use image::RgbaImage;

pub use options::ImageOpt;

use crate::Tk;

/// A handle to a photo image inside the interpreter.
#[derive(Clone)]
pub struct Image {
    id: String,
    photo: Arc<dyn Photo>,
    tk: Tk,
}

impl Image {
    /// The photo's interpreter name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace the photo contents.
    pub fn set_image(&self, pixels: &RgbaImage) -> TkResult<()> {
        let _span = PerfSpan::new(span_names::PHOTO_PUT);
        self.report("put image", self.photo.put_image(pixels))
    }

    /// Replace the photo contents, zooming and subsampling during the
    /// transfer.
    pub fn set_zoomed_image(&self, pixels: &RgbaImage, zoom: Zoom) -> TkResult<()> {
        let _span = PerfSpan::new(span_names::PHOTO_PUT);
        self.report("put zoomed image", self.photo.put_zoomed_image(pixels, zoom))
    }

    /// Copy the photo contents out.
    pub fn to_image(&self) -> RgbaImage {
        self.photo.to_image()
    }

    /// Clear the photo to transparent.
    pub fn blank(&self) -> &Self {
        self.photo.blank();
        self
    }

    /// `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        self.photo.size()
    }

    /// Resize the photo.
    pub fn set_size(&self, width: u32, height: u32) -> TkResult<()> {
        self.report("set size", self.photo.set_size(width, height))
    }

    /// Current gamma. Yields `0.0` if the value cannot be read.
    pub fn gamma(&self) -> f64 {
        let cmd = Command::new(self.id.as_str()).word("cget").word("-gamma");
        match self.tk.eval(&cmd) {
            Ok(value) => value.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(target: targets::IMAGE, image = %self.id, %value, "gamma is not a number");
                0.0
            }),
            Err(err) => {
                tracing::warn!(target: targets::IMAGE, image = %self.id, error = %err, "failed to read gamma");
                0.0
            }
        }
    }

    /// Set the gamma correction.
    pub fn set_gamma(&self, gamma: f64) -> TkResult<()> {
        let cmd = Command::new(self.id.as_str())
            .word("configure")
            .option("gamma", gamma);
        self.tk.eval(&cmd).map(|_| ()).inspect_err(|err| {
            tracing::error!(target: targets::IMAGE, image = %self.id, error = %err, "failed to set gamma");
        })
    }

    /// Remove the photo from the interpreter, consuming the handle.
    pub fn delete(self) -> TkResult<()> {
        self.tk
            .eval(&Command::new("image").word("delete").word(self.id.as_str()))?;
        tracing::debug!(target: targets::IMAGE, image = %self.id, "deleted photo image");
        Ok(())
    }

    fn report(&self, what: &str, result: InterpResult<()>) -> TkResult<()> {
        result.map_err(|err| {
            tracing::error!(target: targets::IMAGE, image = %self.id, error = %err, "{what} failed");
            TkError::from(err)
        })
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.id)
            .field("size", &self.size())
            .finish()
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.photo, &other.photo)
    }
}

impl Tk {
    /// Create a photo image.
    ///
    /// The name comes from an [`ImageOpt::id`] option if present (the last
    /// one wins), otherwise it is generated. Every other option is passed
    /// as `-key {value}`. Fails if the interpreter rejects the command or
    /// the photo cannot be found afterwards.
    pub fn new_image(&self, options: &[ImageOpt]) -> TkResult<Image> {
        let id = options
            .iter()
            .filter(|opt| opt.is_id())
            .map(|opt| opt.value())
            .next_back()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.next_image_id());

        let cmd = options
            .iter()
            .filter(|opt| !opt.is_id())
            .fold(
                Command::new("image").word("create").word("photo").word(id.as_str()),
                |cmd, opt| cmd.option(opt.key(), opt.value()),
            );
        self.eval(&cmd)?;

        let image = self
            .find_image(&id)
            .ok_or_else(|| TkError::ImageNotFound(id.clone()))?;
        tracing::debug!(target: targets::IMAGE, image = %id, "created photo image");
        Ok(image)
    }

    /// Wrap an existing photo image.
    pub fn find_image(&self, id: &str) -> Option<Image> {
        self.interp().find_photo(id).map(|photo| Image {
            id: id.to_string(),
            photo,
            tk: self.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_tk_core::testing::RecordingInterpreter;
    use image::Rgba;

    fn setup() -> (Arc<RecordingInterpreter>, Tk) {
        let interp = Arc::new(RecordingInterpreter::new());
        let tk = Tk::new(interp.clone());
        (interp, tk)
    }

    #[test]
    fn test_new_image_generated_ids_unique() {
        let (_interp, tk) = setup();
        let a = tk.new_image(&[]).unwrap();
        let b = tk.new_image(&[]).unwrap();
        assert!(!a.id().is_empty());
        assert!(!b.id().is_empty());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_new_image_script() {
        let (interp, tk) = setup();
        let image = tk
            .new_image(&[ImageOpt::id("logo"), ImageOpt::gamma(1.5), ImageOpt::format("png")])
            .unwrap();
        assert_eq!(image.id(), "logo");
        assert_eq!(
            interp.last_script().as_deref(),
            Some("image create photo logo -gamma {1.5} -format {png}")
        );
    }

    #[test]
    fn test_new_image_last_id_wins() {
        let (_interp, tk) = setup();
        let image = tk.new_image(&[ImageOpt::id("a"), ImageOpt::id("b")]).unwrap();
        assert_eq!(image.id(), "b");
    }

    #[test]
    fn test_new_image_empty_id_generates() {
        let (_interp, tk) = setup();
        let image = tk.new_image(&[ImageOpt::id("")]).unwrap();
        assert_eq!(image.id(), "horizon_image1");
    }

    #[test]
    fn test_new_image_eval_failure() {
        let (interp, tk) = setup();
        interp.fail("image create", "unknown option \"-bogus\"");
        assert!(matches!(
            tk.new_image(&[ImageOpt::native("bogus", 1)]),
            Err(TkError::Interp(_))
        ));
    }

    #[test]
    fn test_new_image_missing_photo() {
        let (interp, tk) = setup();
        interp.skip_photo_creation(true);
        assert!(matches!(
            tk.new_image(&[ImageOpt::id("ghost")]),
            Err(TkError::ImageNotFound(id)) if id == "ghost"
        ));
    }

    #[test]
    fn test_set_image_and_read_back() {
        let (_interp, tk) = setup();
        let image = tk.new_image(&[]).unwrap();
        let pixels = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        image.set_image(&pixels).unwrap();
        assert_eq!(image.size(), (3, 2));
        assert_eq!(image.to_image(), pixels);

        image.blank();
        assert_eq!(image.to_image().get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_set_zoomed_image() {
        let (interp, tk) = setup();
        let image = tk.new_image(&[ImageOpt::id("z")]).unwrap();
        let pixels = RgbaImage::from_pixel(4, 4, Rgba([1, 1, 1, 255]));
        image
            .set_zoomed_image(&pixels, Zoom::new(2, 1, 1, 2))
            .unwrap();
        assert_eq!(image.size(), (8, 2));
        assert_eq!(
            interp.photo("z").unwrap().last_zoom(),
            Some(Zoom::new(2, 1, 1, 2))
        );

        assert!(matches!(
            image.set_zoomed_image(&pixels, Zoom::new(0, 1, 1, 1)),
            Err(TkError::Interp(_))
        ));
    }

    #[test]
    fn test_set_size() {
        let (_interp, tk) = setup();
        let image = tk.new_image(&[]).unwrap();
        image.set_size(5, 6).unwrap();
        assert_eq!(image.size(), (5, 6));
    }

    #[test]
    fn test_gamma_roundtrip_scripts() {
        let (interp, tk) = setup();
        let image = tk.new_image(&[ImageOpt::id("g")]).unwrap();

        image.set_gamma(2.2).unwrap();
        assert_eq!(
            interp.last_script().as_deref(),
            Some("g configure -gamma {2.2}")
        );

        interp.respond("g cget -gamma", "2.2");
        assert_eq!(image.gamma(), 2.2);
    }

    #[test]
    fn test_gamma_failures_read_zero() {
        let (interp, tk) = setup();
        let image = tk.new_image(&[ImageOpt::id("g")]).unwrap();

        assert_eq!(image.gamma(), 0.0);

        interp.respond("g cget", "bright");
        assert_eq!(image.gamma(), 0.0);

        interp.fail("g cget", "image \"g\" doesn't exist");
        assert_eq!(image.gamma(), 0.0);
    }

    #[test]
    fn test_set_gamma_failure() {
        let (interp, tk) = setup();
        let image = tk.new_image(&[ImageOpt::id("g")]).unwrap();
        interp.fail("g configure", "image \"g\" doesn't exist");
        assert!(image.set_gamma(1.0).is_err());
    }

    #[test]
    fn test_delete() {
        let (interp, tk) = setup();
        let image = tk.new_image(&[ImageOpt::id("tmp")]).unwrap();
        image.delete().unwrap();
        assert_eq!(interp.last_script().as_deref(), Some("image delete tmp"));
        assert!(tk.find_image("tmp").is_none());
    }

    #[test]
    fn test_find_image() {
        let (_interp, tk) = setup();
        let created = tk.new_image(&[ImageOpt::id("x")]).unwrap();
        assert_eq!(tk.find_image("x"), Some(created));
        assert!(tk.find_image("y").is_none());
    }
}
