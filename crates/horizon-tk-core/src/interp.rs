//! The interpreter boundary.
//!
//! Horizon Tk never executes scripts itself. Everything goes through an
//! [`Interpreter`] implementation that owns the widget tree, the photo
//! images and the event loop. The traits here are the complete list of
//! services the bindings consume:
//!
//! - script evaluation ([`Interpreter::eval`])
//! - action registration keyed by a string id ([`Interpreter::create_action`])
//! - photo lookup and pixel transfer ([`Interpreter::find_photo`], [`Photo`])

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::InterpResult;

/// A callback the interpreter invokes with positional string arguments.
pub type Action = Arc<dyn Fn(&[String]) + Send + Sync>;

/// An embedded script interpreter.
///
/// Implementations must invoke registered actions synchronously from the
/// interpreter's event loop.
pub trait Interpreter: Send + Sync {
    /// Evaluate a script and return its string result.
    fn eval(&self, script: &str) -> InterpResult<String>;

    /// Register `action` as the command named `id`, replacing any previous
    /// command with that name.
    fn create_action(&self, id: &str, action: Action) -> InterpResult<()>;

    /// Look up the photo image named `id`.
    fn find_photo(&self, id: &str) -> Option<Arc<dyn Photo>>;
}

/// Zoom and subsample factors applied by the interpreter while copying
/// pixels into a photo.
///
/// Zoom multiplies, subsample divides. The resampling itself is done by
/// the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Zoom {
    /// Horizontal zoom factor.
    pub zoom_x: u32,
    /// Vertical zoom factor.
    pub zoom_y: u32,
    /// Horizontal subsample factor.
    pub subsample_x: u32,
    /// Vertical subsample factor.
    pub subsample_y: u32,
}

impl Zoom {
    /// No zoom and no subsampling.
    pub const IDENTITY: Zoom = Zoom {
        zoom_x: 1,
        zoom_y: 1,
        subsample_x: 1,
        subsample_y: 1,
    };

    /// Create zoom factors.
    pub fn new(zoom_x: u32, zoom_y: u32, subsample_x: u32, subsample_y: u32) -> Self {
        Self {
            zoom_x,
            zoom_y,
            subsample_x,
            subsample_y,
        }
    }

    /// Uniform zoom on both axes.
    pub fn uniform(zoom: u32) -> Self {
        Self::new(zoom, zoom, 1, 1)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "-zoom {} {} -subsample {} {}",
            self.zoom_x, self.zoom_y, self.subsample_x, self.subsample_y
        )
    }
}

/// A photo image living inside the interpreter.
///
/// The interpreter owns the pixel data; a handle only forwards requests.
pub trait Photo: Send + Sync {
    /// Replace the photo contents with `pixels`.
    fn put_image(&self, pixels: &RgbaImage) -> InterpResult<()>;

    /// Replace the photo contents with `pixels`, applying `zoom` during the
    /// transfer.
    fn put_zoomed_image(&self, pixels: &RgbaImage, zoom: Zoom) -> InterpResult<()>;

    /// Copy the current photo contents out.
    fn to_image(&self) -> RgbaImage;

    /// Clear the photo to fully transparent.
    fn blank(&self);

    /// Current `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the photo.
    fn set_size(&self, width: u32, height: u32) -> InterpResult<()>;
}
