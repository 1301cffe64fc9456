//! An in-memory interpreter for tests.
//!
//! [`RecordingInterpreter`] records every script, keeps registered actions
//! so tests can fire them the way the event loop would, creates
//! [`MemoryPhoto`]s when it sees `image create photo` and drops them again
//! on `image delete`.
//!
//! ```
//! use horizon_tk_core::testing::RecordingInterpreter;
//! use horizon_tk_core::Interpreter;
//!
//! let interp = RecordingInterpreter::new();
//! interp.respond("winfo exists", "1");
//! assert_eq!(interp.eval("winfo exists .b").unwrap(), "1");
//! assert_eq!(interp.scripts(), vec!["winfo exists .b".to_string()]);
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use image::{Rgba, RgbaImage};
use parking_lot::Mutex;

use crate::command::split_list;
use crate::error::{InterpError, InterpResult};
use crate::interp::{Action, Interpreter, Photo, Zoom};

#[derive(Default)]
struct RecorderState {
    scripts: Vec<String>,
    actions: HashMap<String, Action>,
    photos: HashMap<String, Arc<MemoryPhoto>>,
    responses: Vec<(String, InterpResult<String>)>,
    skip_photo_creation: bool,
    reject_puts: bool,
}

/// A scriptable stand-in for a real interpreter.
#[derive(Default)]
pub struct RecordingInterpreter {
    state: Mutex<RecorderState>,
}

impl RecordingInterpreter {
    /// Create an interpreter with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer scripts starting with `prefix` with `result`. Later
    /// registrations take precedence.
    pub fn respond(&self, prefix: impl Into<String>, result: impl Into<String>) {
        self.state
            .lock()
            .responses
            .push((prefix.into(), Ok(result.into())));
    }

    /// Fail scripts starting with `prefix` with `message`.
    pub fn fail(&self, prefix: impl Into<String>, message: impl Into<String>) {
        let prefix = prefix.into();
        let err = InterpError::new(prefix.clone(), message);
        self.state.lock().responses.push((prefix, Err(err)));
    }

    /// Accept `image create photo` without creating a photo, so lookups
    /// after creation fail.
    pub fn skip_photo_creation(&self, skip: bool) {
        self.state.lock().skip_photo_creation = skip;
    }

    /// Create photos whose pixel transfers fail.
    pub fn reject_pixel_puts(&self, reject: bool) {
        self.state.lock().reject_puts = reject;
    }

    /// Ids of the photos currently held, sorted.
    pub fn photo_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state.lock().photos.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// All scripts evaluated so far, in order.
    pub fn scripts(&self) -> Vec<String> {
        self.state.lock().scripts.clone()
    }

    /// The most recently evaluated script.
    pub fn last_script(&self) -> Option<String> {
        self.state.lock().scripts.last().cloned()
    }

    /// Forget recorded scripts.
    pub fn clear_scripts(&self) {
        self.state.lock().scripts.clear();
    }

    /// Whether an action with this id has been registered.
    pub fn has_action(&self, id: &str) -> bool {
        self.state.lock().actions.contains_key(id)
    }

    /// Number of registered actions.
    pub fn action_count(&self) -> usize {
        self.state.lock().actions.len()
    }

    /// Invoke a registered action with substitution arguments, as the event
    /// loop would. Returns `false` if no such action exists.
    pub fn fire(&self, id: &str, args: &[&str]) -> bool {
        let action = self.state.lock().actions.get(id).cloned();
        match action {
            Some(action) => {
                let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
                action(&args);
                true
            }
            None => false,
        }
    }

    /// The in-memory photo named `id`.
    pub fn photo(&self, id: &str) -> Option<Arc<MemoryPhoto>> {
        self.state.lock().photos.get(id).cloned()
    }

    fn create_photo(state: &mut RecorderState, script: &str) -> InterpResult<String> {
        let words = split_list(script)?;
        let id = words
            .get(3)
            .cloned()
            .ok_or_else(|| InterpError::new(script, "wrong # args: should be \"image create photo name\""))?;

        let mut width = 0;
        let mut height = 0;
        for pair in words[4..].chunks(2) {
            if let [key, value] = pair {
                match key.as_str() {
                    "-width" => width = value.parse().unwrap_or(0),
                    "-height" => height = value.parse().unwrap_or(0),
                    _ => {}
                }
            }
        }

        if !state.skip_photo_creation {
            let photo = MemoryPhoto::new(width, height);
            photo.reject_puts(state.reject_puts);
            state.photos.insert(id.clone(), Arc::new(photo));
        }
        Ok(id)
    }

    fn delete_photos(state: &mut RecorderState, script: &str) -> InterpResult<String> {
        for id in split_list(script)?.iter().skip(2) {
            state.photos.remove(id);
        }
        Ok(String::new())
    }
}

impl Interpreter for RecordingInterpreter {
    fn eval(&self, script: &str) -> InterpResult<String> {
        let mut state = self.state.lock();
        state.scripts.push(script.to_string());

        let canned = state
            .responses
            .iter()
            .rev()
            .find(|(prefix, _)| script.starts_with(prefix.as_str()))
            .map(|(_, result)| result.clone());
        if let Some(result) = canned {
            return result.map_err(|e| InterpError::new(script, e.message));
        }

        if script.starts_with("image create photo") {
            return Self::create_photo(&mut state, script);
        }
        if script.starts_with("image delete") {
            return Self::delete_photos(&mut state, script);
        }
        Ok(String::new())
    }

    fn create_action(&self, id: &str, action: Action) -> InterpResult<()> {
        self.state.lock().actions.insert(id.to_string(), action);
        Ok(())
    }

    fn find_photo(&self, id: &str) -> Option<Arc<dyn Photo>> {
        self.photo(id).map(|p| p as Arc<dyn Photo>)
    }
}

/// A photo whose pixels live in process memory.
pub struct MemoryPhoto {
    pixels: Mutex<RgbaImage>,
    last_zoom: Mutex<Option<Zoom>>,
    reject_puts: AtomicBool,
}

impl MemoryPhoto {
    /// Create a transparent photo.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: Mutex::new(RgbaImage::new(width, height)),
            last_zoom: Mutex::new(None),
            reject_puts: AtomicBool::new(false),
        }
    }

    /// Make subsequent pixel transfers fail.
    pub fn reject_puts(&self, reject: bool) {
        self.reject_puts.store(reject, Ordering::Relaxed);
    }

    fn check_put(&self) -> InterpResult<()> {
        if self.reject_puts.load(Ordering::Relaxed) {
            Err(InterpError::new("put", "not enough free memory for image buffer"))
        } else {
            Ok(())
        }
    }

    /// Zoom factors of the most recent zoomed put.
    pub fn last_zoom(&self) -> Option<Zoom> {
        *self.last_zoom.lock()
    }
}

impl Photo for MemoryPhoto {
    fn put_image(&self, pixels: &RgbaImage) -> InterpResult<()> {
        self.check_put()?;
        *self.pixels.lock() = pixels.clone();
        Ok(())
    }

    fn put_zoomed_image(&self, pixels: &RgbaImage, zoom: Zoom) -> InterpResult<()> {
        self.check_put()?;
        if zoom.zoom_x == 0 || zoom.zoom_y == 0 || zoom.subsample_x == 0 || zoom.subsample_y == 0
        {
            return Err(InterpError::new(
                zoom.to_string(),
                "zoom and subsample factors must be positive",
            ));
        }

        let width = pixels.width() * zoom.zoom_x / zoom.subsample_x;
        let height = pixels.height() * zoom.zoom_y / zoom.subsample_y;
        let out = RgbaImage::from_fn(width, height, |x, y| {
            let sx = x * zoom.subsample_x / zoom.zoom_x;
            let sy = y * zoom.subsample_y / zoom.zoom_y;
            *pixels.get_pixel(sx, sy)
        });

        *self.pixels.lock() = out;
        *self.last_zoom.lock() = Some(zoom);
        Ok(())
    }

    fn to_image(&self) -> RgbaImage {
        self.pixels.lock().clone()
    }

    fn blank(&self) {
        for p in self.pixels.lock().pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
    }

    fn size(&self) -> (u32, u32) {
        self.pixels.lock().dimensions()
    }

    fn set_size(&self, width: u32, height: u32) -> InterpResult<()> {
        let mut pixels = self.pixels.lock();
        let old = std::mem::replace(&mut *pixels, RgbaImage::new(0, 0));
        *pixels = RgbaImage::from_fn(width, height, |x, y| {
            if x < old.width() && y < old.height() {
                *old.get_pixel(x, y)
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        Ok(())
    }
}
