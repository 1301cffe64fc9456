//! Photo image creation options.

use std::fmt;
use std::path::Path;

/// An `image create photo` option.
///
/// The `id` option is special: it names the photo instead of being passed
/// to the interpreter. All other options become `-key {value}`.
///
/// ```
/// use horizon_tk::ImageOpt;
///
/// let opts = [ImageOpt::id("logo"), ImageOpt::gamma(1.2), ImageOpt::width(64)];
/// assert_eq!(opts[1].key(), "gamma");
/// assert_eq!(opts[1].value(), "1.2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOpt {
    key: String,
    value: String,
}

impl ImageOpt {
    pub(crate) const ID: &'static str = "id";

    /// Name the photo explicitly instead of generating a name.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            key: Self::ID.to_string(),
            value: id.into(),
        }
    }

    /// `-gamma`: gamma correction applied when displaying.
    pub fn gamma(gamma: f64) -> Self {
        Self::native("gamma", gamma)
    }

    /// `-file`: let the interpreter load the file itself.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::native("file", path.as_ref().display())
    }

    /// `-width`: fixed width in pixels.
    pub fn width(width: u32) -> Self {
        Self::native("width", width)
    }

    /// `-height`: fixed height in pixels.
    pub fn height(height: u32) -> Self {
        Self::native("height", height)
    }

    /// `-format`: format name used with `-file` or `-data`.
    pub fn format(format: impl fmt::Display) -> Self {
        Self::native("format", format)
    }

    /// An arbitrary option, passed through unvalidated.
    pub fn native(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }

    /// The option name, without the leading dash.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The option value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn is_id(&self) -> bool {
        self.key == Self::ID
    }
}
