//! Event records built from substitution arguments.

use horizon_tk_core::{WidgetRef, WidgetRegistry};

/// The placeholder list appended to every bound callback.
///
/// The interpreter replaces each code with a field of the real event and
/// passes the results as positional arguments. [`Event::parse`] reads them
/// back in exactly this order, so the two must change together.
pub const SUBSTITUTION_TEMPLATE: &str =
    "%T %E %W %t %b %x %y %D %k %K %A %d %f %w %h %m %o %p %s %X %Y";

/// Number of positional fields in [`SUBSTITUTION_TEMPLATE`].
pub const FIELD_COUNT: usize = 21;

/// What the interpreter substitutes for a field that does not apply to the
/// event type.
const NOT_APPLICABLE: &str = "??";

/// The event type codes the interpreter reports through `%T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyPress,
    KeyRelease,
    ButtonPress,
    ButtonRelease,
    Motion,
    Enter,
    Leave,
    FocusIn,
    FocusOut,
    Expose,
    Visibility,
    Create,
    Destroy,
    Unmap,
    Map,
    Reparent,
    Configure,
    Gravity,
    Circulate,
    Property,
    Virtual,
    Activate,
    Deactivate,
    MouseWheel,
    /// A code without a dedicated variant.
    Other(i32),
}

impl EventKind {
    /// Map a numeric type code to its kind.
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => Self::KeyPress,
            3 => Self::KeyRelease,
            4 => Self::ButtonPress,
            5 => Self::ButtonRelease,
            6 => Self::Motion,
            7 => Self::Enter,
            8 => Self::Leave,
            9 => Self::FocusIn,
            10 => Self::FocusOut,
            12 => Self::Expose,
            15 => Self::Visibility,
            16 => Self::Create,
            17 => Self::Destroy,
            18 => Self::Unmap,
            19 => Self::Map,
            21 => Self::Reparent,
            22 => Self::Configure,
            24 => Self::Gravity,
            26 => Self::Circulate,
            28 => Self::Property,
            36 => Self::Virtual,
            37 => Self::Activate,
            38 => Self::Deactivate,
            39 => Self::MouseWheel,
            other => Self::Other(other),
        }
    }
}

/// A snapshot of one event occurrence.
///
/// Fields that do not apply to the event type hold zero or the empty
/// string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    /// Numeric type code (`%T`). See [`Event::kind`].
    pub event_type: i32,
    /// `true` for events produced by event injection rather than by the
    /// window system (`%E`).
    pub synthetic: bool,
    /// The window the event was reported to (`%W`). `None` when the path
    /// is not registered with the session.
    pub widget: Option<WidgetRef>,
    /// Server timestamp in milliseconds (`%t`). Never negative.
    pub timestamp: i64,
    /// Button number for button press/release events (`%b`).
    pub mouse_button: i32,
    /// Pointer x relative to the receiving window (`%x`).
    pub x: i32,
    /// Pointer y relative to the receiving window (`%y`).
    pub y: i32,
    /// Pointer x relative to the screen (`%X`).
    pub global_x: i32,
    /// Pointer y relative to the screen (`%Y`).
    pub global_y: i32,
    /// Wheel rotation; the sign gives the direction (`%D`).
    pub wheel_delta: i32,
    /// Key code for key events (`%k`).
    pub key_code: i32,
    /// Key symbol such as `a`, `Return` or `Shift_L` (`%K`).
    pub key_sym: String,
    /// Text produced by the key, if any (`%A`).
    pub key_text: String,
    /// First character of [`key_text`](Self::key_text).
    pub key_rune: Option<char>,
    /// Detail or user data (`%d`): notify detail for crossing and focus
    /// events, the `-data` value for virtual events.
    pub user_data: String,
    /// Whether the receiving window has focus, for Enter/Leave (`%f`).
    pub focus: bool,
    /// Width for Configure/Expose-style events (`%w`).
    pub width: i32,
    /// Height for Configure/Expose-style events (`%h`).
    pub height: i32,
    /// Notify mode for crossing and focus events (`%m`).
    pub mode: String,
    /// Override-redirect flag for Map/Reparent/Configure (`%o`).
    pub override_redirect: String,
    /// `PlaceOnTop` or `PlaceOnBottom` for Circulate events (`%p`).
    pub place: String,
    /// Modifier state or visibility/property state (`%s`).
    pub state: String,
}

impl Event {
    /// Build an event from substitution arguments.
    ///
    /// Parsing never fails: numbers that do not parse become zero, missing
    /// trailing arguments are treated as empty, `??` becomes the empty
    /// string and negative timestamps become zero.
    pub fn parse<S: AsRef<str>>(args: &[S], widgets: &WidgetRegistry) -> Self {
        let arg = |i: usize| args.get(i).map(|s| s.as_ref()).unwrap_or("");

        let key_text = to_string(arg(10));
        let key_rune = key_text.chars().next();

        Self {
            event_type: to_int(arg(0)),
            synthetic: to_bool(arg(1)),
            widget: widgets.find_by_path(&to_string(arg(2))),
            timestamp: to_int64(arg(3)).max(0),
            mouse_button: to_int(arg(4)),
            x: to_int(arg(5)),
            y: to_int(arg(6)),
            wheel_delta: to_int(arg(7)),
            key_code: to_int(arg(8)),
            key_sym: to_string(arg(9)),
            key_text,
            key_rune,
            user_data: to_string(arg(11)),
            focus: to_bool(arg(12)),
            width: to_int(arg(13)),
            height: to_int(arg(14)),
            mode: to_string(arg(15)),
            override_redirect: to_string(arg(16)),
            place: to_string(arg(17)),
            state: to_string(arg(18)),
            global_x: to_int(arg(19)),
            global_y: to_int(arg(20)),
        }
    }

    /// The event kind decoded from [`event_type`](Self::event_type).
    pub fn kind(&self) -> EventKind {
        EventKind::from_code(self.event_type)
    }

    /// Path of the target widget, or `""` if it could not be resolved.
    pub fn widget_path(&self) -> &str {
        self.widget.as_ref().map(|w| w.path()).unwrap_or("")
    }
}

fn to_int(s: &str) -> i32 {
    s.parse().unwrap_or(0)
}

fn to_int64(s: &str) -> i64 {
    s.parse().unwrap_or(0)
}

fn to_bool(s: &str) -> bool {
    s == "1"
}

fn to_string(s: &str) -> String {
    if s == NOT_APPLICABLE {
        String::new()
    } else {
        s.to_string()
    }
}
