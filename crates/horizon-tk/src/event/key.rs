//! Keyboard modifier tracking for key bindings.
//!
//! The interpreter reports modifier keys as ordinary key presses with
//! symbols like `Shift_L` or `Control_R`. [`ModifierTracker`] folds those
//! presses and releases into a [`KeyModifier`] mask that the handlers of a
//! [`bind_key_event_ex`](crate::Tk::bind_key_event_ex) pair share.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Deref};

use super::record::Event;

/// A set of keyboard modifiers.
///
/// ```
/// use horizon_tk::KeyModifier;
///
/// let mods = KeyModifier::CONTROL | KeyModifier::SHIFT;
/// assert_eq!(mods.to_string(), "Shift Control");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifier(u8);

impl KeyModifier {
    /// No modifiers.
    pub const NONE: KeyModifier = KeyModifier(0);
    /// Shift key.
    pub const SHIFT: KeyModifier = KeyModifier(1 << 0);
    /// Control key.
    pub const CONTROL: KeyModifier = KeyModifier(1 << 1);
    /// Alt key.
    pub const ALT: KeyModifier = KeyModifier(1 << 2);
    /// Meta key.
    pub const META: KeyModifier = KeyModifier(1 << 3);
    /// Super/Fn key.
    pub const FN: KeyModifier = KeyModifier(1 << 4);

    /// Check if every modifier in `other` is set.
    pub fn has(&self, other: KeyModifier) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether no modifiers are set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Raw bit representation.
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Set the modifiers in `other`.
    pub fn insert(&mut self, other: KeyModifier) {
        self.0 |= other.0;
    }

    /// Clear the modifiers in `other`. Clearing an unset modifier is a
    /// no-op.
    pub fn remove(&mut self, other: KeyModifier) {
        if self.has(other) {
            self.0 ^= other.0;
        }
    }

    /// The modifier a key symbol stands for, matched by prefix
    /// (`Shift_L` and `Shift_R` are both Shift).
    pub fn from_key_sym(sym: &str) -> KeyModifier {
        MODIFIER_PREFIXES
            .iter()
            .find(|(prefix, _)| sym.starts_with(*prefix))
            .map(|&(_, modifier)| modifier)
            .unwrap_or(Self::NONE)
    }
}

const MODIFIER_PREFIXES: [(&str, KeyModifier); 5] = [
    ("Shift_", KeyModifier::SHIFT),
    ("Control_", KeyModifier::CONTROL),
    ("Alt_", KeyModifier::ALT),
    ("Meta_", KeyModifier::META),
    ("Super_", KeyModifier::FN),
];

impl BitOr for KeyModifier {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        KeyModifier(self.0 | rhs.0)
    }
}

impl BitOrAssign for KeyModifier {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for KeyModifier {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        KeyModifier(self.0 & rhs.0)
    }
}

/// Names in display order. `FN` has no display name.
const DISPLAY_NAMES: [(KeyModifier, &str); 4] = [
    (KeyModifier::SHIFT, "Shift"),
    (KeyModifier::CONTROL, "Control"),
    (KeyModifier::ALT, "Alt"),
    (KeyModifier::META, "Meta"),
];

impl fmt::Display for KeyModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = DISPLAY_NAMES
            .iter()
            .filter(|(modifier, _)| self.has(*modifier))
            .map(|&(_, name)| name)
            .collect();
        f.write_str(&names.join(" "))
    }
}

/// A key event together with the modifiers held when it fired.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent<'a> {
    event: &'a Event,
    modifier: KeyModifier,
}

impl<'a> KeyEvent<'a> {
    /// Pair an event with a modifier mask.
    pub fn new(event: &'a Event, modifier: KeyModifier) -> Self {
        Self { event, modifier }
    }

    /// The underlying event.
    pub fn event(&self) -> &'a Event {
        self.event
    }

    /// Modifiers held when the event fired.
    pub fn modifier(&self) -> KeyModifier {
        self.modifier
    }
}

impl Deref for KeyEvent<'_> {
    type Target = Event;

    fn deref(&self) -> &Event {
        self.event
    }
}

/// Modifier state shared by the press and release handlers of one key
/// binding.
///
/// Presses of modifier keys set bits, releases clear them. There is no
/// press counting: if a release is never delivered (focus moved away while
/// the key was held) the bit stays set until the next release of that key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierTracker {
    session: String,
    modifier: KeyModifier,
}

impl ModifierTracker {
    /// Create a tracker for the binding identified by `session`.
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            modifier: KeyModifier::NONE,
        }
    }

    /// The binding this tracker belongs to.
    pub fn session(&self) -> &str {
        &self.session
    }

    /// Current modifier mask.
    pub fn modifier(&self) -> KeyModifier {
        self.modifier
    }

    /// Record a key press and return the updated mask.
    pub fn press(&mut self, key_sym: &str) -> KeyModifier {
        self.modifier.insert(KeyModifier::from_key_sym(key_sym));
        self.modifier
    }

    /// Record a key release and return the updated mask.
    pub fn release(&mut self, key_sym: &str) -> KeyModifier {
        let released = KeyModifier::from_key_sym(key_sym);
        if !released.is_empty() {
            self.modifier.remove(released);
        }
        self.modifier
    }

    /// Forget all held modifiers.
    pub fn reset(&mut self) {
        self.modifier = KeyModifier::NONE;
    }
}
