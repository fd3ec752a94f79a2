//! Modifier state and key chords
//!
//! A `Chord` is a letter key plus an exact modifier set. It describes both
//! the global hotkey the listener watches for and the copy/paste chords the
//! injector synthesizes. Key codes are macOS ANSI virtual key codes.

#[cfg(target_os = "macos")]
use core_graphics::event::CGEventFlags;

/// Modifier key flag masks from macOS CGEventFlags
#[cfg(target_os = "macos")]
pub mod flags {
    use core_graphics::event::CGEventFlags;

    /// Control key modifier flag
    pub const CONTROL: CGEventFlags = CGEventFlags::CGEventFlagControl;
    /// Option/Alt key modifier flag
    pub const OPTION: CGEventFlags = CGEventFlags::CGEventFlagAlternate;
    /// Command key modifier flag
    pub const COMMAND: CGEventFlags = CGEventFlags::CGEventFlagCommand;
    /// Shift key modifier flag
    pub const SHIFT: CGEventFlags = CGEventFlags::CGEventFlagShift;
}

/// Which modifier keys are held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub control: bool,
    pub option: bool,
    pub command: bool,
    pub shift: bool,
}

impl ModifierState {
    pub const NONE: Self = Self {
        control: false,
        option: false,
        command: false,
        shift: false,
    };

    pub const COMMAND: Self = Self {
        command: true,
        ..Self::NONE
    };

    /// Create a new ModifierState from CGEventFlags
    #[cfg(target_os = "macos")]
    pub fn from_flags(event_flags: CGEventFlags) -> Self {
        Self {
            control: event_flags.contains(flags::CONTROL),
            option: event_flags.contains(flags::OPTION),
            command: event_flags.contains(flags::COMMAND),
            shift: event_flags.contains(flags::SHIFT),
        }
    }

    /// Convert back to the flags carried by a synthetic event
    #[cfg(target_os = "macos")]
    pub fn to_flags(self) -> CGEventFlags {
        let mut out = CGEventFlags::empty();
        if self.control {
            out |= flags::CONTROL;
        }
        if self.option {
            out |= flags::OPTION;
        }
        if self.command {
            out |= flags::COMMAND;
        }
        if self.shift {
            out |= flags::SHIFT;
        }
        out
    }

    /// Check if all modifiers are released
    pub fn is_empty(&self) -> bool {
        !self.control && !self.option && !self.command && !self.shift
    }
}

impl std::fmt::Display for ModifierState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = [
            (self.control, "Control"),
            (self.option, "Option"),
            (self.command, "Command"),
            (self.shift, "Shift"),
        ];
        let mut first = true;
        for (_, name) in names.iter().filter(|(held, _)| *held) {
            if !first {
                write!(f, "+")?;
            }
            write!(f, "{name}")?;
            first = false;
        }
        Ok(())
    }
}

/// ANSI virtual key code for a lowercase ASCII letter
fn letter_key_code(letter: char) -> Option<u16> {
    let code = match letter {
        'a' => 0,
        's' => 1,
        'd' => 2,
        'f' => 3,
        'h' => 4,
        'g' => 5,
        'z' => 6,
        'x' => 7,
        'c' => 8,
        'v' => 9,
        'b' => 11,
        'q' => 12,
        'w' => 13,
        'e' => 14,
        'r' => 15,
        'y' => 16,
        't' => 17,
        'o' => 31,
        'u' => 32,
        'i' => 34,
        'p' => 35,
        'l' => 37,
        'j' => 38,
        'k' => 40,
        'n' => 45,
        'm' => 46,
        _ => return None,
    };
    Some(code)
}

/// Errors from parsing a chord such as `ctrl+shift+t`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChordParseError {
    #[error("chord is empty")]
    Empty,

    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),

    #[error("unsupported key {0:?}, expected a single letter")]
    UnknownKey(String),

    #[error("chord {0:?} has no key")]
    MissingKey(String),
}

/// A letter key pressed together with an exact set of modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord {
    key: char,
    code: u16,
    modifiers: ModifierState,
}

impl Chord {
    /// Command+C
    pub const COPY: Self = Self {
        key: 'c',
        code: 8,
        modifiers: ModifierState::COMMAND,
    };

    /// Command+V
    pub const PASTE: Self = Self {
        key: 'v',
        code: 9,
        modifiers: ModifierState::COMMAND,
    };

    /// Control+Shift+T, the default trigger
    pub const DEFAULT_HOTKEY: Self = Self {
        key: 't',
        code: 17,
        modifiers: ModifierState {
            control: true,
            shift: true,
            ..ModifierState::NONE
        },
    };

    pub fn new(key: char, modifiers: ModifierState) -> Result<Self, ChordParseError> {
        let key = key.to_ascii_lowercase();
        let code = letter_key_code(key).ok_or_else(|| ChordParseError::UnknownKey(key.into()))?;
        Ok(Self {
            key,
            code,
            modifiers,
        })
    }

    /// Parse a `+`-separated chord, modifiers first and the letter key last
    pub fn parse(text: &str) -> Result<Self, ChordParseError> {
        let parts: Vec<String> = text
            .split('+')
            .map(|p| p.trim().to_ascii_lowercase())
            .collect();

        let Some((key, modifier_names)) = parts.split_last() else {
            return Err(ChordParseError::Empty);
        };
        if key.is_empty() {
            return if modifier_names.is_empty() {
                Err(ChordParseError::Empty)
            } else {
                Err(ChordParseError::MissingKey(text.to_string()))
            };
        }

        let mut modifiers = ModifierState::NONE;
        for name in modifier_names {
            match name.as_str() {
                "ctrl" | "control" => modifiers.control = true,
                "alt" | "opt" | "option" => modifiers.option = true,
                "cmd" | "command" => modifiers.command = true,
                "shift" => modifiers.shift = true,
                other => return Err(ChordParseError::UnknownModifier(other.to_string())),
            }
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c, modifiers),
            _ => Err(ChordParseError::UnknownKey(key.clone())),
        }
    }

    pub fn key_code(&self) -> u16 {
        self.code
    }

    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    /// True when a key event with this code and modifier set is this chord
    pub fn matches(&self, code: u16, modifiers: ModifierState) -> bool {
        self.code == code && self.modifiers == modifiers
    }
}

impl std::fmt::Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key.to_ascii_uppercase())
        } else {
            write!(f, "{}+{}", self.modifiers, self.key.to_ascii_uppercase())
        }
    }
}
