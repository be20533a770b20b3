//! Hotkey combination value objects

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use crate::domain::error::InvalidHotkeyError;

/// Default recall hotkey
pub const DEFAULT_HOTKEY: &str = "cmd+ctrl+alt+v";

/// Set of held modifier keys.
///
/// `COMMAND` is the Command key on macOS and the Super/Windows key elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const COMMAND: Self = Self(1);
    pub const CONTROL: Self = Self(1 << 1);
    pub const OPTION: Self = Self(1 << 2);
    pub const SHIFT: Self = Self(1 << 3);

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Canonical names of the held modifiers, in display order
    pub fn names(&self) -> Vec<&'static str> {
        [
            (Self::COMMAND, "cmd"),
            (Self::CONTROL, "ctrl"),
            (Self::OPTION, "alt"),
            (Self::SHIFT, "shift"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "cmd" | "command" | "super" | "meta" | "win" => Some(Self::COMMAND),
            "ctrl" | "control" => Some(Self::CONTROL),
            "alt" | "option" | "opt" => Some(Self::OPTION),
            "shift" => Some(Self::SHIFT),
            _ => None,
        }
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Virtual key codes of the macOS ANSI layout for letters and digits
const MAC_KEY_CODES: &[(char, u16)] = &[
    ('A', 0), ('S', 1), ('D', 2), ('F', 3), ('H', 4), ('G', 5), ('Z', 6), ('X', 7),
    ('C', 8), ('V', 9), ('B', 11), ('Q', 12), ('W', 13), ('E', 14), ('R', 15),
    ('Y', 16), ('T', 17), ('1', 18), ('2', 19), ('3', 20), ('4', 21), ('6', 22),
    ('5', 23), ('9', 25), ('7', 26), ('8', 28), ('0', 29), ('O', 31), ('U', 32),
    ('I', 34), ('P', 35), ('L', 37), ('J', 38), ('K', 40), ('N', 45), ('M', 46),
];

/// Non-modifier key of a hotkey: an ASCII letter or digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyKey(char);

impl HotkeyKey {
    /// Create a key from a letter or digit (letters are upper-cased)
    pub fn new(c: char) -> Option<Self> {
        if c.is_ascii_alphanumeric() {
            Some(Self(c.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub const fn as_char(&self) -> char {
        self.0
    }

    /// Look up a key from a macOS virtual key code
    pub fn from_mac_keycode(code: u16) -> Option<Self> {
        MAC_KEY_CODES
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(ch, _)| Self(*ch))
    }
}

impl fmt::Display for HotkeyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_ascii_lowercase())
    }
}

/// Target hotkey: exact modifier set plus one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyCombo {
    modifiers: Modifiers,
    key: HotkeyKey,
}

impl HotkeyCombo {
    pub const fn new(modifiers: Modifiers, key: HotkeyKey) -> Self {
        Self { modifiers, key }
    }

    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub const fn key(&self) -> HotkeyKey {
        self.key
    }
}

impl Default for HotkeyCombo {
    fn default() -> Self {
        Self::new(
            Modifiers::COMMAND | Modifiers::CONTROL | Modifiers::OPTION,
            HotkeyKey('V'),
        )
    }
}

impl fmt::Display for HotkeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in self.modifiers.names() {
            write!(f, "{}+", name)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for HotkeyCombo {
    type Err = InvalidHotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(InvalidHotkeyError::new(s, "Empty hotkey"));
        }

        let mut modifiers = Modifiers::NONE;
        let mut key = None;

        for token in normalized.split('+').map(str::trim) {
            if token.is_empty() {
                return Err(InvalidHotkeyError::new(s, "Empty component"));
            }

            if let Some(m) = Modifiers::from_token(token) {
                if modifiers.contains(m) {
                    return Err(InvalidHotkeyError::new(
                        s,
                        format!("Duplicate modifier '{}'", token),
                    ));
                }
                modifiers = modifiers | m;
                continue;
            }

            let mut chars = token.chars();
            let parsed = match (chars.next(), chars.next()) {
                (Some(c), None) => HotkeyKey::new(c),
                _ => None,
            };
            let Some(parsed) = parsed else {
                return Err(InvalidHotkeyError::new(
                    s,
                    format!("Unknown key '{}'", token),
                ));
            };
            if key.replace(parsed).is_some() {
                return Err(InvalidHotkeyError::new(s, "More than one key"));
            }
        }

        let Some(key) = key else {
            return Err(InvalidHotkeyError::new(s, "Missing key"));
        };
        if modifiers.is_empty() {
            return Err(InvalidHotkeyError::new(s, "At least one modifier is required"));
        }

        Ok(Self::new(modifiers, key))
    }
}
