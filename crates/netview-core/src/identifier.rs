//! Identifier management using string interning
//!
//! Node ids, port names and net names are compared and hashed constantly while
//! a netlist is checked and resolved. [`Id`] interns them once and compares by
//! symbol afterwards.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`] in the process.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

const ANONYMOUS_PREFIX: char = '.';

/// Interned identifier for nodes, ports and nets.
///
/// # Examples
///
/// ```
/// use netview_core::identifier::Id;
///
/// let adder = Id::new("adder");
/// assert_eq!(adder, "adder");
/// assert_eq!(adder, Id::new("adder"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string slice, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates an identifier for an anonymous element, such as an unnamed net.
    ///
    /// Anonymous names start with `.`, which loaded identifiers may not
    /// contain, so they never clash with a declared name.
    ///
    /// # Examples
    ///
    /// ```
    /// use netview_core::identifier::Id;
    ///
    /// assert_eq!(Id::from_anonymous(3), ".3");
    /// assert!(!Id::new("__3").is_anonymous());
    /// ```
    pub fn from_anonymous(idx: usize) -> Self {
        Self::new(&format!("{ANONYMOUS_PREFIX}{idx}"))
    }

    /// Returns `true` if this identifier was created by [`Id::from_anonymous`].
    pub fn is_anonymous(&self) -> bool {
        self.with_str(|name| {
            name.strip_prefix(ANONYMOUS_PREFIX)
                .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
        })
    }

    /// Number of characters in the identifier text.
    pub fn char_count(&self) -> usize {
        self.with_str(|name| name.chars().count())
    }

    fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        f(interner.resolve(self.0).unwrap_or_default())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.with_str(str::to_owned);
        f.write_str(&name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|name| name == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(Id::new("reg"), Id::new("reg"));
        assert_ne!(Id::new("reg"), Id::new("mux"));
    }

    #[test]
    fn test_display_roundtrip() {
        let id = Id::new("fifo_0");
        assert_eq!(id.to_string(), "fifo_0");
    }

    #[test]
    fn test_anonymous() {
        let id = Id::from_anonymous(12);
        assert_eq!(id, ".12");
        assert!(id.is_anonymous());
        assert!(!Id::new("__12").is_anonymous());
        assert!(!Id::new(".x").is_anonymous());
        assert!(!Id::new("named").is_anonymous());
    }

    #[test]
    fn test_char_count_counts_chars_not_bytes() {
        assert_eq!(Id::new("Ω_out").char_count(), 5);
    }
}
