//! String interning for names and file paths.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;

/// An interned string handle.
///
/// `Name` is a lightweight handle (just a u32) into an [`Interner`].
/// Index 0 is reserved and means "no value"; interning the empty string
/// yields it as well.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub struct Name(u32);

impl Name {
    /// The reserved "no value" handle.
    pub const NONE: Name = Name(0);

    /// Create a Name from a raw index (used internally).
    #[inline]
    pub(crate) const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// String interner for deduplicating names and paths.
///
/// Interning takes `&self`, so resolution passes can create new strings
/// while holding shared borrows of the tree.
pub struct Interner {
    inner: RwLock<InternerInner>,
}

struct InternerInner {
    /// Map from string to index
    map: FxHashMap<SmolStr, u32>,
    /// Storage of all interned strings; slot 0 is the reserved empty value
    strings: Vec<SmolStr>,
}

impl Default for Interner {
    fn default() -> Self {
        Self {
            inner: RwLock::new(InternerInner {
                map: FxHashMap::default(),
                strings: vec![SmolStr::default()],
            }),
        }
    }
}

impl Interner {
    /// Create a new empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning a `Name` handle.
    ///
    /// If the string has been interned before, returns the existing `Name`.
    /// The empty string maps to [`Name::NONE`].
    pub fn intern(&self, s: &str) -> Name {
        if s.is_empty() {
            return Name::NONE;
        }

        // Fast path: check if already interned (read lock)
        {
            let inner = self.inner.read();
            if let Some(&index) = inner.map.get(s) {
                return Name::from_raw(index);
            }
        }

        // Slow path: need to insert (write lock)
        let mut inner = self.inner.write();

        // Double-check after acquiring write lock
        if let Some(&index) = inner.map.get(s) {
            return Name::from_raw(index);
        }

        let smol = SmolStr::new(s);
        let index = inner.strings.len() as u32;
        inner.strings.push(smol.clone());
        inner.map.insert(smol, index);

        Name::from_raw(index)
    }

    /// Look up the string for a `Name`.
    ///
    /// Returns `None` for [`Name::NONE`] and for handles created by a
    /// different interner.
    pub fn lookup(&self, name: Name) -> Option<SmolStr> {
        if name.is_none() {
            return None;
        }
        let inner = self.inner.read();
        inner.strings.get(name.0 as usize).cloned()
    }

    /// The string for a `Name`, or an empty string when it has none.
    pub fn value(&self, name: Name) -> SmolStr {
        self.lookup(name).unwrap_or_default()
    }

    /// Get the number of interned strings, not counting the reserved slot.
    pub fn len(&self) -> usize {
        self.inner.read().strings.len() - 1
    }

    /// Check if the interner is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("count", &self.len())
            .finish()
    }
}
