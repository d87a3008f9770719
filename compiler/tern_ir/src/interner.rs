//! String interner for identifier storage.
//!
//! Every module of one compilation shares a single interner: record field
//! names cross module boundaries through imports, and `Name` equality must
//! agree on both sides.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

struct InternerInner {
    /// Map from string content to its index.
    map: FxHashMap<&'static str, Name>,
    /// Storage for string contents, indexed by `Name::raw`.
    strings: Vec<&'static str>,
}

/// Interner mapping strings to compact [`Name`] handles.
///
/// Strings are leaked on first interning so lookups can hand out `&'static str`
/// without holding the lock.
pub struct StringInterner {
    inner: RwLock<InternerInner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, Name::EMPTY);
        StringInterner {
            inner: RwLock::new(InternerInner {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.inner.read().map.get(s) {
            return name;
        }

        let mut guard = self.inner.write();
        // Another writer may have won the race between the two locks.
        if let Some(&name) = guard.map.get(s) {
            return name;
        }
        let raw = u32::try_from(guard.strings.len()).unwrap_or(u32::MAX);
        let name = Name::from_raw(raw);
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, name);
        name
    }

    /// Look up the string for a `Name`.
    ///
    /// Names not produced by this interner resolve to `"<unknown>"`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.inner
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("<unknown>")
    }

    /// Number of interned strings (including the empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheaply clonable handle to a shared interner.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
