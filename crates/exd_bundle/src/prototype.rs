//! Editable entries reconciled into a dictionary.
//!
//! A [`DictionaryPrototype`] is a plain list of key/value entries that an
//! editor can change freely, including states a map cannot hold: null keys
//! and duplicated keys. [`DictionaryPrototype::update_target`] writes the
//! valid entries into the target map and annotates every entry:
//!
//! | condition                    | level   | entry saved |
//! |------------------------------|---------|-------------|
//! | key object destroyed         | warning | yes         |
//! | value object destroyed       | warning | yes         |
//! | null key                     | error   | no          |
//! | first of duplicated keys     | warning | yes         |
//! | later duplicated keys        | error   | no          |

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::ops::Index;

use exd_reflect::external::ExternalRef;
use exd_reflect::slot::{DynSlot, Slot};
use exd_utils::hash::{HashMap, HashSet};

// -----------------------------------------------------------------------------
// Issue

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLevel {
    Warning,
    Error,
}

/// A warning or error attached to one side of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Issue {
    level: IssueLevel,
    message: &'static str,
}

impl Issue {
    pub const MISSING_KEY_OBJECT: Self = Self::warning("Missing Key Object!");
    pub const MISSING_VALUE_OBJECT: Self = Self::warning("Missing Value Object!");
    pub const NULL_KEY: Self = Self::error("Key can not be null! Entry will NOT be saved!");
    pub const DUPLICATED_KEY_ORIGINAL: Self = Self::warning("Key is duplicated! Entry will be saved!");
    pub const DUPLICATED_KEY: Self = Self::error("Key is duplicated! Entry will NOT be saved!");

    const fn warning(message: &'static str) -> Self {
        Self {
            level: IssueLevel::Warning,
            message,
        }
    }

    const fn error(message: &'static str) -> Self {
        Self {
            level: IssueLevel::Error,
            message,
        }
    }

    #[inline]
    pub const fn level(&self) -> IssueLevel {
        self.level
    }

    #[inline]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

// -----------------------------------------------------------------------------
// KeyValueEntry

/// One row of a [`DictionaryPrototype`].
#[derive(Debug, Clone)]
pub struct KeyValueEntry<K, V> {
    pub key: Option<K>,
    pub value: V,
    key_issue: Option<Issue>,
    value_issue: Option<Issue>,
}

impl<K, V> KeyValueEntry<K, V> {
    #[inline]
    pub fn new(key: Option<K>, value: V) -> Self {
        Self {
            key,
            value,
            key_issue: None,
            value_issue: None,
        }
    }

    /// The issue found on the key by the last reconciliation.
    #[inline]
    pub fn key_issue(&self) -> Option<Issue> {
        self.key_issue
    }

    /// The issue found on the value by the last reconciliation.
    #[inline]
    pub fn value_issue(&self) -> Option<Issue> {
        self.value_issue
    }

    #[inline]
    pub fn has_error(&self) -> bool {
        [self.key_issue, self.value_issue]
            .iter()
            .flatten()
            .any(Issue::is_error)
    }
}

fn is_missing(slot: &dyn DynSlot) -> bool {
    slot.node()
        .and_then(|node| node.downcast_ref::<ExternalRef>())
        .is_some_and(ExternalRef::is_missing)
}

// -----------------------------------------------------------------------------
// DictionaryPrototype

/// An ordered, editable view of a dictionary.
///
/// Entries own copies of the keys and values, so both must be `Clone`.
///
/// # Examples
///
/// ```
/// use exd_bundle::prototype::{DictionaryPrototype, Issue};
/// use exd_utils::hash::HashMap;
///
/// let mut target: HashMap<u8, String> = HashMap::default();
/// let mut prototype = DictionaryPrototype::new();
/// prototype.push(Some(1), "A".to_owned());
/// prototype.push(Some(1), "B".to_owned());
/// prototype.push(Some(2), "C".to_owned());
///
/// prototype.update_target(&mut target);
///
/// assert_eq!(target[&1], "A");
/// assert_eq!(target[&2], "C");
/// assert_eq!(prototype[1].key_issue(), Some(Issue::DUPLICATED_KEY));
/// ```
#[derive(Debug, Clone)]
pub struct DictionaryPrototype<K, V> {
    entries: Vec<KeyValueEntry<K, V>>,
}

impl<K, V> Default for DictionaryPrototype<K, V> {
    #[inline]
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, V> DictionaryPrototype<K, V> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn entries(&self) -> &[KeyValueEntry<K, V>] {
        &self.entries
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&KeyValueEntry<K, V>> {
        self.entries.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut KeyValueEntry<K, V>> {
        self.entries.get_mut(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn push(&mut self, key: Option<K>, value: V) {
        self.entries.push(KeyValueEntry::new(key, value));
    }

    /// Removes and returns the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn remove_entry(&mut self, index: usize) -> KeyValueEntry<K, V> {
        self.entries.remove(index)
    }

    /// Returns `true` if the last reconciliation rejected an entry.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(KeyValueEntry::has_error)
    }
}

impl<K, V: Default> DictionaryPrototype<K, V> {
    /// Adds an entry with a null key and a default value.
    ///
    /// With `Some(index)` the entry at `index` is replaced instead.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn create_entry(&mut self, index: Option<usize>) {
        let entry = KeyValueEntry::new(None, V::default());
        match index {
            Some(index) => self.entries[index] = entry,
            None => self.entries.push(entry),
        }
    }
}

impl<K, V> DictionaryPrototype<K, V>
where
    K: Slot + Eq + Hash + Clone,
    V: Slot + Clone,
{
    /// Builds the prototype of `target`, then writes it back so that every
    /// entry carries its current issues.
    pub fn from_target(target: &mut HashMap<K, V>) -> Self {
        let mut prototype = Self::new();
        prototype.update_from_target(target);
        prototype.update_target(target);
        prototype
    }

    /// Replaces the contents of `target` with the valid entries.
    ///
    /// Entries are applied in order and the first of several equal keys
    /// wins.
    pub fn update_target(&mut self, target: &mut HashMap<K, V>) {
        target.clear();

        for index in 0..self.entries.len() {
            let entry = &mut self.entries[index];
            entry.key_issue = None;
            entry.value_issue = None;

            if is_missing(&entry.key) {
                entry.key_issue = Some(Issue::MISSING_KEY_OBJECT);
            }
            if is_missing(&entry.value) {
                entry.value_issue = Some(Issue::MISSING_VALUE_OBJECT);
            }

            let Some(key) = &entry.key else {
                entry.key_issue = Some(Issue::NULL_KEY);
                continue;
            };

            if target.contains_key(key) {
                let key = key.clone();
                entry.key_issue = Some(Issue::DUPLICATED_KEY);
                if let Some(first) = self.entries.iter_mut().find(|e| e.key.as_ref() == Some(&key)) {
                    first.key_issue = Some(Issue::DUPLICATED_KEY_ORIGINAL);
                }
                continue;
            }

            target.insert(key.clone(), entry.value.clone());
        }

        log::debug!(
            "applied {} of {} dictionary entries",
            target.len(),
            self.entries.len()
        );
    }

    /// Pulls the current values of `target` into the entries.
    ///
    /// The first entry holding a key still in `target` takes its value.
    /// Keys of `target` no entry holds are appended as new entries.
    pub fn update_from_target(&mut self, target: &HashMap<K, V>) {
        let mut remaining: HashSet<&K> = target.keys().collect();

        for entry in &mut self.entries {
            let Some(key) = &entry.key else {
                continue;
            };
            if remaining.remove(key)
                && let Some(value) = target.get(key)
            {
                entry.value = value.clone();
            }
        }

        for (key, value) in target {
            if remaining.contains(key) {
                self.entries
                    .push(KeyValueEntry::new(Some(key.clone()), value.clone()));
            }
        }
    }
}

impl<K, V> Index<usize> for DictionaryPrototype<K, V> {
    type Output = KeyValueEntry<K, V>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}
