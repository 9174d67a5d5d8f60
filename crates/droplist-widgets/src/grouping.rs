#![forbid(unsafe_code)]

//! Key normalization and grouping.
//!
//! Every render pass derives a fresh view of the caller's records:
//!
//! 1. **Normalize**: each record at position `i` gets the key
//!    `<base>-<i>`, where `base` is its explicit key, else its id, else
//!    `auto-key-<i>`. Appending the position keeps keys unique even when
//!    natural ids collide.
//! 2. **Group** (optional): records are partitioned by a group key in one
//!    pass. Groups appear in first-seen order and keep input order inside.
//!
//! # Invariants
//!
//! - Normalized keys are unique within one pass.
//! - Grouping is a total partition: every normalized record lands in exactly
//!   one group, and concatenating the groups' members in order yields the
//!   records of each group in input order.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use crate::item::ListRecord;

/// Group key used when a field selector finds nothing.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Prefix of synthesized base keys.
pub const AUTO_KEY_PREFIX: &str = "auto-key";

/// A record plus its derived key and input position.
#[derive(Debug)]
pub struct NormalizedItem<'a, T> {
    pub key: String,
    /// Position in the caller's collection.
    pub index: usize,
    pub item: &'a T,
}

impl<T> Clone for NormalizedItem<'_, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            index: self.index,
            item: self.item,
        }
    }
}

/// Derive the unique key for the record at `index`.
#[must_use]
pub fn normalized_key<T: ListRecord + ?Sized>(item: &T, index: usize) -> String {
    let base = item
        .key()
        .or_else(|| item.id())
        .unwrap_or_else(|| format!("{AUTO_KEY_PREFIX}-{index}"));
    format!("{base}-{index}")
}

/// Normalize a whole collection.
#[must_use]
pub fn normalize<T: ListRecord>(items: &[T]) -> Vec<NormalizedItem<'_, T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| NormalizedItem {
            key: normalized_key(item, index),
            index,
            item,
        })
        .collect()
}

type GroupFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// How to derive a record's group key.
pub enum GroupBy<T> {
    /// Read a named field; absent or empty values group under [`UNKNOWN_GROUP`].
    Field(String),
    /// Caller-supplied mapping. Its output is used verbatim.
    Func(GroupFn<T>),
}

impl<T> GroupBy<T> {
    /// Group by a named field.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Group by a function of the record.
    #[must_use]
    pub fn func(f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self::Func(Arc::new(f))
    }
}

impl<T: ListRecord> GroupBy<T> {
    /// The group key for one record.
    #[must_use]
    pub fn group_key(&self, item: &T) -> String {
        match self {
            Self::Field(name) => item
                .field(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| UNKNOWN_GROUP.to_string()),
            Self::Func(f) => f(item),
        }
    }
}

impl<T> Clone for GroupBy<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(name) => Self::Field(name.clone()),
            Self::Func(f) => Self::Func(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for GroupBy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Records sharing one group key, in input order.
#[derive(Debug)]
pub struct Group<'a, T> {
    pub key: String,
    pub items: Vec<NormalizedItem<'a, T>>,
}

impl<T> Clone for Group<'_, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            items: self.items.clone(),
        }
    }
}

/// Partition normalized records by `rule`, preserving first-seen group order.
#[must_use]
pub fn group<'a, T: ListRecord>(
    normalized: Vec<NormalizedItem<'a, T>>,
    rule: &GroupBy<T>,
) -> Vec<Group<'a, T>> {
    let mut groups: Vec<Group<'a, T>> = Vec::new();
    let mut slots: AHashMap<String, usize> = AHashMap::new();
    for entry in normalized {
        let slot = *slots
            .entry(rule.group_key(entry.item))
            .or_insert_with_key(|key| {
                groups.push(Group {
                    key: key.clone(),
                    items: Vec::new(),
                });
                groups.len() - 1
            });
        groups[slot].items.push(entry);
    }
    groups
}

/// The derived view a render pass draws.
#[derive(Debug)]
pub enum ListView<'a, T> {
    Flat(Vec<NormalizedItem<'a, T>>),
    Grouped(Vec<Group<'a, T>>),
}

impl<'a, T: ListRecord> ListView<'a, T> {
    /// Normalize `items` and group them if a rule is given.
    #[must_use]
    pub fn build(items: &'a [T], rule: Option<&GroupBy<T>>) -> Self {
        let normalized = normalize(items);
        match rule {
            Some(rule) => Self::Grouped(group(normalized, rule)),
            None => Self::Flat(normalized),
        }
    }
}

impl<T> ListView<'_, T> {
    /// Number of records in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(items) => items.len(),
            Self::Grouped(groups) => groups.iter().map(|g| g.items.len()).sum(),
        }
    }

    /// Whether the view holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the view is grouped.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped(_))
    }
}
