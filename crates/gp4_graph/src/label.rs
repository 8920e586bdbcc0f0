//! Primitive-type labels and the bidirectional name registry.
//!
//! A [`Label`] is an opaque numeric identifier for one primitive type within
//! one compilation. The [`LabelRegistry`] owns the mapping in both
//! directions: label to canonical name (one-to-one) and name to label
//! (many-to-one once aliases such as `GP_DFFR` are added). The registry is
//! shared by the device and netlist graphs so both agree on the namespace.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An opaque numeric identifier for a primitive type.
///
/// Labels are allocated monotonically starting at 1; the value 0 is reserved
/// for [`Label::UNLABELLED`] and is never returned by allocation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Label(u32);

impl Label {
    /// The reserved "no label" value.
    pub const UNLABELLED: Label = Label(0);

    /// Returns the raw numeric value.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bidirectional mapping between primitive type names and [`Label`]s.
///
/// The forward map (label to canonical name) is a bijection over allocated
/// labels. The reverse map also carries aliases, so it may be many-to-one.
/// [`resolve`](Self::resolve) consults canonical names before aliases.
/// Labels are never freed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelRegistry {
    /// Canonical names, indexed by label value minus one.
    canonical: Vec<String>,
    /// Reverse bindings for canonical names only.
    by_canonical: BTreeMap<String, Label>,
    /// Reverse bindings added through [`alias`](Self::alias).
    by_alias: BTreeMap<String, Label>,
}

impl LabelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the label for `canonical_name`, allocating a fresh one if the
    /// name has not been seen before.
    pub fn allocate(&mut self, canonical_name: &str) -> Label {
        if let Some(&label) = self.by_canonical.get(canonical_name) {
            return label;
        }
        let label = Label(self.canonical.len() as u32 + 1);
        self.canonical.push(canonical_name.to_string());
        self.by_canonical.insert(canonical_name.to_string(), label);
        label
    }

    /// Adds an additional reverse binding `name -> label` without allocating.
    ///
    /// Used for primitive synonyms, e.g. `GP_DFFR` and `GP_DFFS` both resolve
    /// to the `GP_DFFSR` label.
    pub fn alias(&mut self, name: &str, label: Label) {
        self.by_alias.insert(name.to_string(), label);
    }

    /// Resolves a primitive type name to its label, consulting canonical
    /// names first and aliases second. Returns `None` for unknown names.
    pub fn resolve(&self, name: &str) -> Option<Label> {
        self.by_canonical
            .get(name)
            .or_else(|| self.by_alias.get(name))
            .copied()
    }

    /// Returns the canonical name of `label`, or `None` if the label was
    /// never allocated (including [`Label::UNLABELLED`]).
    pub fn name(&self, label: Label) -> Option<&str> {
        if label == Label::UNLABELLED {
            return None;
        }
        self.canonical
            .get(label.0 as usize - 1)
            .map(String::as_str)
    }

    /// Returns `true` if `label` was allocated by this registry.
    pub fn contains(&self, label: Label) -> bool {
        label != Label::UNLABELLED && (label.0 as usize) <= self.canonical.len()
    }

    /// Returns the number of allocated labels.
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    /// Returns `true` if no labels have been allocated.
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Iterates over `(label, canonical name)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, &str)> {
        self.canonical
            .iter()
            .enumerate()
            .map(|(i, name)| (Label(i as u32 + 1), name.as_str()))
    }
}
