//! Field/value accumulator shared by the reader cache and the writer

use std::collections::BTreeMap;
use std::fmt;

use crate::{Error, Result};

/// Prefix written in front of every header line.
pub const HEADER_TAG: &str = "# ";

/// A set of configuration fields and their values.
///
/// Each field maps to at most one value. Fields iterate and serialize in
/// lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigItem {
    items: BTreeMap<String, String>,
}

impl ConfigItem {
    /// Create an empty item set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct fields.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert `field`, replacing any previous value.
    pub fn add_one_item(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.items.insert(field.into(), value.into());
    }

    /// Insert `fields[i] = values[i]` for every index, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldCountMismatch`] and leaves the set untouched when
    /// the two slices differ in length.
    pub fn add_all_item<F, V>(&mut self, fields: &[F], values: &[V]) -> Result<()>
    where
        F: AsRef<str>,
        V: AsRef<str>,
    {
        if fields.len() != values.len() {
            tracing::error!(
                fields = fields.len(),
                values = values.len(),
                "fields and values are not paired"
            );
            return Err(Error::FieldCountMismatch {
                fields: fields.len(),
                values: values.len(),
            });
        }

        for (field, value) in fields.iter().zip(values) {
            self.add_one_item(field.as_ref(), value.as_ref());
        }
        Ok(())
    }

    /// Value stored for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.items.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.items.contains_key(field)
    }

    /// Field names in iteration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// `(field, value)` pairs in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One `field=value` line per field. Nothing is escaped, so values holding
/// a newline or `=` do not survive a parse of this output.
impl fmt::Display for ConfigItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, value) in &self.items {
            writeln!(f, "{field}={value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigItem {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut item = Self::new();
        for (field, value) in iter {
            item.add_one_item(field, value);
        }
        item
    }
}
