//! Generic key/value annotation store
//!
//! Nets and gates carry one of these by composition. Entries are keyed by
//! `(category, key)` and store a free-form type tag next to the value, so a
//! writer can record e.g. `("generic", "LOC") -> ("string", "X1Y3")`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored annotation value with its type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    pub data_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataContainer {
    #[serde(default, with = "entries")]
    entries: BTreeMap<(String, String), DataEntry>,
}

impl DataContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value. Returns true if an existing entry was replaced.
    pub fn set_data(
        &mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        data_type: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        let entry = DataEntry {
            data_type: data_type.into(),
            value: value.into(),
        };
        self.entries
            .insert((category.into(), key.into()), entry)
            .is_some()
    }

    pub fn data_by_key(&self, category: &str, key: &str) -> Option<&DataEntry> {
        self.entries.get(&(category.to_string(), key.to_string()))
    }

    /// Remove an entry. Returns false if nothing was stored under the key.
    pub fn delete_data(&mut self, category: &str, key: &str) -> bool {
        self.entries
            .remove(&(category.to_string(), key.to_string()))
            .is_some()
    }

    pub fn data_keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.keys().map(|(c, k)| (c.as_str(), k.as_str()))
    }

    pub fn data(&self) -> impl Iterator<Item = (&str, &str, &DataEntry)> {
        self.entries
            .iter()
            .map(|((c, k), e)| (c.as_str(), k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// JSON objects need string keys, so the map is stored as a list of records.
mod entries {
    use super::DataEntry;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize)]
    struct Record {
        category: String,
        key: String,
        data_type: String,
        value: String,
    }

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<(String, String), DataEntry>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let records: Vec<Record> = map
            .iter()
            .map(|((category, key), e)| Record {
                category: category.clone(),
                key: key.clone(),
                data_type: e.data_type.clone(),
                value: e.value.clone(),
            })
            .collect();
        records.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<(String, String), DataEntry>, D::Error> {
        let records = Vec::<Record>::deserialize(deserializer)?;
        Ok(records
            .into_iter()
            .map(|r| {
                (
                    (r.category, r.key),
                    DataEntry {
                        data_type: r.data_type,
                        value: r.value,
                    },
                )
            })
            .collect())
    }
}
