//! Alias assignment and the alias ↔ original relation

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::classify::{Classification, Role};
use crate::error::{MaskError, Result};

/// One-to-one relation between aliases and original spellings.
///
/// Iteration follows insertion order. Serializes as a flat JSON object
/// `{ "TBL_001": "TB_USER", ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMapping {
    entries: Vec<(String, String)>,
    by_alias: HashMap<String, usize>,
    by_original: HashMap<String, usize>,
}

impl AliasMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from external `(alias, original)` pairs, rejecting
    /// anything that would break invertibility.
    pub fn from_pairs<I, A, O>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, O)>,
        A: Into<String>,
        O: Into<String>,
    {
        let mut mapping = Self::new();
        for (alias, original) in pairs {
            mapping.insert(alias.into(), original.into())?;
        }
        Ok(mapping)
    }

    pub fn insert(&mut self, alias: String, original: String) -> Result<()> {
        if self.by_alias.contains_key(&alias) {
            return Err(MaskError::DuplicateAlias(alias));
        }
        if self.by_original.contains_key(&original) {
            return Err(MaskError::DuplicateOriginal(original));
        }

        let index = self.entries.len();
        self.by_alias.insert(alias.clone(), index);
        self.by_original.insert(original.clone(), index);
        self.entries.push((alias, original));
        Ok(())
    }

    pub fn original_for(&self, alias: &str) -> Option<&str> {
        self.by_alias
            .get(alias)
            .map(|&index| self.entries[index].1.as_str())
    }

    pub fn alias_for(&self, original: &str) -> Option<&str> {
        self.by_original
            .get(original)
            .map(|&index| self.entries[index].0.as_str())
    }

    /// `(alias, original)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, original)| (alias.as_str(), original.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of aliases per role, in `Role::ALL` order.
    pub fn role_counts(&self) -> Vec<(Role, usize)> {
        Role::ALL
            .into_iter()
            .map(|role| {
                let count = self
                    .entries
                    .iter()
                    .filter(|(alias, _)| Role::from_alias(alias) == Some(role))
                    .count();
                (role, count)
            })
            .collect()
    }
}

/// Hands out `<PREFIX>_<NNN>` aliases from one counter per role.
#[derive(Debug, Default)]
pub struct AliasMapper {
    counters: [usize; 4],
}

impl AliasMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next alias for `role`; counters start at 1.
    pub fn next_alias(&mut self, role: Role) -> String {
        let slot = &mut self.counters[role as usize];
        *slot += 1;
        format!("{}_{:03}", role.prefix(), *slot)
    }

    /// Assign an alias to every classified spelling, in classification order.
    pub fn assign(mut self, classification: &Classification) -> AliasMapping {
        let mut mapping = AliasMapping::new();

        for spelling in &classification.spellings {
            if mapping.alias_for(spelling).is_some() {
                continue;
            }
            let alias = self.next_alias(classification.role_of(spelling));
            // Counters only grow and spellings are unique, so this cannot clash.
            if let Err(e) = mapping.insert(alias, spelling.clone()) {
                tracing::warn!("skipping alias assignment: {}", e);
            }
        }

        mapping
    }
}

impl Serialize for AliasMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (alias, original) in &self.entries {
            map.serialize_entry(alias, original)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AliasMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = AliasMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a flat object of alias to original name")
            }

            fn visit_map<M: MapAccess<'de>>(
                self,
                mut access: M,
            ) -> std::result::Result<Self::Value, M::Error> {
                let mut mapping = AliasMapping::new();
                while let Some((alias, original)) = access.next_entry::<String, String>()? {
                    mapping
                        .insert(alias, original)
                        .map_err(serde::de::Error::custom)?;
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}
