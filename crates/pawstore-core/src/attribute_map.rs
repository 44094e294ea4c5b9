//! Insertion-ordered attribute selections for a single variant row.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Attribute name → selected value, iterated in insertion order.
///
/// Generated rows insert attributes in definition order, so iteration order
/// is the order the attributes were added to the product. SKU derivation and
/// the backend payload both read values in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, String)>,
}

impl AttributeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Sets `name` to `value`. An existing entry is overwritten in place and
    /// its previous value returned; a new entry is appended.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Renames the key `from` to `to`, keeping its position.
    ///
    /// If `to` is already present it is replaced by the renamed entry.
    /// Returns `false` when `from` is absent.
    pub fn rename_key(&mut self, from: &str, to: &str) -> bool {
        let Some(mut idx) = self.entries.iter().position(|(n, _)| n == from) else {
            return false;
        };
        if from == to {
            return true;
        }
        if let Some(existing) = self.entries.iter().position(|(n, _)| n == to) {
            self.entries.remove(existing);
            if existing < idx {
                idx -= 1;
            }
        }
        if let Some(entry) = self.entries.get_mut(idx) {
            entry.0 = to.to_string();
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    /// Canonical, order-independent encoding of this combination:
    /// `name=value` pairs sorted by name and joined with `|`.
    ///
    /// `\`, `=` and `|` inside names and values are backslash-escaped, so
    /// distinct maps never share a key.
    #[must_use]
    pub fn combination_key(&self) -> String {
        let mut pairs: Vec<&(String, String)> = self.entries.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
            .iter()
            .map(|(n, v)| format!("{}={}", escape_key_part(n), escape_key_part(v)))
            .collect::<Vec<_>>()
            .join("|")
    }
}

fn escape_key_part(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    for c in part.chars() {
        if matches!(c, '\\' | '=' | '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributeMapVisitor;

        impl<'de> Visitor<'de> for AttributeMapVisitor {
            type Value = AttributeMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = AttributeMap::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    map.insert(name, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(AttributeMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size_color(size: &str, color: &str) -> AttributeMap {
        [("Size", size), ("Màu", color)].into_iter().collect()
    }

    #[test]
    fn insert_appends_and_overwrites_in_place() {
        let mut map = size_color("M", "Đỏ");
        assert_eq!(map.insert("Size", "L"), Some("M".to_string()));
        assert_eq!(map.insert("Material", "Cotton"), None);
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["Size", "Màu", "Material"]);
        assert_eq!(map.get("Size"), Some("L"));
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut map = size_color("M", "Đỏ");
        assert_eq!(map.remove("Size"), Some("M".to_string()));
        assert_eq!(map.remove("Size"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn rename_key_keeps_position() {
        let mut map = size_color("M", "Đỏ");
        assert!(map.rename_key("Size", "Kích thước"));
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["Kích thước", "Màu"]);
        assert_eq!(map.get("Kích thước"), Some("M"));
        assert!(!map.contains_key("Size"));
    }

    #[test]
    fn rename_key_onto_existing_name_replaces_it() {
        let mut map: AttributeMap = [("A", "1"), ("B", "2"), ("C", "3")].into_iter().collect();
        assert!(map.rename_key("C", "A"));
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("B", "2"), ("A", "3")]);
    }

    #[test]
    fn rename_key_missing_is_false() {
        let mut map = size_color("M", "Đỏ");
        assert!(!map.rename_key("Weight", "Mass"));
        assert_eq!(map, size_color("M", "Đỏ"));
    }

    #[test]
    fn combination_key_is_order_independent() {
        let a = size_color("M", "Đỏ");
        let b: AttributeMap = [("Màu", "Đỏ"), ("Size", "M")].into_iter().collect();
        assert_eq!(a.combination_key(), b.combination_key());
        assert_eq!(a.combination_key(), "Màu=Đỏ|Size=M");
    }

    #[test]
    fn combination_key_escapes_separators() {
        let packed: AttributeMap = [("A", "1|B=2")].into_iter().collect();
        let split: AttributeMap = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_ne!(packed.combination_key(), split.combination_key());
        assert_eq!(packed.combination_key(), r"A=1\|B\=2");
        assert_eq!(split.combination_key(), "A=1|B=2");

        let slash: AttributeMap = [("A", r"1\")].into_iter().collect();
        assert_eq!(slash.combination_key(), r"A=1\\");
    }

    #[test]
    fn combination_key_empty_map() {
        assert_eq!(AttributeMap::new().combination_key(), "");
    }

    #[test]
    fn serde_preserves_document_order() {
        let json = r#"{"Màu":"Xanh","Size":"S","Material":"Len"}"#;
        let map: AttributeMap = serde_json::from_str(json).expect("valid attribute map");
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["Màu", "Size", "Material"]);
        assert_eq!(serde_json::to_string(&map).expect("serializable"), json);
    }
}
