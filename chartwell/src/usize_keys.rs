//! Serde form for maps keyed by dataset or series index.
//!
//! JSON object keys are strings, and the tagged enums holding these maps
//! buffer their content before deserializing, so integer keys would come
//! back as strings. The maps are written as `[[index, value], ...]` instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<T, S>(map: &BTreeMap<usize, T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    serializer.collect_seq(map.iter())
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<BTreeMap<usize, T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    let entries = Vec::<(usize, T)>::deserialize(deserializer)?;
    Ok(entries.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type")]
    enum Holder {
        Styles {
            #[serde(with = "super")]
            values: BTreeMap<usize, String>,
        },
    }

    #[test]
    fn test_keys_survive_tagged_enum() {
        let holder = Holder::Styles {
            values: BTreeMap::from([(0, "a".to_string()), (3, "b".to_string())]),
        };
        let json = serde_json::to_string(&holder).unwrap();
        assert_eq!(json, r#"{"type":"Styles","values":[[0,"a"],[3,"b"]]}"#);
        let restored: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, holder);
    }
}
