use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A complete, flat listing description: one value per feature key.
///
/// Records are values. Once built they are only read, never updated in place.
#[derive(Clone, PartialEq)]
pub struct FeatureRecord {
    keys: Arc<[String]>,
    values: Vec<f64>,
}

impl FeatureRecord {
    pub(crate) fn new(keys: Arc<[String]>, values: Vec<f64>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        FeatureRecord { keys, values }
    }

    /// Builds a record from arbitrary key/value pairs, e.g. one received from
    /// a programmatic caller. Nothing is validated here; a record that does not
    /// fit a pipeline is rejected when it is transformed.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let (keys, values): (Vec<String>, Vec<f64>) = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .unzip();
        FeatureRecord {
            keys: keys.into(),
            values,
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.keys
            .iter()
            .position(|candidate| candidate == key)
            .map(|position| self.values[position])
    }

    pub fn keys(&self) -> &Arc<[String]> {
        &self.keys
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

impl fmt::Debug for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FeatureRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<String, f64>::deserialize(deserializer).map(FeatureRecord::from_pairs)
    }
}
