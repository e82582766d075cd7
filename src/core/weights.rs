//! Sparse string-keyed weight maps.
//!
//! Object metadata, weather and atmosphere all use open, namespaced keys
//! (`atmosphere.fear`, `audio.creak`, ...) that can be added at runtime.
//! Keys are kept ordered so that iteration, and therefore any RNG draws made
//! while iterating, is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightMap(BTreeMap<String, f32>);

impl WeightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for `key`, or `default` when absent.
    #[inline]
    pub fn get(&self, key: &str, default: f32) -> f32 {
        self.0.get(key).copied().unwrap_or(default)
    }

    pub fn set(&mut self, key: impl Into<String>, weight: f32) {
        self.0.insert(key.into(), weight);
    }

    /// Add `delta` to an existing weight, clamped to `[0, 1]`. Missing keys
    /// are left alone.
    pub fn nudge(&mut self, key: &str, delta: f32) {
        if let Some(w) = self.0.get_mut(key) {
            *w = (*w + delta).clamp(0.0, 1.0);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<f32> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f32)> for WeightMap {
    fn from_iter<I: IntoIterator<Item = (K, f32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_with_default() {
        let mut w = WeightMap::new();
        assert_eq!(w.get("atmosphere.fear", 0.25), 0.25);
        w.set("atmosphere.fear", 0.8);
        assert_eq!(w.get("atmosphere.fear", 0.25), 0.8);
    }

    #[test]
    fn test_nudge_clamps_and_skips_missing() {
        let mut w: WeightMap = [("a", 0.95), ("b", 0.02)].into_iter().collect();
        w.nudge("a", 0.2);
        w.nudge("b", -0.5);
        w.nudge("missing", 0.5);
        assert_eq!(w.get("a", 0.0), 1.0);
        assert_eq!(w.get("b", 1.0), 0.0);
        assert!(!w.contains("missing"));
    }

    #[test]
    fn test_keys_are_ordered() {
        let w: WeightMap = [("zeta", 0.1), ("alpha", 0.2), ("mid", 0.3)].into_iter().collect();
        let keys: Vec<&str> = w.keys().collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }
}
