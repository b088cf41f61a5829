use std::collections::BTreeMap;

use blake3::Hash;
use serde::Serialize;

use crate::geometry::Rect;

/// Mutable set of placed rooms keyed by room key.
///
/// Every mutation goes through an overlap check, so no two entries ever
/// overlap. Keys iterate in sorted order, which keeps serialized output and
/// the content digest independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlacementSet {
    entries: BTreeMap<String, Rect>,
}

impl PlacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<Rect> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rect)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), *r))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// First placed room (other than `ignore`) whose rectangle overlaps `rect`.
    pub fn first_collision(&self, rect: &Rect, ignore: Option<&str>) -> Option<&str> {
        self.entries
            .iter()
            .filter(|(key, _)| Some(key.as_str()) != ignore)
            .find(|(_, placed)| placed.overlaps(rect))
            .map(|(key, _)| key.as_str())
    }

    pub fn collides(&self, rect: &Rect, ignore: Option<&str>) -> bool {
        self.first_collision(rect, ignore).is_some()
    }

    /// Insert `rect` for `key` unless it overlaps another placement. An
    /// existing entry for the same key is replaced and excluded from the
    /// check. Returns whether the set changed.
    pub fn try_insert(&mut self, key: impl Into<String>, rect: Rect) -> bool {
        let key = key.into();
        if self.collides(&rect, Some(&key)) {
            return false;
        }
        self.entries.insert(key, rect);
        true
    }

    pub fn remove(&mut self, key: &str) -> Option<Rect> {
        self.entries.remove(key)
    }

    /// Sum of the areas of all placed rectangles.
    pub fn placed_area(&self) -> u64 {
        self.entries
            .values()
            .map(Rect::area)
            .fold(0u64, u64::saturating_add)
    }

    /// Pairs of keys whose rectangles overlap. Always empty for sets built
    /// through this API; exposed for callers that validate foreign data.
    pub fn overlapping_pairs(&self) -> Vec<(String, String)> {
        let items: Vec<_> = self.entries.iter().collect();
        let mut pairs = Vec::new();
        for (i, (ka, ra)) in items.iter().enumerate() {
            for (kb, rb) in &items[i + 1..] {
                if ra.overlaps(rb) {
                    pairs.push(((*ka).clone(), (*kb).clone()));
                }
            }
        }
        pairs
    }

    /// Content digest over keys and rectangles. Equal sets hash equally, so
    /// hosts can skip redraws when a move leaves the layout untouched.
    pub fn digest(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        for (key, rect) in &self.entries {
            hasher.update(&(key.len() as u64).to_le_bytes());
            hasher.update(key.as_bytes());
            for v in [rect.x, rect.y, rect.width, rect.height] {
                hasher.update(&v.to_le_bytes());
            }
        }
        hasher.finalize()
    }

    /// Build a set from foreign data, rejecting any overlapping pair.
    pub fn from_rects<I, K>(rects: I) -> Result<Self, (String, String)>
    where
        I: IntoIterator<Item = (K, Rect)>,
        K: Into<String>,
    {
        let mut set = Self::new();
        for (key, rect) in rects {
            let key = key.into();
            if let Some(other) = set.first_collision(&rect, Some(&key)) {
                return Err((other.to_string(), key));
            }
            set.entries.insert(key, rect);
        }
        Ok(set)
    }

    pub(crate) fn replace(&mut self, key: &str, rect: Rect) {
        if let Some(slot) = self.entries.get_mut(key) {
            *slot = rect;
        }
    }
}
