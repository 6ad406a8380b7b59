//! Indexed key/value sink consumed by documentation tooling.
//!
//! Lists are written as `prefix[0]`, `prefix[1]`, ... in list order.

/// Receives configuration keys from the pipeline.
pub trait ConfigSink {
    fn set(&mut self, key: String, value: String);
}

/// Write `values` under `prefix[i]` keys.
pub fn populate_indexed<K, S>(sink: &mut K, prefix: &str, values: &[S])
where
    K: ConfigSink + ?Sized,
    S: AsRef<str>,
{
    for (i, value) in values.iter().enumerate() {
        sink.set(format!("{}[{}]", prefix, i), value.as_ref().to_string());
    }
}

/// In-memory [`ConfigSink`] that keeps insertion order.
///
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedStash {
    entries: Vec<(String, String)>,
}

impl IndexedStash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Values stored under `prefix[0]`, `prefix[1]`, ... up to the first gap.
    pub fn values_for(&self, prefix: &str) -> Vec<&str> {
        (0..)
            .map(|i| self.get(&format!("{}[{}]", prefix, i)))
            .take_while(Option::is_some)
            .flatten()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigSink for IndexedStash {
    fn set(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}
