use indexmap::IndexMap;
use serde::Serialize;

/// Key du uses for the aggregate row when run with `-c`.
pub const TOTAL_KEY: &str = "total";

/// Output of one du query: path → size as printed, in du's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirSizeTable {
    sizes: IndexMap<String, String>,
}

impl DirSizeTable {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.sizes.get(path).map(String::as_str)
    }

    /// The aggregate row, if du printed one.
    pub fn total(&self) -> Option<&str> {
        self.get(TOTAL_KEY)
    }

    /// Numeric size for `path`; `None` for missing rows or human-readable sizes.
    pub fn size_of(&self, path: &str) -> Option<u64> {
        self.get(path)?.parse().ok()
    }

    pub fn len(&self) -> usize { self.sizes.len() }
    pub fn is_empty(&self) -> bool { self.sizes.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sizes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, path: String, size: String) {
        self.sizes.insert(path, size);
    }
}
