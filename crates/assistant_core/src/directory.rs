use std::cmp::Ordering;

/// In-memory list of known employee names, always sorted for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeDirectory {
    names: Vec<String>,
}

impl EmployeeDirectory {
    /// Replaces the whole collection. Blank names are dropped.
    pub fn replace(&mut self, names: Vec<String>) {
        let mut names: Vec<String> = names
            .into_iter()
            .filter(|name| !name.trim().is_empty())
            .collect();
        names.sort_by(|a, b| compare_names(a, b));
        self.names = names;
    }

    /// Failed refreshes never keep the previous list around.
    pub fn reset(&mut self) {
        self.names.clear();
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }

    /// Case-insensitive substring match, in directory order, capped at `limit`.
    pub fn matching(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = query.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
