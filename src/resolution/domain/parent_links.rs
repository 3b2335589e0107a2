use indexmap::IndexSet;

/// Ordered, duplicate-free set of packages that declare a package as a direct dependency.
///
/// The owner's own name is never accepted; callers pass it so the check cannot be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentLinks {
    parents: IndexSet<String>,
}

impl ParentLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `parent` as a parent of `owner`.
    ///
    /// Returns `false` when nothing changed: the parent is already listed, is empty, or is the
    /// owner itself (compared case-insensitively).
    pub fn add(&mut self, owner: &str, parent: &str) -> bool {
        if parent.is_empty() || parent.eq_ignore_ascii_case(owner) {
            return false;
        }
        self.parents.insert(parent.to_string())
    }

    pub fn contains(&self, parent: &str) -> bool {
        self.parents.contains(parent)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.parents.iter().cloned().collect()
    }
}
