use super::{PackageRecord, ParentLinks, RepoMetadata};
use indexmap::IndexMap;

/// One package of the resolved set together with its resolution slots
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    record: PackageRecord,
    metadata: RepoMetadata,
    parents: ParentLinks,
}

impl ResolvedEntry {
    pub fn new(record: PackageRecord) -> Self {
        Self {
            record,
            metadata: RepoMetadata::default(),
            parents: ParentLinks::new(),
        }
    }

    pub fn record(&self) -> &PackageRecord {
        &self.record
    }

    pub fn metadata(&self) -> &RepoMetadata {
        &self.metadata
    }

    /// Replaces the whole metadata slot
    pub fn set_metadata(&mut self, metadata: RepoMetadata) {
        self.metadata = metadata;
    }

    pub fn parents(&self) -> &ParentLinks {
        &self.parents
    }

    /// Adds a parent; the entry's own full path is rejected
    pub fn add_parent(&mut self, parent: &str) -> bool {
        self.parents.add(&self.record.full_path(), parent)
    }
}

/// All packages of one run, keyed by identity, in SBOM order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSet {
    entries: IndexMap<String, ResolvedEntry>,
}

impl ResolvedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from SBOM records; later duplicates of an identity are dropped
    pub fn from_records(records: impl IntoIterator<Item = PackageRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            let key = record.identity_key();
            if !set.insert(record) {
                tracing::debug!(package = %key, "duplicate SBOM entry collapsed");
            }
        }
        set
    }

    /// Inserts a record; returns `false` if its identity is already present
    pub fn insert(&mut self, record: PackageRecord) -> bool {
        let key = record.identity_key();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, ResolvedEntry::new(record));
        true
    }

    pub fn get(&self, identity_key: &str) -> Option<&ResolvedEntry> {
        self.entries.get(identity_key)
    }

    pub fn get_index(&self, index: usize) -> Option<&ResolvedEntry> {
        self.entries.get_index(index).map(|(_, entry)| entry)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut ResolvedEntry> {
        self.entries.get_index_mut(index).map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedEntry> {
        self.entries.values()
    }

    /// Mutable access to every slot; each yielded entry is disjoint from the others
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ResolvedEntry> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
