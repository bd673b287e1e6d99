use crate::model::SiteId;

pub const DEFAULT_RECENT_CAPACITY: usize = 5;

/// Most-recently-activated-first list of site ids, bounded and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentList {
    ids: Vec<SiteId>,
    capacity: usize,
}

impl RecentList {
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Builds a list from stored ids, dropping repeats and anything past capacity.
    pub fn from_ids(ids: impl IntoIterator<Item = SiteId>, capacity: usize) -> Self {
        let mut list = Self::new(capacity);
        for id in ids {
            if list.ids.len() >= list.capacity {
                break;
            }
            if !list.ids.contains(&id) {
                list.ids.push(id);
            }
        }
        list
    }

    pub fn promote(&mut self, id: SiteId) {
        self.ids.retain(|existing| *existing != id);
        self.ids.insert(0, id);
        self.ids.truncate(self.capacity);
    }

    pub fn ids(&self) -> &[SiteId] {
        &self.ids
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn into_ids(self) -> Vec<SiteId> {
        self.ids
    }
}
