use dns::ResourceRecord;
use domain_name_query_types::NameQuery;
use std::collections::{BTreeMap, BTreeSet};

/// Every record decoded so far, grouped by owner name and type.
///
/// Entries live as long as the cache; nothing is expired or evicted.
#[derive(Debug, Default)]
pub struct ResultCache {
    b_map: BTreeMap<NameQuery, BTreeSet<ResourceRecord>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self {
            b_map: BTreeMap::new(),
        }
    }

    /// Records known for `key`, empty when nothing has been cached.
    pub fn lookup(&self, key: &NameQuery) -> BTreeSet<ResourceRecord> {
        self.b_map.get(key).cloned().unwrap_or_default()
    }

    pub fn contains(&self, key: &NameQuery) -> bool {
        self.b_map.get(key).map_or(false, |records| !records.is_empty())
    }

    pub fn insert(&mut self, record: ResourceRecord) {
        self.b_map.entry(record.key()).or_default().insert(record);
    }

    pub fn insert_all<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a ResourceRecord>,
    {
        for record in records {
            self.insert(record.clone());
        }
    }

    /// Visits entries in key order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&NameQuery, &BTreeSet<ResourceRecord>),
    {
        for (key, records) in self.b_map.iter() {
            f(key, records);
        }
    }

    pub fn len(&self) -> usize {
        self.b_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b_map.is_empty()
    }
}
