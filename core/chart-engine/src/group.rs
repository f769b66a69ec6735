//! FILENAME: core/chart-engine/src/group.rs
//! PURPOSE: Group-by that remembers first-appearance order.
//! CONTEXT: Category rows come out in the order their first record appears
//! in the input, so group order must not depend on hash order.

use records::Record;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Composite grouping key: one string per grouping field.
/// Most groupings use one or two fields (category, legend).
pub type GroupKey = SmallVec<[String; 2]>;

/// Records partitioned by key, in first-appearance order.
#[derive(Debug)]
pub struct Groups<'a, R> {
    index: FxHashMap<GroupKey, usize>,
    groups: Vec<(GroupKey, Vec<&'a R>)>,
}

impl<'a, R> Groups<'a, R> {
    fn new() -> Self {
        Groups {
            index: FxHashMap::default(),
            groups: Vec::new(),
        }
    }

    fn push(&mut self, key: GroupKey, record: &'a R) {
        match self.index.get(&key) {
            Some(&i) => self.groups[i].1.push(record),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![record]));
            }
        }
    }

    pub fn get(&self, key: &GroupKey) -> Option<&[&'a R]> {
        self.index.get(key).map(|&i| self.groups[i].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[&'a R])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Distinct values of one key position, in first-appearance order.
    pub fn distinct_at(&self, position: usize) -> Vec<String> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut out = Vec::new();
        for (key, _) in &self.groups {
            if let Some(part) = key.get(position) {
                if seen.insert(part.as_str()) {
                    out.push(part.clone());
                }
            }
        }
        out
    }
}

/// Groups records by the string form of the given fields.
pub fn group_by<'a, R: Record>(records: &'a [R], fields: &[&str]) -> Groups<'a, R> {
    let mut groups = Groups::new();
    for record in records {
        let key: GroupKey = fields
            .iter()
            .map(|f| record.field(f).display_value())
            .collect();
        groups.push(key, record);
    }
    groups
}
