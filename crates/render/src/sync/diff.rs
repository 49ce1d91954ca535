//! Keyed diffs between the engine's dataset and a new frame.

use dexscan_graph::model::{EnrichedEdge, EnrichedNode};
use std::collections::{HashMap, HashSet};

/// Items keyed by a string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for EnrichedNode {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for EnrichedEdge {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Changes that turn an old dataset into a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetDiff<T> {
    /// Present only in the new dataset.
    pub to_add: Vec<T>,
    /// Present in both, taken from the new dataset, and different.
    pub to_update: Vec<T>,
    /// Ids present only in the old dataset.
    pub to_remove: Vec<String>,
}

impl<T> Default for DatasetDiff<T> {
    fn default() -> Self {
        Self {
            to_add: Vec::new(),
            to_update: Vec::new(),
            to_remove: Vec::new(),
        }
    }
}

impl<T> DatasetDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_update.is_empty() && self.to_remove.is_empty()
    }
}

/// Diffs two datasets by id. `to_update` holds every item present in both,
/// taken from `new`. Output follows the order of the input slices.
pub fn diff_keyed<T>(old: &[T], new: &[T]) -> DatasetDiff<T>
where
    T: Keyed + Clone,
{
    let old_ids: HashSet<&str> = old.iter().map(Keyed::key).collect();
    let new_ids: HashSet<&str> = new.iter().map(Keyed::key).collect();

    let mut diff = DatasetDiff::default();
    for item in new {
        if old_ids.contains(item.key()) {
            diff.to_update.push(item.clone());
        } else {
            diff.to_add.push(item.clone());
        }
    }
    diff.to_remove = old
        .iter()
        .filter(|item| !new_ids.contains(item.key()))
        .map(|item| item.key().to_string())
        .collect();
    diff
}

/// Drops updates equal to the item they would replace.
pub fn retain_changed<T>(old: &[T], updates: Vec<T>) -> Vec<T>
where
    T: Keyed + PartialEq,
{
    let old_by_id: HashMap<&str, &T> = old.iter().map(|item| (item.key(), item)).collect();
    updates
        .into_iter()
        .filter(|item| old_by_id.get(item.key()).is_none_or(|previous| *previous != item))
        .collect()
}

/// Node diff. Updates are converted to position-free payloads by the
/// synchronizer.
pub fn diff_nodes(old: &[EnrichedNode], new: &[EnrichedNode]) -> DatasetDiff<EnrichedNode> {
    diff_keyed(old, new)
}

pub fn diff_edges(old: &[EnrichedEdge], new: &[EnrichedEdge]) -> DatasetDiff<EnrichedEdge> {
    diff_keyed(old, new)
}
