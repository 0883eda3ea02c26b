use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// One card's content, as supplied by the host page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItem {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "imageSrc")]
    pub image_ref: String,
}

/// The source items repeated `duplication_count` times. Nothing is copied;
/// slot `i` maps back to source item `i % len`.
#[derive(Clone, Debug)]
pub struct ExtendedSequence {
    items: Rc<[DisplayItem]>,
    duplication_count: usize,
}

impl ExtendedSequence {
    pub fn new(items: Rc<[DisplayItem]>, duplication_count: usize) -> Self {
        Self {
            items,
            duplication_count: duplication_count.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len().saturating_mul(self.duplication_count)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn duplication_count(&self) -> usize {
        self.duplication_count
    }

    pub fn source_items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn source_index(&self, index: usize) -> Option<usize> {
        if index < self.len() {
            Some(index % self.items.len())
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&DisplayItem> {
        self.source_index(index).map(|source| &self.items[source])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisplayItem> + '_ {
        (0..self.len()).map(move |index| &self.items[index % self.items.len()])
    }
}
