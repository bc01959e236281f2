//! Grouping of parsed items for list views.

use crate::error::{RecitationError, Result};
use crate::types::{Category, ContentItem};

/// Items of one category, with their indices in the parsed sequence.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub items: Vec<(usize, &'a ContentItem)>,
}

/// Group items by category, in order of each category's first appearance.
pub fn group_by_category(items: &[ContentItem]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.items.push((index, item)),
            None => groups.push(CategoryGroup {
                category: item.category,
                items: vec![(index, item)],
            }),
        }
    }
    groups
}

/// Get an item by index.
pub fn item_at(items: &[ContentItem], index: usize) -> Result<&ContentItem> {
    items.get(index).ok_or(RecitationError::ItemOutOfRange {
        index,
        len: items.len(),
    })
}
