//! Text filtering and category grouping shared by the inventory and
//! shopping list views.

use crate::types::InventoryItem;
use crate::types::ShoppingItem;

/// Category shown for records stored with an empty category.
pub const UNCATEGORIZED: &str = "Uncategorized";

pub trait Categorized {
    fn name(&self) -> &str;
    fn category(&self) -> &str;

    /// Category as displayed; the stored value is left untouched.
    fn display_category(&self) -> &str {
        let category = self.category();
        if category.is_empty() {
            UNCATEGORIZED
        } else {
            category
        }
    }
}

impl Categorized for InventoryItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }
}

impl Categorized for ShoppingItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// Records whose name or category contains `query`, ignoring case.
pub fn filter_by_text<'a, T: Categorized>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.name().to_lowercase().contains(&needle)
                || item.category().to_lowercase().contains(&needle)
        })
        .collect()
}

#[derive(Debug)]
pub struct CategoryGroup<'a, T> {
    pub category: &'a str,
    pub items: Vec<&'a T>,
}

/// Groups in first-seen category order; items keep their relative order.
pub fn group_by_category<'a, T, I>(items: I) -> Vec<CategoryGroup<'a, T>>
where
    T: Categorized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut groups: Vec<CategoryGroup<'a, T>> = Vec::new();
    for item in items {
        let category = item.display_category();
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.items.push(item),
            None => groups.push(CategoryGroup {
                category,
                items: vec![item],
            }),
        }
    }
    groups
}
