use crate::category::CategoryGroup;
use crate::types::ShoppingItem;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShoppingProgress {
    pub checked: usize,
    pub total: usize,
}

impl ShoppingProgress {
    pub fn of<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a ShoppingItem>,
    {
        items
            .into_iter()
            .fold(Self::default(), |mut acc, item| {
                acc.total += 1;
                if item.checked {
                    acc.checked += 1;
                }
                acc
            })
    }

    /// Share of checked items in `0.0..=100.0`; an empty list is 0.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.checked as f64 / self.total as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.checked == self.total
    }
}

pub fn group_progress(group: &CategoryGroup<'_, ShoppingItem>) -> ShoppingProgress {
    ShoppingProgress::of(group.items.iter().copied())
}
