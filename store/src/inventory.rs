//! Expiry classification for inventory items. Always derived, never stored.

use crate::types::InventoryItem;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

/// Default look-ahead for [`ExpiryStatus::ExpiringSoon`].
pub const EXPIRING_SOON_DAYS: i64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Fresh,
}

/// `None` for items without an expiry date; those never fall in any class.
///
/// A window reaching past the representable calendar is unbounded, so every
/// item not yet expired is `ExpiringSoon`.
pub fn expiry_status(
    expiry: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window_days: i64,
) -> Option<ExpiryStatus> {
    let expiry = expiry?;
    if expiry < now {
        return Some(ExpiryStatus::Expired);
    }
    let horizon = Duration::try_days(window_days).and_then(|w| now.checked_add_signed(w));
    let soon = match horizon {
        Some(horizon) => expiry < horizon,
        None => window_days > 0,
    };
    Some(if soon {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Fresh
    })
}

impl InventoryItem {
    pub fn expiry_status(&self, now: DateTime<Utc>, window_days: i64) -> Option<ExpiryStatus> {
        expiry_status(self.expiry_date, now, window_days)
    }
}

/// Items not yet expired whose expiry falls within `days` of `now`.
pub fn expiring_within(
    items: &[InventoryItem],
    now: DateTime<Utc>,
    days: i64,
) -> Vec<&InventoryItem> {
    items
        .iter()
        .filter(|i| i.expiry_status(now, days) == Some(ExpiryStatus::ExpiringSoon))
        .collect()
}

pub fn expired(items: &[InventoryItem], now: DateTime<Utc>) -> Vec<&InventoryItem> {
    items
        .iter()
        .filter(|i| i.expiry_status(now, EXPIRING_SOON_DAYS) == Some(ExpiryStatus::Expired))
        .collect()
}
