//! Wait-time indicator for a single order.

use crate::model::{KitchenStatus, Order};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Minutes shown for an in-progress order the kitchen has not estimated.
pub const DEFAULT_IN_PROGRESS_MINUTES: u32 = 15;
/// Minutes shown for a new order the kitchen has not estimated.
pub const DEFAULT_NEW_MINUTES: u32 = 20;

/// What the wait column shows. Localization turns this into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WaitEstimate {
    /// Nothing left to wait for.
    Ready,
    /// Whole minutes until the kitchen's estimate, rounded up; never 0.
    Minutes(u32),
    /// The kitchen's estimate has already passed.
    Soon,
    DefaultInProgress,
    DefaultNew,
    Unspecified,
}

impl WaitEstimate {
    /// Minute count to show next to the clock icon, if any.
    pub fn minutes(self) -> Option<u32> {
        match self {
            WaitEstimate::Minutes(n) => Some(n),
            WaitEstimate::DefaultInProgress => Some(DEFAULT_IN_PROGRESS_MINUTES),
            WaitEstimate::DefaultNew => Some(DEFAULT_NEW_MINUTES),
            WaitEstimate::Ready | WaitEstimate::Soon | WaitEstimate::Unspecified => None,
        }
    }
}

/// Estimate the remaining wait for `order` at `now`.
///
/// Rules apply in order:
/// 1. completed, ready or delivered: `Ready`
/// 2. estimate at or before `now`: `Soon`
/// 3. estimate after `now`: `Minutes(ceil(remaining / 60s))`
/// 4. in progress without estimate: `DefaultInProgress`
/// 5. new without estimate: `DefaultNew`
pub fn estimate_wait(order: &Order, now: DateTime<Utc>) -> WaitEstimate {
    if order.is_finalized() || order.kitchen_status == KitchenStatus::Ready {
        return WaitEstimate::Ready;
    }

    if let Some(eta) = order.estimated_completion_time {
        if eta <= now {
            return WaitEstimate::Soon;
        }
        return minutes_until(eta, now).map_or(WaitEstimate::Unspecified, WaitEstimate::Minutes);
    }

    match order.kitchen_status {
        KitchenStatus::InProgress => WaitEstimate::DefaultInProgress,
        KitchenStatus::New => WaitEstimate::DefaultNew,
        _ => WaitEstimate::Unspecified,
    }
}

// None when the gap does not fit the display type.
fn minutes_until(eta: DateTime<Utc>, now: DateTime<Utc>) -> Option<u32> {
    let remaining_ms = eta.signed_duration_since(now).num_milliseconds();
    if remaining_ms <= 0 {
        return None;
    }
    let minutes = remaining_ms.checked_add(59_999)? / 60_000;
    u32::try_from(minutes).ok()
}
