//! Display text lookup.
//!
//! Queue types carry [`MessageKey`]s and numbers only; a [`Localizer`] turns
//! them into text at the edge.

use crate::display::StatusLabel;
use crate::estimator::WaitEstimate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    OrderQueueList,
    OrderNumber,
    Status,
    WaitingTimeMinutes,
    OrderTime,
    Ready,
    InProgress,
    New,
    Pending,
    Soon,
    NotSpecified,
    ReadyToPickup,
    NoCurrentOrders,
}

impl MessageKey {
    /// Stable catalog key, also the fallback text.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::OrderQueueList => "order_queue_list",
            MessageKey::OrderNumber => "order_number",
            MessageKey::Status => "status",
            MessageKey::WaitingTimeMinutes => "waiting_time_minutes",
            MessageKey::OrderTime => "order_time",
            MessageKey::Ready => "ready",
            MessageKey::InProgress => "in_progress",
            MessageKey::New => "new",
            MessageKey::Pending => "pending",
            MessageKey::Soon => "soon",
            MessageKey::NotSpecified => "not_specified",
            MessageKey::ReadyToPickup => "ready_to_pickup",
            MessageKey::NoCurrentOrders => "no_current_orders",
        }
    }
}

impl From<StatusLabel> for MessageKey {
    fn from(label: StatusLabel) -> Self {
        match label {
            StatusLabel::Ready => MessageKey::Ready,
            StatusLabel::InProgress => MessageKey::InProgress,
            StatusLabel::New => MessageKey::New,
            StatusLabel::Pending => MessageKey::Pending,
        }
    }
}

pub trait Localizer: Send + Sync {
    /// Text for `key`, if this catalog has one.
    fn lookup(&self, key: MessageKey) -> Option<&str>;

    /// Text for `key`, falling back to the key itself.
    fn text(&self, key: MessageKey) -> &str {
        self.lookup(key).unwrap_or(key.as_str())
    }

    /// Contents of the wait column.
    fn wait_text(&self, estimate: WaitEstimate) -> String {
        match estimate {
            WaitEstimate::Ready => self.text(MessageKey::ReadyToPickup).to_string(),
            WaitEstimate::Soon => self.text(MessageKey::Soon).to_string(),
            WaitEstimate::Unspecified => self.text(MessageKey::NotSpecified).to_string(),
            other => other
                .minutes()
                .map_or_else(|| self.text(MessageKey::NotSpecified).to_string(), |m| m.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl Localizer for EnglishCatalog {
    fn lookup(&self, key: MessageKey) -> Option<&str> {
        let text = match key {
            MessageKey::OrderQueueList => "Order Queue",
            MessageKey::OrderNumber => "Order #",
            MessageKey::Status => "Status",
            MessageKey::WaitingTimeMinutes => "Wait (min)",
            MessageKey::OrderTime => "Ordered at",
            MessageKey::Ready => "Ready",
            MessageKey::InProgress => "In progress",
            MessageKey::New => "New",
            MessageKey::Pending => "Pending",
            MessageKey::Soon => "Soon",
            MessageKey::NotSpecified => "Not specified",
            MessageKey::ReadyToPickup => "Ready for pickup",
            MessageKey::NoCurrentOrders => "No current orders",
        };
        Some(text)
    }
}
