//! Known webhook event kinds.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Event kinds the platform emits.
///
/// Parsing a payload never rejects an unknown kind; this set is only used
/// by advisory checks such as [`is_valid_event_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `payment.succeeded`
    PaymentSucceeded,
    /// `payment.failed`
    PaymentFailed,
    /// `payment.refunded`
    PaymentRefunded,
    /// `order.created`
    OrderCreated,
    /// `order.updated`
    OrderUpdated,
    /// `order.cancelled`
    OrderCancelled,
    /// `subscription.created`
    SubscriptionCreated,
    /// `subscription.updated`
    SubscriptionUpdated,
    /// `subscription.cancelled`
    SubscriptionCancelled,
    /// `customer.created`
    CustomerCreated,
    /// `customer.updated`
    CustomerUpdated,
    /// `merchant.updated`
    MerchantUpdated,
    /// `settlement.completed`
    SettlementCompleted,
}

impl EventKind {
    /// Every known kind.
    pub const ALL: [Self; 13] = [
        Self::PaymentSucceeded,
        Self::PaymentFailed,
        Self::PaymentRefunded,
        Self::OrderCreated,
        Self::OrderUpdated,
        Self::OrderCancelled,
        Self::SubscriptionCreated,
        Self::SubscriptionUpdated,
        Self::SubscriptionCancelled,
        Self::CustomerCreated,
        Self::CustomerUpdated,
        Self::MerchantUpdated,
        Self::SettlementCompleted,
    ];

    /// Wire name, e.g. `payment.succeeded`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaymentSucceeded => "payment.succeeded",
            Self::PaymentFailed => "payment.failed",
            Self::PaymentRefunded => "payment.refunded",
            Self::OrderCreated => "order.created",
            Self::OrderUpdated => "order.updated",
            Self::OrderCancelled => "order.cancelled",
            Self::SubscriptionCreated => "subscription.created",
            Self::SubscriptionUpdated => "subscription.updated",
            Self::SubscriptionCancelled => "subscription.cancelled",
            Self::CustomerCreated => "customer.created",
            Self::CustomerUpdated => "customer.updated",
            Self::MerchantUpdated => "merchant.updated",
            Self::SettlementCompleted => "settlement.completed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known event kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown event type '{0}'")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

/// Returns true if `event_type` is one of the known kinds.
///
/// Matching is exact and case-sensitive.
#[must_use]
pub fn is_valid_event_type(event_type: &str) -> bool {
    event_type.parse::<EventKind>().is_ok()
}
