//! Order status axes.
//!
//! Payment and fulfillment are independent: a cancelled order can
//! still read as paid until a refund lands, and payment progress never
//! implies delivery progress.

use serde::{Deserialize, Serialize};

/// Payment lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical delivery lifecycle of an order.
///
/// Legal transitions:
/// ```text
/// New ──► Picking ──► Packed ──► InDelivery ──► Delivered ──► Returned
///  │         │           │           │
///  │         └───────────┴───────────┴──► Issues
///  ├──► Cancelled          InDelivery ──► FailedDelivery ──► Returned
///  └──► Expired
/// ```
/// Cancelled, Expired, and Returned are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    #[default]
    New,
    Picking,
    Packed,
    InDelivery,
    Delivered,
    Cancelled,
    Returned,
    FailedDelivery,
    Issues,
    Expired,
}

impl FulfillmentStatus {
    /// The single source of truth for legal fulfillment transitions.
    ///
    /// Both `Order::update_fulfillment_status` and the use-case guards
    /// consult this table; no caller re-encodes it.
    pub fn can_transition_to(&self, target: FulfillmentStatus) -> bool {
        use FulfillmentStatus::*;

        match self {
            New => matches!(target, Picking | Cancelled | Expired | Issues),
            Picking => matches!(target, Packed | Issues),
            Packed => matches!(target, InDelivery | Issues),
            InDelivery => matches!(target, Delivered | FailedDelivery | Issues),
            Delivered => matches!(target, Returned),
            FailedDelivery => matches!(target, InDelivery | Returned | Issues),
            Issues => matches!(target, Picking | Packed | InDelivery | Cancelled),
            Cancelled | Expired | Returned => false,
        }
    }

    /// Returns true if the order may still be cancelled from this
    /// state. Only freshly created, unfulfilled orders qualify.
    pub fn can_cancel(&self) -> bool {
        matches!(self, FulfillmentStatus::New)
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FulfillmentStatus::Cancelled | FulfillmentStatus::Expired | FulfillmentStatus::Returned
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentStatus::New => "new",
            FulfillmentStatus::Picking => "picking",
            FulfillmentStatus::Packed => "packed",
            FulfillmentStatus::InDelivery => "in_delivery",
            FulfillmentStatus::Delivered => "delivered",
            FulfillmentStatus::Cancelled => "cancelled",
            FulfillmentStatus::Returned => "returned",
            FulfillmentStatus::FailedDelivery => "failed_delivery",
            FulfillmentStatus::Issues => "issues",
            FulfillmentStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
