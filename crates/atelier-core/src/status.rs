//! # Status and Priority Vocabularies
//!
//! The three enumerations that drive the shop floor: the lifecycle status of
//! a production order, the status of an individual piece of tracked work
//! (production logs and operations), and the scheduling priority of an order.
//!
//! All three serialize to snake_case strings, which is also the form stored
//! in the database. Parsing is strict: a string outside the vocabulary is a
//! [`ValidationError`], never a silent default.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lifecycle status of a production order.
///
/// Orders are created `Planned`, move to `InProduction` either by direct
/// edit or by cascade when work starts against them, and end `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order is scheduled but no work has started.
    Planned,
    /// At least one operation is running, or the order was advanced manually.
    InProduction,
    /// All work is complete.
    Finished,
}

impl OrderStatus {
    /// The canonical string form (wire and database representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProduction => "in_production",
            Self::Finished => "finished",
        }
    }

    /// Parse the canonical string form.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "planned" => Ok(Self::Planned),
            "in_production" => Ok(Self::InProduction),
            "finished" => Ok(Self::Finished),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }

    /// Whether the order still counts toward the active workload.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Finished)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a tracked piece of work: a production log, or an operation on
/// the kanban board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    /// Queued, not yet started. Carries no timestamps.
    Waiting,
    /// Running. `start_time` is set; `end_time` is not.
    InProduction,
    /// Done. Both timestamps are set.
    Finished,
}

impl WorkStatus {
    /// The canonical string form (wire and database representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProduction => "in_production",
            Self::Finished => "finished",
        }
    }

    /// Parse the canonical string form.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "in_production" => Ok(Self::InProduction),
            "finished" => Ok(Self::Finished),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduling priority of a production order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can slip without consequence.
    Low,
    /// Default priority for new orders.
    Medium,
    /// Delivery date at risk.
    High,
}

impl Priority {
    /// The canonical string form (wire and database representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse the canonical string form.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ValidationError::InvalidPriority(other.to_string())),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips() {
        for status in [
            OrderStatus::Planned,
            OrderStatus::InProduction,
            OrderStatus::Finished,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn work_status_round_trips() {
        for status in [
            WorkStatus::Waiting,
            WorkStatus::InProduction,
            WorkStatus::Finished,
        ] {
            assert_eq!(WorkStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn priority_round_trips() {
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::parse(priority.as_str()).unwrap(), priority);
        }
    }

    #[test]
    fn unrecognized_status_is_rejected() {
        let err = WorkStatus::parse("paused").unwrap_err();
        assert_eq!(err, ValidationError::InvalidStatus("paused".to_string()));

        let err = OrderStatus::parse("Em Produção").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidStatus(_)));
    }

    #[test]
    fn unrecognized_priority_is_rejected() {
        assert!(matches!(
            Priority::parse("urgent"),
            Err(ValidationError::InvalidPriority(_))
        ));
    }

    #[test]
    fn serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&WorkStatus::InProduction).unwrap(),
            "\"in_production\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"planned\"").unwrap();
        assert_eq!(parsed, OrderStatus::Planned);
    }

    #[test]
    fn serde_rejects_unknown_variants() {
        assert!(serde_json::from_str::<WorkStatus>("\"cancelled\"").is_err());
        assert!(serde_json::from_str::<Priority>("\"critical\"").is_err());
    }

    #[test]
    fn finished_orders_are_not_active() {
        assert!(OrderStatus::Planned.is_active());
        assert!(OrderStatus::InProduction.is_active());
        assert!(!OrderStatus::Finished.is_active());
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
