#![deny(missing_docs)]

//! # atelier-state — Production Log Transition Engine
//!
//! The rules governing how a production log moves between `waiting`,
//! `in_production`, and `finished`, the timestamp side effects of each move,
//! and when a move cascades to the log's parent production order.
//!
//! ```text
//!                    ┌────────────────────────────┐
//!                    ▼                            │
//!  Waiting ──▶ InProduction ──▶ Finished ─────────┤
//!     ▲   start_time = now       end_time = now   │
//!     │   (kept if already set)                   │
//!     │   end_time cleared                        │
//!     └───────────────────────────────────────────┘
//!              both timestamps cleared
//! ```
//!
//! ## Design Decision
//!
//! Unlike a lifecycle machine that forbids transitions, every target status
//! is reachable from every current status — an operator can drag a card to
//! any column of the board. What the engine governs is the *side effects*:
//! which timestamps are set, kept, or cleared, and whether the parent order
//! is pulled from `planned` into `in_production`.
//!
//! Both functions are pure given `now`: they read a snapshot and return the
//! fields to write, so the transition rules are testable without a database.
//! The caller (the persistence layer) is responsible for applying the result
//! and the cascade inside one transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::{OrderStatus, WorkStatus};

/// The persisted fields of a production log that the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSnapshot {
    /// Current status.
    pub status: WorkStatus,
    /// When work started, if it has.
    pub start_time: Option<DateTime<Utc>>,
    /// When work ended, if it has.
    pub end_time: Option<DateTime<Utc>>,
}

impl LogSnapshot {
    /// Snapshot of a freshly queued log: waiting, no timestamps.
    pub fn queued() -> Self {
        Self {
            status: WorkStatus::Waiting,
            start_time: None,
            end_time: None,
        }
    }
}

/// The fields to write back after applying a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogUpdate {
    /// New status.
    pub status: WorkStatus,
    /// New start timestamp (None clears the column).
    pub start_time: Option<DateTime<Utc>>,
    /// New end timestamp (None clears the column).
    pub end_time: Option<DateTime<Utc>>,
}

/// Apply a requested status change to a log snapshot.
///
/// - `InProduction` keeps an existing `start_time` (a re-start never rewinds
///   the clock), stamps `now` when there is none, and clears `end_time`.
/// - `Finished` stamps `end_time` with `now` and leaves `start_time` alone.
/// - `Waiting` clears both timestamps.
pub fn apply_log_status(current: &LogSnapshot, target: WorkStatus, now: DateTime<Utc>) -> LogUpdate {
    match target {
        WorkStatus::InProduction => LogUpdate {
            status: target,
            start_time: current.start_time.or(Some(now)),
            end_time: None,
        },
        WorkStatus::Finished => LogUpdate {
            status: target,
            start_time: current.start_time,
            end_time: Some(now),
        },
        WorkStatus::Waiting => LogUpdate {
            status: target,
            start_time: None,
            end_time: None,
        },
    }
}

/// Decide whether a log transition cascades to the parent order.
///
/// Starting work on a log pulls a `planned` order into `in_production`.
/// An order already advanced (manually or by an earlier log) is left
/// untouched, and no other transition target cascades.
pub fn order_cascade(target: WorkStatus, order_status: OrderStatus) -> Option<OrderStatus> {
    match (target, order_status) {
        (WorkStatus::InProduction, OrderStatus::Planned) => Some(OrderStatus::InProduction),
        _ => None,
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
        (0i64..4_000_000_000).prop_map(|s| Utc.timestamp_opt(s, 0).unwrap())
    }

    fn arb_status() -> impl Strategy<Value = WorkStatus> {
        prop_oneof![
            Just(WorkStatus::Waiting),
            Just(WorkStatus::InProduction),
            Just(WorkStatus::Finished),
        ]
    }

    fn arb_snapshot() -> impl Strategy<Value = LogSnapshot> {
        (
            arb_status(),
            proptest::option::of(arb_instant()),
            proptest::option::of(arb_instant()),
        )
            .prop_map(|(status, start_time, end_time)| LogSnapshot {
                status,
                start_time,
                end_time,
            })
    }

    proptest! {
        #[test]
        fn waiting_always_clears_timestamps(current in arb_snapshot(), now in arb_instant()) {
            let update = apply_log_status(&current, WorkStatus::Waiting, now);
            prop_assert_eq!(update.start_time, None);
            prop_assert_eq!(update.end_time, None);
        }

        #[test]
        fn in_production_never_rewinds_start(current in arb_snapshot(), now in arb_instant()) {
            let update = apply_log_status(&current, WorkStatus::InProduction, now);
            match current.start_time {
                Some(existing) => prop_assert_eq!(update.start_time, Some(existing)),
                None => prop_assert_eq!(update.start_time, Some(now)),
            }
            prop_assert_eq!(update.end_time, None);
        }

        #[test]
        fn finished_stamps_now_and_keeps_start(current in arb_snapshot(), now in arb_instant()) {
            let update = apply_log_status(&current, WorkStatus::Finished, now);
            prop_assert_eq!(update.start_time, current.start_time);
            prop_assert_eq!(update.end_time, Some(now));
        }

        #[test]
        fn applying_twice_with_same_inputs_is_stable(
            current in arb_snapshot(),
            target in arb_status(),
            now in arb_instant(),
        ) {
            let once = apply_log_status(&current, target, now);
            let twice = apply_log_status(
                &LogSnapshot { status: once.status, start_time: once.start_time, end_time: once.end_time },
                target,
                now,
            );
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn cascade_only_from_planned(target in arb_status()) {
            prop_assert_eq!(order_cascade(target, OrderStatus::InProduction), None);
            prop_assert_eq!(order_cascade(target, OrderStatus::Finished), None);
        }
    }
}
