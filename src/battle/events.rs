//! Table event log
//!
//! Every committed move, cancellation and check gets a human-readable line.

use serde::{Deserialize, Serialize};

use crate::battle::arcs::FacingArc;
use crate::battle::report::MovementReport;
use crate::core::error::Result;
use crate::core::types::{Sequence, UnitId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEvent {
    pub sequence: Sequence,
    pub event_type: TableEventType,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TableEventType {
    UnitPlaced { unit_id: UnitId },
    MoveCommitted { unit_id: UnitId, report: MovementReport },
    MoveCancelled { unit_id: UnitId },
    DistanceMeasured { unit_id: UnitId, target_id: UnitId, distance: f64 },
    ArcChecked { unit_id: UnitId, target_id: UnitId, arc: Option<FacingArc> },
}

#[derive(Debug, Clone, Default)]
pub struct TableEventLog {
    pub events: Vec<TableEvent>,
    next_sequence: Sequence,
}

impl TableEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: TableEventType, description: String) -> Sequence {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.events.push(TableEvent {
            sequence,
            event_type,
            description,
        });
        sequence
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&TableEvent> {
        self.events.last()
    }

    /// Descriptions in the order they happened
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.description.as_str())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_increase() {
        let mut log = TableEventLog::new();
        let unit_id = UnitId::new();
        let a = log.push(TableEventType::UnitPlaced { unit_id }, "placed".into());
        let b = log.push(TableEventType::MoveCancelled { unit_id }, "cancelled".into());
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(log.len(), 2);
        assert_eq!(log.lines().collect::<Vec<_>>(), vec!["placed", "cancelled"]);
    }

    #[test]
    fn test_json_export() {
        let mut log = TableEventLog::new();
        log.push(
            TableEventType::ArcChecked {
                unit_id: UnitId::new(),
                target_id: UnitId::new(),
                arc: Some(FacingArc::Rear),
            },
            "in the rear arc".into(),
        );
        let json = log.to_json().unwrap();
        assert!(json.contains("ArcChecked"));
        assert!(json.contains("Rear"));
        assert!(json.contains("in the rear arc"));
    }
}
