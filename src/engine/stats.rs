use prettytable::{Cell as TableCell, Row, Table};
use serde::Serialize;

use crate::engine::cell::Cell;

/// What one run of the propagation loop accomplished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropagationStats {
    /// Full passes over the knowledge base, including the final no-change
    /// pass that declares the fixed point.
    pub passes: u64,
    /// Cells newly proven safe (the observed cell itself not included).
    pub safes_learned: u64,
    /// Cells newly proven to be mines.
    pub mines_learned: u64,
    /// Constraints created by subset subtraction.
    pub constraints_derived: u64,
    /// Constraints retired: replaced by a subtraction or emptied out.
    pub constraints_retired: u64,
}

impl PropagationStats {
    pub fn merge(&mut self, other: &PropagationStats) {
        self.passes += other.passes;
        self.safes_learned += other.safes_learned;
        self.mines_learned += other.mines_learned;
        self.constraints_derived += other.constraints_derived;
        self.constraints_retired += other.constraints_retired;
    }
}

/// One observation fed to the engine, paired with the propagation work it
/// triggered. Drivers collect these to report on a game afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ObservationRecord {
    pub cell: Cell,
    pub count: u8,
    pub stats: PropagationStats,
}

/// Renders per-observation statistics as a text table.
pub fn render_stats_table(records: &[ObservationRecord]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        TableCell::new("Move"),
        TableCell::new("Cell"),
        TableCell::new("Count"),
        TableCell::new("Passes"),
        TableCell::new("Safes"),
        TableCell::new("Mines"),
        TableCell::new("Derived"),
        TableCell::new("Retired"),
    ]));

    for (i, record) in records.iter().enumerate() {
        table.add_row(Row::new(vec![
            TableCell::new(&(i + 1).to_string()),
            TableCell::new(&record.cell.to_string()),
            TableCell::new(&record.count.to_string()),
            TableCell::new(&record.stats.passes.to_string()),
            TableCell::new(&record.stats.safes_learned.to_string()),
            TableCell::new(&record.stats.mines_learned.to_string()),
            TableCell::new(&record.stats.constraints_derived.to_string()),
            TableCell::new(&record.stats.constraints_retired.to_string()),
        ]));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn merge_accumulates_every_field() {
        let mut total = PropagationStats::default();
        total.merge(&PropagationStats {
            passes: 2,
            safes_learned: 3,
            mines_learned: 1,
            constraints_derived: 1,
            constraints_retired: 2,
        });
        total.merge(&PropagationStats {
            passes: 1,
            ..Default::default()
        });
        assert_eq!(total.passes, 3);
        assert_eq!(total.safes_learned, 3);
        assert_eq!(total.mines_learned, 1);
        assert_eq!(total.constraints_derived, 1);
        assert_eq!(total.constraints_retired, 2);
    }

    #[test]
    fn table_has_a_row_per_observation() {
        let records = vec![
            ObservationRecord {
                cell: Cell::new(0, 0),
                count: 0,
                stats: PropagationStats::default(),
            },
            ObservationRecord {
                cell: Cell::new(1, 2),
                count: 3,
                stats: PropagationStats::default(),
            },
        ];
        let rendered = render_stats_table(&records);
        assert!(rendered.contains("(1, 2)"));
        assert!(rendered.matches('\n').count() >= 4);
    }
}
