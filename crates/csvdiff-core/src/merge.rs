//! Merge applier: fold accept/reject decisions over a base table
//!
//! Decisions are processed strictly in the order the differences were
//! produced; a later accept on the same cell wins over an earlier one.

use crate::diff::Difference;
use crate::table::Table;

/// Operator verdict on a single difference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Take the right table's value
    Accept,
    /// Keep the base table's value
    Reject,
    /// Stop processing; this and all later decisions are ignored
    Abort,
}

/// Apply a sequence of decisions onto a copy of the base table.
///
/// `Accept` writes the difference's new value at its cell address,
/// materializing null-filled rows when the address lies beyond the base
/// row count (a row that exists only in the right table). `Reject` keeps
/// the base value. `Abort` stops immediately, leaving every remaining
/// difference at base-table values. Decisions naming a column the base
/// does not have are skipped.
pub fn apply_decisions(base: &Table, decisions: &[(Difference, Decision)]) -> Table {
    let mut result = base.clone();

    for (diff, decision) in decisions {
        match decision {
            Decision::Abort => break,
            Decision::Reject => {}
            Decision::Accept => {
                if let Some(col) = result.find_column(&diff.column) {
                    let index = col.index;
                    result.set_cell(diff.row, index, diff.new_value.clone());
                }
            }
        }
    }

    result
}
