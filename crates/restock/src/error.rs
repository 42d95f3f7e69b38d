//! Run-level errors and the process exit codes they map to.

use std::fmt;
use stockfile::StockFileError;
use thiserror::Error;

/// Process exit codes. Scripts branch on these, so the numbers are fixed.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    /// Wrong number of command-line arguments.
    pub const USAGE: u8 = 1;
    pub const INVENTORY_EMPTY: u8 = 2;
    pub const INVENTORY_UNAVAILABLE: u8 = 3;
    pub const INVENTORY_MALFORMED: u8 = 4;
    pub const SHIPMENT_EMPTY: u8 = 5;
    pub const SHIPMENT_UNAVAILABLE: u8 = 6;
    pub const SHIPMENT_MALFORMED: u8 = 7;
    pub const OUTPUT_UNWRITABLE: u8 = 8;
}

/// Which step of a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Inventory,
    Shipment,
    Output,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Inventory => "inventory",
            Stage::Shipment => "shipment",
            Stage::Output => "output",
        })
    }
}

/// A fatal error from one of the run steps.
#[derive(Debug, Error)]
#[error("{stage}: {source}")]
pub struct RunError {
    pub stage: Stage,
    #[source]
    pub source: StockFileError,
}

impl RunError {
    pub fn new(stage: Stage, source: StockFileError) -> Self {
        Self { stage, source }
    }

    /// The process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        use exit_code::*;
        use StockFileError as E;

        match (self.stage, &self.source) {
            (Stage::Output, _) => OUTPUT_UNWRITABLE,

            (Stage::Inventory, E::Empty { .. }) => INVENTORY_EMPTY,
            (Stage::Inventory, E::Malformed { .. }) => INVENTORY_MALFORMED,
            (Stage::Inventory, _) => INVENTORY_UNAVAILABLE,

            (Stage::Shipment, E::Empty { .. }) => SHIPMENT_EMPTY,
            (Stage::Shipment, E::Malformed { .. }) => SHIPMENT_MALFORMED,
            (Stage::Shipment, _) => SHIPMENT_UNAVAILABLE,
        }
    }
}
