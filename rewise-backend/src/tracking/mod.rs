//! Review tracking: the ledger of past reviews and the choice of what to quiz next.

pub mod ledger;
pub mod scorer;
pub mod updater;

pub use ledger::{TrackingLedger, TrackingRecord};
