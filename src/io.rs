//! Report writers: CSV ground tracks and JSON snapshots.

pub mod csv;
pub mod json;
