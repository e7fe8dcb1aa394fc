// irix-assembler/src/lib.rs
//
// Assembles schema-validated IRIX reports from loosely-typed JSON upload
// requests: skeleton building, table-driven extension binding, annex
// assembly with content hashing, and a schema validator gate.

pub mod annex;
pub mod coerce;
pub mod config;
pub mod error;
pub mod meta;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod validate;
pub mod xml;

pub use error::{IrixError, Result};
pub use pipeline::{AssembledReport, ReportPipeline};
