//! File formats and output management for the `ranplan` binaries.
//!
//! Everything here is a collaborator of the core engine: JSON input
//! loading, the ANFR station-CSV importer, the toy scenario generator and
//! the allocation report writer. The core itself never touches a file.

pub mod loader;
pub mod report;
pub mod stations;
pub mod toygen;
