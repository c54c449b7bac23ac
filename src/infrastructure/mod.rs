//! Infrastructure layer - store implementations and process-level services

pub mod datastore;
pub mod logging;
