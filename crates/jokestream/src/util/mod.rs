//! Assorted utility types (missing batteries).

pub(crate) type DynError = dyn std::error::Error + Send + Sync;
