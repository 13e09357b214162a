//! Computer-controlled command providers.

pub mod ai;
