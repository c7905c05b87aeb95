//! Command implementations for fadup CLI

pub mod rename;
