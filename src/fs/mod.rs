//! Filesystem utilities for conveyor.
//!
//! Every file conveyor persists (preference stores, IDE descriptors, the
//! build description) goes through an atomic write so an interrupted build
//! never leaves a half-written file behind.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
