//! Spaced repetition engine for vocabulary flashcards
//!
//! A deck's items are handed out in fixed-size daily batches, every recall
//! answer moves the item along a graduated review schedule, and a session
//! navigator walks the active working set while skipping items that are
//! already done.

pub mod catalog;
pub mod config;
pub mod scheduling;
pub mod session;
pub mod store;
pub mod study_log;
