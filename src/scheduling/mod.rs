//! Spaced repetition scheduling for vocabulary items
//!
//! This module provides:
//! - Learning records (per item, per deck mastery state)
//! - The fixed graduated review interval schedule
//! - Daily new-item assignment and working-set selection
//! - Recall processing and deck reset

pub mod algorithm;
pub mod engine;
pub mod models;

pub use algorithm::{MASTERY_THRESHOLD, REVIEW_INTERVALS};
pub use engine::{SchedulingEngine, DEFAULT_DAILY_CAPACITY};
pub use models::*;
