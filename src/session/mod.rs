//! Study session state: cursor movement and completion detection

pub mod completion;
pub mod navigator;

pub use completion::{is_session_complete, LearningMode, SessionProgress};
pub use navigator::{advance, Direction, SessionNavigator};
