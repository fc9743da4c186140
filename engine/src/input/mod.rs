//! Input Module
//!
//! Platform-agnostic keyboard handling for character movement. This module
//! is decoupled from any specific windowing system (like winit) so the core
//! can be driven from tests or from the browser alike.
//!
//! # Example
//!
//! ```rust,ignore
//! use forest_walk_engine::input::{InputTracker, KeyCode, KeyEventHub};
//!
//! let hub = KeyEventHub::new();
//! let tracker = InputTracker::attach(&hub);
//!
//! hub.key_down(KeyCode::W);
//! if tracker.flags().forward {
//!     // Move forward
//! }
//! ```

pub mod hub;
pub mod keyboard;
pub mod tracker;

pub use hub::{KeyEvent, KeyEventHub, Subscription};
pub use keyboard::{Direction, DirectionFlags, KeyCode};
pub use tracker::InputTracker;
