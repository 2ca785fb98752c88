//! Component traits for the TUI
//!
//! App does not know how to scroll, copy or route keys for each panel.
//! Components declare those capabilities through traits and App only
//! orchestrates.
//!
//! ```text
//!                     App
//!        (routes keys, owns components)
//!                      │
//!       ┌──────────────┼──────────────┐
//!       ▼              ▼              ▼
//!  ┌──────────┐  ┌──────────┐  ┌──────────┐
//!  │  Result  │  │   File   │  │   Logs   │
//!  │  Panel   │  │  Picker  │  │  Panel   │
//!  └──────────┘  └──────────┘  └──────────┘
//! ```
//!
//! - [`Scrollable`] - content taller than its viewport
//! - [`Copyable`] - content that can go to the clipboard
//! - [`Interactive`] - components that take keyboard input

mod copyable;
mod interactive;
mod scrollable;

pub use copyable::Copyable;
pub use interactive::{Handled, Interactive};
pub use scrollable::Scrollable;
