//! Crate-internal prelude.
//!
//! Re-exports the `derive_more` derives and the `log` macros the widget
//! modules share.

pub use derive_more::Display;
pub use log::{debug, warn};
