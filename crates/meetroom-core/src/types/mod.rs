//! Validated value types.
//!
//! These types enforce their invariants at construction time, so requests
//! built from them never carry malformed input to the server.

mod api_url;
mod slot;

pub use api_url::ApiUrl;
pub use slot::TimeSlot;
