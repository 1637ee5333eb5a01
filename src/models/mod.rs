//! Data models shared between the bots and the aggregation proxy.
//!
//! The producer side (`BotStatus`) is what each bot serializes on its
//! status endpoint; the consumer side (`StatusSnapshot`) is the defensive
//! view the proxy parses bodies into.

pub mod status;

pub use status::{BotStatus, StatusSnapshot};
