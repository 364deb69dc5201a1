//! Scope Broker - in-process pub/sub fan-out for call events
//!
//! The broker decouples call capture from consumption: every completed call
//! becomes one `publish`, every live viewer holds one [`Subscription`] with
//! its own bounded queue. Publishers never block; a subscriber that cannot
//! keep up loses events rather than slowing anyone else down.
//!
//! ```text
//! interceptor ──publish──► Broker ──┬──► Subscription (watch stream #1)
//!                                   ├──► Subscription (watch stream #2)
//!                                   └──► Subscription (...)
//! ```

mod broker;

pub use broker::{Broker, Subscription, DEFAULT_BUFFER_SIZE};
