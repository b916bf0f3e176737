//! Anonymized search analytics.
//!
//! Records what was searched and which dictionaries answered, never who
//! searched: user and chat identifiers are reduced to short irreversible
//! hashes before an event exists.

mod event;
mod sink;
mod tracker;

pub use event::{Origin, UsageEvent, anonymize};
pub use sink::{JsonLinesSink, LogSink, MemorySink, UsageSink};
pub use tracker::{InlineDedupe, Tracker};
