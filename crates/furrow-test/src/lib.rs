//! Testing harness for Furrow tables.
//!
//! - [`Harness`] drives a widget with synthetic input and collects the
//!   messages it emits.
//! - [`Poller`] re-checks a condition until it holds or a deadline passes.
//! - [`StoreProbe`] reads dotted paths out of a JSON state snapshot.
//! - [`Translations`] looks up localized strings by dotted key.
//! - [`fixture`] holds sample farm records and the tables built from them.

pub mod fixture;
mod harness;
mod poll;
mod store;
mod translations;

pub use harness::Harness;
pub use poll::{PollError, Poller, DEFAULT_INTERVAL, DEFAULT_TIMEOUT};
pub use store::{wait_for_populated, StoreError, StoreProbe};
pub use translations::Translations;

/// Route `log` output to the test writer.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
