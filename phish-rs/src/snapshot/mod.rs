//! Page snapshot ingestion
//!
//! A [`PageSnapshot`] is the frozen view of a rendered page handed over by the
//! collector (headless parser, browser hook, or content-script bridge). The
//! analysis core is agnostic to how the snapshot was obtained; it only relies
//! on its shape.

pub mod types;

pub use types::{DomSignals, FormSignal, IframeSignal, InputSignal, PageSnapshot};
