//! Where the engine reports problems that do not abort decoding
//!
//! Every engine gets its own sink when it is created. Nothing is routed
//! through process-wide handlers, so two streams decoded side by side
//! never see each other's messages.

use std::fmt;

/// A sink for engine errors and warnings
pub trait Diagnostics: Send {
    /// An error in `module`
    fn error(&self, module: &str, message: fmt::Arguments<'_>);
    /// A warning in `module`
    fn warning(&self, module: &str, message: fmt::Arguments<'_>);
}

/// Drops all messages
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Diagnostics for Silent {
    fn error(&self, _module: &str, _message: fmt::Arguments<'_>) {}
    fn warning(&self, _module: &str, _message: fmt::Arguments<'_>) {}
}

/// Forwards all messages to the [`log`] facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn error(&self, module: &str, message: fmt::Arguments<'_>) {
        log::error!("{}: {}", module, message);
    }

    fn warning(&self, module: &str, message: fmt::Arguments<'_>) {
        log::warn!("{}: {}", module, message);
    }
}
