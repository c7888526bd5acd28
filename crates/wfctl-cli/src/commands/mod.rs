//! Command handlers
//!
//! One function per registered command. Handlers receive an explicitly
//! constructed client and already validated arguments, and return the
//! `Outcome` to print.

pub mod device;
pub mod keyboard;
pub mod option;
pub mod plugin;
pub mod query;
pub mod view;
pub mod workspace;
