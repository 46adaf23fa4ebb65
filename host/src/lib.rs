//! Minimal tracking runtime: loads a plugin and drives its lifecycle.

pub mod plugin;
pub mod session;

pub use self::{
    plugin::{DynamicPlugin, LoadError, PluginApi},
    session::{log_to_tracing, run, SessionReport},
};
