//! Configuration parsing for wfctl
//!
//! The configuration file is optional. When present it is a KDL document with
//! a `global` section (log level, socket path, table style) and an `aliases`
//! section mapping short names to command prefixes.

mod error;
mod model;
mod parser;

pub use error::ConfigError;
pub use model::*;
pub use parser::{load_config, parse_config, parse_config_str};
