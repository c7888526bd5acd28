//! KDL configuration parser

use std::path::Path;

use crate::error::ConfigError;
use crate::model::*;

/// Load the configuration file if it exists
///
/// The file is optional: a missing path yields `Config::default()`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!("No configuration at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    parse_config(path)
}

/// Parse a configuration file from the given path
pub fn parse_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_str(&content)
}

/// Parse configuration from a string
pub fn parse_config_str(content: &str) -> Result<Config, ConfigError> {
    let doc: kdl::KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        // kdl uses an older miette version, so we need to extract offset/len manually
        let offset = e.span.offset();
        let len = e.span.len();
        let span = miette::SourceSpan::from((offset, len));
        ConfigError::ParseError {
            src: content.to_string(),
            span,
            source: e,
        }
    })?;

    let mut config = Config::default();

    for node in doc.nodes() {
        match node.name().value() {
            "global" => {
                config.global = parse_global(node)?;
            }
            "aliases" => {
                parse_aliases(node, &mut config)?;
            }
            name => {
                tracing::warn!("Unknown top-level node: {}", name);
            }
        }
    }

    Ok(config)
}

fn first_string(node: &kdl::KdlNode) -> Option<&str> {
    node.entries().first().and_then(|e| e.value().as_string())
}

fn parse_global(node: &kdl::KdlNode) -> Result<GlobalConfig, ConfigError> {
    let mut global = GlobalConfig::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "log-level" => {
                    if let Some(val) = first_string(child) {
                        global.log_level = val
                            .parse()
                            .map_err(|message| ConfigError::Invalid { message })?;
                    }
                }
                "socket" => {
                    if let Some(val) = first_string(child) {
                        global.socket = Some(shellexpand::tilde(val).into_owned().into());
                    }
                }
                "table-style" => {
                    if let Some(val) = first_string(child) {
                        global.table_style = val
                            .parse()
                            .map_err(|message| ConfigError::Invalid { message })?;
                    }
                }
                name => {
                    tracing::warn!("Unknown global config option: {}", name);
                }
            }
        }
    }

    Ok(global)
}

fn parse_aliases(node: &kdl::KdlNode, config: &mut Config) -> Result<(), ConfigError> {
    let Some(children) = node.children() else {
        return Ok(());
    };

    for child in children.nodes() {
        let name = child.name().value();
        let expansion = first_string(child).ok_or_else(|| ConfigError::MissingField {
            field: format!("command text for alias `{}` (e.g., `{} \"list views\"`)", name, name),
        })?;

        if expansion.split_whitespace().next().is_none() {
            return Err(ConfigError::Invalid {
                message: format!("Alias '{}' expands to an empty command", name),
            });
        }

        if config
            .aliases
            .insert(name.to_string(), expansion.to_string())
            .is_some()
        {
            tracing::warn!("Alias '{}' defined more than once, last one wins", name);
        }
    }

    Ok(())
}
