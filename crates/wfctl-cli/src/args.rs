//! Typed positional arguments
//!
//! Every command declares an ordered parameter schema. The tokens after the
//! command prefix are checked against it before the handler runs, so handlers
//! only ever see values of the declared type.

use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Non-negative integer identifier (view, output, device)
    Id,
    /// Integer of at least 1
    Positive,
    /// Signed integer
    Int,
    /// Finite floating-point number
    Float,
    /// `true` / `false`
    Bool,
    /// `enable` / `disable`
    Toggle,
    /// `on` / `off`
    Switch,
    /// One of a fixed set of words
    Keyword(&'static [&'static str]),
    /// Any single token
    Text,
    /// All remaining tokens
    Rest,
}

#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    /// Human-readable name used in error messages, e.g. `view ID`
    pub label: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl Param {
    pub const fn required(name: &'static str, label: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }

    /// Placeholder shown in usage lines: `<id>`, `[field]`, `<pairs>...`
    pub fn placeholder(&self) -> String {
        let inner = match self.kind {
            ParamKind::Keyword(choices) => choices.join("|"),
            ParamKind::Bool => "true|false".to_string(),
            ParamKind::Toggle => "enable|disable".to_string(),
            ParamKind::Switch => "on|off".to_string(),
            _ => self.name.to_string(),
        };
        let dots = if self.kind == ParamKind::Rest { "..." } else { "" };

        if self.required {
            format!("<{}>{}", inner, dots)
        } else {
            format!("[{}]{}", inner, dots)
        }
    }

    fn parse(&self, token: &str) -> Result<ArgValue, CommandError> {
        let invalid = |expected: &str| CommandError::invalid(self.label, token, expected);

        match self.kind {
            ParamKind::Id => token
                .parse::<u64>()
                .map(ArgValue::Id)
                .map_err(|_| invalid("a non-negative integer")),
            ParamKind::Positive => match token.parse::<u64>() {
                Ok(n) if n >= 1 => Ok(ArgValue::Id(n)),
                _ => Err(invalid("a positive integer")),
            },
            ParamKind::Int => token
                .parse::<i64>()
                .map(ArgValue::Int)
                .map_err(|_| invalid("an integer")),
            ParamKind::Float => match token.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(ArgValue::Float(f)),
                _ => Err(invalid("a number")),
            },
            ParamKind::Bool => parse_pair(token, "true", "false").ok_or_else(|| invalid("true or false")),
            ParamKind::Toggle => {
                parse_pair(token, "enable", "disable").ok_or_else(|| invalid("enable or disable"))
            }
            ParamKind::Switch => parse_pair(token, "on", "off").ok_or_else(|| invalid("on or off")),
            ParamKind::Keyword(choices) => {
                if choices.contains(&token) {
                    Ok(ArgValue::Text(token.to_string()))
                } else {
                    Err(invalid(&format!("one of {}", choices.join(", "))))
                }
            }
            ParamKind::Text => Ok(ArgValue::Text(token.to_string())),
            ParamKind::Rest => Ok(ArgValue::List(vec![token.to_string()])),
        }
    }
}

fn parse_pair(token: &str, yes: &str, no: &str) -> Option<ArgValue> {
    if token == yes {
        Some(ArgValue::Bool(true))
    } else if token == no {
        Some(ArgValue::Bool(false))
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Id(u64),
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

/// Validated arguments of one command invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<(&'static str, ArgValue)>,
}

impl Args {
    /// Check `tokens` against `params`
    ///
    /// `usage` is quoted in missing/surplus argument errors.
    pub fn parse(params: &[Param], tokens: &[String], usage: &str) -> Result<Self, CommandError> {
        let mut values = Vec::with_capacity(params.len());
        let mut remaining = tokens.iter();

        for param in params {
            if param.kind == ParamKind::Rest {
                let rest: Vec<String> = remaining.by_ref().cloned().collect();
                if rest.is_empty() {
                    if param.required {
                        return Err(missing(param, usage));
                    }
                    continue;
                }
                values.push((param.name, ArgValue::List(rest)));
                continue;
            }

            match remaining.next() {
                Some(token) => values.push((param.name, param.parse(token)?)),
                None if param.required => return Err(missing(param, usage)),
                None => {}
            }
        }

        if let Some(extra) = remaining.next() {
            return Err(CommandError::UnexpectedArgument {
                value: extra.clone(),
                usage: usage.to_string(),
            });
        }

        Ok(Self { values })
    }

    fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }

    pub fn id(&self, name: &'static str) -> Result<u64, CommandError> {
        match self.get(name) {
            Some(ArgValue::Id(v)) => Ok(*v),
            _ => Err(CommandError::Undeclared(name)),
        }
    }

    pub fn int(&self, name: &'static str) -> Result<i64, CommandError> {
        match self.get(name) {
            Some(ArgValue::Int(v)) => Ok(*v),
            _ => Err(CommandError::Undeclared(name)),
        }
    }

    pub fn float(&self, name: &'static str) -> Result<f64, CommandError> {
        match self.get(name) {
            Some(ArgValue::Float(v)) => Ok(*v),
            _ => Err(CommandError::Undeclared(name)),
        }
    }

    pub fn flag(&self, name: &'static str) -> Result<bool, CommandError> {
        self.opt_flag(name).ok_or(CommandError::Undeclared(name))
    }

    pub fn opt_flag(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(ArgValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self, name: &'static str) -> Result<&str, CommandError> {
        self.opt_text(name).ok_or(CommandError::Undeclared(name))
    }

    pub fn opt_text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(ArgValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Tokens collected by a `Rest` parameter; empty when none were given
    pub fn list(&self, name: &str) -> &[String] {
        match self.get(name) {
            Some(ArgValue::List(v)) => v,
            _ => &[],
        }
    }
}

fn missing(param: &Param, usage: &str) -> CommandError {
    CommandError::MissingArgument {
        name: param.name.to_string(),
        usage: usage.to_string(),
    }
}
