//! Command registry
//!
//! A fixed table from a two-token command prefix to the command it selects.
//! Lookup is by exact string equality on the joined prefix, so exactly one
//! command can match an input.

use crate::args::{Param, ParamKind};

/// Which handler a registered prefix runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    ListViews,
    ListOutputs,
    ListInputs,
    GetView,
    GetFocused,
    GetOption,
    SetOption,
    SwitchWorkspace,
    NextWorkspace,
    MoveView,
    ResizeView,
    CloseView,
    MinimizeView,
    MaximizeView,
    FullscreenView,
    SetView,
    ConfigureDevice,
    SearchViews,
    GetKeyboard,
    SetKeyboard,
    EnablePlugin,
    DisablePlugin,
    StatusPlugin,
    SetOutput,
}

#[derive(Debug)]
pub struct CommandSpec {
    /// Two whitespace-free words joined by one space
    pub prefix: &'static str,
    pub params: &'static [Param],
    pub summary: &'static str,
    pub kind: CommandKind,
}

impl CommandSpec {
    /// Usage line, e.g. `move view <id> <x> <y>`
    pub fn usage(&self) -> String {
        std::iter::once(self.prefix.to_string())
            .chain(self.params.iter().map(Param::placeholder))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

const VIEW_ID: Param = Param::required("id", "view ID", ParamKind::Id);

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        prefix: "list views",
        params: &[],
        summary: "List all views",
        kind: CommandKind::ListViews,
    },
    CommandSpec {
        prefix: "list outputs",
        params: &[],
        summary: "List all outputs",
        kind: CommandKind::ListOutputs,
    },
    CommandSpec {
        prefix: "list inputs",
        params: &[],
        summary: "List input devices",
        kind: CommandKind::ListInputs,
    },
    CommandSpec {
        prefix: "get view",
        params: &[
            VIEW_ID,
            Param::optional("field", "field name", ParamKind::Text),
        ],
        summary: "Show a view, or one of its top-level fields",
        kind: CommandKind::GetView,
    },
    CommandSpec {
        prefix: "get focused",
        params: &[Param::required(
            "target",
            "focus target",
            ParamKind::Keyword(&["output", "view", "workspace"]),
        )],
        summary: "Show the focused output or view, or the focused workspace number",
        kind: CommandKind::GetFocused,
    },
    CommandSpec {
        prefix: "get option",
        params: &[Param::required("name", "option name", ParamKind::Text)],
        summary: "Show the value of a configuration option (section/name)",
        kind: CommandKind::GetOption,
    },
    CommandSpec {
        prefix: "set option",
        params: &[Param::required("key:value", "option assignment", ParamKind::Rest)],
        summary: "Set configuration options in one batch",
        kind: CommandKind::SetOption,
    },
    CommandSpec {
        prefix: "switch workspace",
        params: &[Param::required(
            "number",
            "workspace number",
            ParamKind::Positive,
        )],
        summary: "Switch the focused output to a workspace (1-based, row-major)",
        kind: CommandKind::SwitchWorkspace,
    },
    CommandSpec {
        prefix: "next workspace",
        params: &[],
        summary: "Switch the focused output to the next workspace",
        kind: CommandKind::NextWorkspace,
    },
    CommandSpec {
        prefix: "move view",
        params: &[
            VIEW_ID,
            Param::required("x", "x coordinate", ParamKind::Int),
            Param::required("y", "y coordinate", ParamKind::Int),
        ],
        summary: "Move a view, keeping its size",
        kind: CommandKind::MoveView,
    },
    CommandSpec {
        prefix: "resize view",
        params: &[
            VIEW_ID,
            Param::required("width", "width", ParamKind::Positive),
            Param::required("height", "height", ParamKind::Positive),
        ],
        summary: "Resize a view, keeping its position",
        kind: CommandKind::ResizeView,
    },
    CommandSpec {
        prefix: "close view",
        params: &[VIEW_ID],
        summary: "Close a view",
        kind: CommandKind::CloseView,
    },
    CommandSpec {
        prefix: "minimize view",
        params: &[
            VIEW_ID,
            Param::required("state", "minimize state", ParamKind::Bool),
        ],
        summary: "Minimize or restore a view",
        kind: CommandKind::MinimizeView,
    },
    CommandSpec {
        prefix: "maximize view",
        params: &[VIEW_ID],
        summary: "Fit a view to its output's work area",
        kind: CommandKind::MaximizeView,
    },
    CommandSpec {
        prefix: "fullscreen view",
        params: &[
            VIEW_ID,
            Param::optional("state", "fullscreen state", ParamKind::Bool),
        ],
        summary: "Make a view fullscreen (or leave fullscreen with false)",
        kind: CommandKind::FullscreenView,
    },
    CommandSpec {
        prefix: "set view",
        params: &[
            Param::required("property", "view property", ParamKind::Keyword(&["alpha"])),
            VIEW_ID,
            Param::required("value", "alpha", ParamKind::Float),
        ],
        summary: "Set a view property (alpha between 0 and 1)",
        kind: CommandKind::SetView,
    },
    CommandSpec {
        prefix: "configure device",
        params: &[
            Param::required("device", "device", ParamKind::Text),
            Param::required("state", "device state", ParamKind::Toggle),
        ],
        summary: "Enable or disable an input device by name, id or type",
        kind: CommandKind::ConfigureDevice,
    },
    CommandSpec {
        prefix: "search views",
        params: &[
            Param::required("value", "search value", ParamKind::Text),
            Param::optional("key", "field name", ParamKind::Text),
        ],
        summary: "Find views by value, optionally in one field; skips the focused view",
        kind: CommandKind::SearchViews,
    },
    CommandSpec {
        prefix: "get keyboard",
        params: &[],
        summary: "Show the XKB layout, variant, model and options",
        kind: CommandKind::GetKeyboard,
    },
    CommandSpec {
        prefix: "set keyboard",
        params: &[Param::required("setting:value", "keyboard setting", ParamKind::Rest)],
        summary: "Set XKB settings (layout:, variant:, model:, options:)",
        kind: CommandKind::SetKeyboard,
    },
    CommandSpec {
        prefix: "enable plugin",
        params: &[Param::required("name", "plugin name", ParamKind::Text)],
        summary: "Add a plugin to core/plugins",
        kind: CommandKind::EnablePlugin,
    },
    CommandSpec {
        prefix: "disable plugin",
        params: &[Param::required("name", "plugin name", ParamKind::Text)],
        summary: "Remove a plugin from core/plugins",
        kind: CommandKind::DisablePlugin,
    },
    CommandSpec {
        prefix: "status plugin",
        params: &[Param::required("name", "plugin name", ParamKind::Text)],
        summary: "Report whether a plugin is enabled",
        kind: CommandKind::StatusPlugin,
    },
    CommandSpec {
        prefix: "set output",
        params: &[
            Param::required("name", "output name", ParamKind::Text),
            Param::required("state", "output state", ParamKind::Switch),
        ],
        summary: "Turn an output on or off",
        kind: CommandKind::SetOutput,
    },
];

/// Find the command registered under `prefix`
pub fn lookup(prefix: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.prefix == prefix)
}

/// One line per command: usage and summary
pub fn command_list() -> String {
    let usages: Vec<String> = COMMANDS.iter().map(CommandSpec::usage).collect();
    let width = usages.iter().map(String::len).max().unwrap_or(0);

    COMMANDS
        .iter()
        .zip(&usages)
        .map(|(spec, usage)| format!("  {:<width$}  {}", usage, spec.summary, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_prefixes_are_unique() {
        let mut seen = HashSet::new();
        for spec in COMMANDS {
            assert!(seen.insert(spec.prefix), "duplicate prefix: {}", spec.prefix);
        }
    }

    #[test]
    fn test_prefixes_are_two_words() {
        for spec in COMMANDS {
            let words: Vec<&str> = spec.prefix.split(' ').collect();
            assert_eq!(words.len(), 2, "bad prefix: {:?}", spec.prefix);
            assert!(words.iter().all(|w| !w.is_empty()));
        }
    }

    #[test]
    fn test_kinds_are_unique() {
        let mut seen = HashSet::new();
        for spec in COMMANDS {
            assert!(seen.insert(format!("{:?}", spec.kind)));
        }
    }

    #[test]
    fn test_rest_parameter_is_last() {
        for spec in COMMANDS {
            if let Some(pos) = spec.params.iter().position(|p| p.kind == ParamKind::Rest) {
                assert_eq!(pos, spec.params.len() - 1, "{}", spec.prefix);
            }
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(lookup("list views").unwrap().kind, CommandKind::ListViews);
        assert!(lookup("list").is_none());
        assert!(lookup("list views extra").is_none());
        assert!(lookup("List views").is_none());
    }

    #[test]
    fn test_usage_line() {
        assert_eq!(lookup("move view").unwrap().usage(), "move view <id> <x> <y>");
        assert_eq!(
            lookup("get focused").unwrap().usage(),
            "get focused <output|view|workspace>"
        );
    }

    #[test]
    fn test_command_list_mentions_every_prefix() {
        let list = command_list();
        for spec in COMMANDS {
            assert!(list.contains(spec.prefix));
        }
    }
}
