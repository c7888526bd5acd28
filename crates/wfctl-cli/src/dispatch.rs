//! Command dispatch
//!
//! Resolution happens before any socket is opened: the first two tokens
//! select a registered command and the rest are validated against its
//! parameter schema. Only a fully resolved `Invocation` ever talks to the
//! compositor.

use tracing::debug;
use wfctl_ipc::WayfireApi;

use crate::args::Args;
use crate::commands::{device, keyboard, option, plugin, query, view, workspace};
use crate::error::CommandError;
use crate::output::Outcome;
use crate::registry::{lookup, CommandKind, CommandSpec};

/// Split a command line on runs of whitespace
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// A recognized command with validated arguments
#[derive(Debug)]
pub struct Invocation {
    pub spec: &'static CommandSpec,
    pub args: Args,
}

/// Select the command named by the first two tokens and check the rest
pub fn resolve(tokens: &[String]) -> Result<Invocation, CommandError> {
    if tokens.is_empty() {
        return Err(CommandError::NoCommand);
    }
    if tokens.len() < 2 {
        return Err(CommandError::NotRecognized(tokens.join(" ")));
    }

    let prefix = format!("{} {}", tokens[0], tokens[1]);
    let spec = lookup(&prefix).ok_or_else(|| CommandError::NotRecognized(tokens.join(" ")))?;
    let args = Args::parse(spec.params, &tokens[2..], &spec.usage())?;

    debug!(command = spec.prefix, ?args, "Resolved command");
    Ok(Invocation { spec, args })
}

/// Sizes are validated as positive; the geometry wire type is signed
fn dimension(args: &Args, name: &'static str) -> Result<i64, CommandError> {
    let value = args.id(name)?;
    i64::try_from(value).map_err(|_| CommandError::invalid(name, &value.to_string(), "a smaller number"))
}

impl Invocation {
    pub async fn run<C: WayfireApi>(&self, client: &mut C) -> Result<Outcome, CommandError> {
        let args = &self.args;

        match self.spec.kind {
            CommandKind::ListViews => query::list_views(client).await,
            CommandKind::ListOutputs => query::list_outputs(client).await,
            CommandKind::ListInputs => query::list_inputs(client).await,
            CommandKind::GetView => query::get_view(client, args.id("id")?, args.opt_text("field")).await,
            CommandKind::GetFocused => query::get_focused(client, args.text("target")?).await,
            CommandKind::GetOption => option::get_option(client, args.text("name")?).await,
            CommandKind::SetOption => option::set_options(client, args.list("key:value")).await,
            CommandKind::SwitchWorkspace => {
                workspace::switch_workspace(client, args.id("number")?).await
            }
            CommandKind::NextWorkspace => workspace::next(client).await,
            CommandKind::MoveView => {
                view::move_view(client, args.id("id")?, args.int("x")?, args.int("y")?).await
            }
            CommandKind::ResizeView => {
                let width = dimension(args, "width")?;
                let height = dimension(args, "height")?;
                view::resize_view(client, args.id("id")?, width, height).await
            }
            CommandKind::CloseView => view::close_view(client, args.id("id")?).await,
            CommandKind::MinimizeView => {
                view::minimize_view(client, args.id("id")?, args.flag("state")?).await
            }
            CommandKind::MaximizeView => view::maximize_view(client, args.id("id")?).await,
            CommandKind::FullscreenView => {
                let state = args.opt_flag("state").unwrap_or(true);
                view::fullscreen_view(client, args.id("id")?, state).await
            }
            CommandKind::SetView => match args.text("property")? {
                "alpha" => view::set_view_alpha(client, args.id("id")?, args.float("value")?).await,
                other => Err(CommandError::invalid("view property", other, "alpha")),
            },
            CommandKind::ConfigureDevice => {
                device::configure_device(client, args.text("device")?, args.flag("state")?).await
            }
            CommandKind::SearchViews => {
                query::search_views(client, args.text("value")?, args.opt_text("key")).await
            }
            CommandKind::GetKeyboard => keyboard::get_keyboard(client).await,
            CommandKind::SetKeyboard => keyboard::set_keyboard(client, args.list("setting:value")).await,
            CommandKind::EnablePlugin => plugin::enable_plugin(client, args.text("name")?).await,
            CommandKind::DisablePlugin => plugin::disable_plugin(client, args.text("name")?).await,
            CommandKind::StatusPlugin => plugin::status_plugin(client, args.text("name")?).await,
            CommandKind::SetOutput => {
                option::set_output(client, args.text("name")?, args.flag("state")?).await
            }
        }
    }
}
