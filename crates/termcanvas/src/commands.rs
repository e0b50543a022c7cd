use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

const LONG_ABOUT: &str = r#"termcanvas gives an agent a place to render interactive output: it finds
or creates a terminal pane/window next to the user's shell and runs a
canvas process inside it.

WORKFLOW:
    1. Run 'spawn' from inside a supported terminal
    2. The canvas opens in a split pane or new window and stays up
    3. Push updates and read state over its socket with update/selection/content
    4. Spawning again with the same id reuses the live session

SUPPORTED TERMINALS:
    tmux, iTerm2, Apple Terminal, WezTerm, Kitty, Alacritty,
    VS Code terminal, Ghostty

EXAMPLES:
    # Open a calendar canvas next to the current shell
    termcanvas spawn calendar --id demo-1 --config '{"week":34}'

    # Push fresh data to it
    termcanvas update demo-1 --config '{"week":35}'

    # Ask what the user selected
    termcanvas selection demo-1

    # See what terminal would be targeted
    termcanvas env"#;

#[derive(Parser)]
#[command(name = "termcanvas")]
#[command(author, version)]
#[command(about = "Render interactive canvases in the user's terminal")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Locate or create a terminal session and run a canvas in it
    #[command(long_about = r#"Locate or create a terminal session and run a canvas in it.

Detects the hosting terminal from the environment, then reuses the
previously created pane/window for this backend when it is still alive,
or creates a fresh one. Exactly one backend is attempted per call.

EXAMPLES:
    termcanvas spawn calendar
    termcanvas spawn table --id prices --config '{"rows":[]}'
    termcanvas spawn calendar --scenario busy-week"#)]
    Spawn {
        /// Canvas kind to render (e.g. calendar, table)
        kind: String,

        /// Session id; names the socket and the config handoff file
        #[arg(long, default_value = "default")]
        id: String,

        /// Canvas config as JSON text
        #[arg(long)]
        config: Option<String>,

        /// Socket path (default: derived from the id)
        #[arg(long)]
        socket: Option<PathBuf>,

        /// Scenario name forwarded to the canvas
        #[arg(long)]
        scenario: Option<String>,
    },

    /// Host a canvas in the current terminal (what spawn runs for you)
    Show {
        /// Canvas kind to render
        kind: String,

        /// Session id
        #[arg(long)]
        id: String,

        /// Canvas config as JSON text
        #[arg(long)]
        config: Option<String>,

        /// Socket path (default: derived from the id)
        #[arg(long)]
        socket: Option<PathBuf>,

        /// Scenario name
        #[arg(long)]
        scenario: Option<String>,
    },

    /// Report the detected terminal environment
    Env,

    /// Push a config update to a running canvas (no reply expected)
    Update {
        /// Session id of the target canvas
        id: String,

        /// New config as JSON text
        #[arg(long)]
        config: String,

        /// Socket path (default: derived from the id)
        #[arg(long)]
        socket: Option<PathBuf>,
    },

    /// Print the current selection of a running canvas
    Selection {
        /// Session id of the target canvas
        id: String,

        /// Socket path (default: derived from the id)
        #[arg(long)]
        socket: Option<PathBuf>,
    },

    /// Print the current content of a running canvas
    Content {
        /// Session id of the target canvas
        id: String,

        /// Socket path (default: derived from the id)
        #[arg(long)]
        socket: Option<PathBuf>,
    },
}
