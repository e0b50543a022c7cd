#![deny(clippy::all)]

pub mod backend;
pub mod command;
pub mod detect;
pub mod error;
pub mod exec;
pub mod registry;
pub mod spawn;

pub use backend::Backend;
pub use backend::SpawnResult;
pub use command::build_show_command;
pub use detect::TerminalApp;
pub use detect::TerminalEnvironment;
pub use detect::detect;
pub use error::SpawnError;
pub use registry::BackendKind;
pub use registry::FileStore;
pub use registry::SessionStore;
pub use spawn::SpawnOptions;
pub use spawn::spawn_canvas;
