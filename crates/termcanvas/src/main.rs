mod canvas;
mod color;
mod commands;
mod handlers;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use termcanvas_ipc::ClientError;
use termcanvas_ipc::QueryRequest;
use termcanvas_spawn::SpawnError;

use crate::color::Colors;
use crate::commands::Cli;
use crate::commands::Commands;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    color::init(cli.no_color);
    init_tracing();

    if let Err(e) = run(cli).await {
        if let Some(spawn_error) = e.downcast_ref::<SpawnError>() {
            eprintln!("{} {}", Colors::error("Error:"), spawn_error);
            eprintln!("{} {}", Colors::dim("Suggestion:"), spawn_error.suggestion());
            std::process::exit(spawn_error.exit_code());
        } else if let Some(client_error) = e.downcast_ref::<ClientError>() {
            eprintln!("{} {}", Colors::error("Error:"), client_error);
            eprintln!(
                "{} {}",
                Colors::dim("Suggestion:"),
                client_error.suggestion()
            );
            if client_error.is_retryable() {
                eprintln!(
                    "{}",
                    Colors::dim("(This error may be transient - retry may succeed)")
                );
            }
            std::process::exit(exit_code_for_client_error(client_error));
        } else {
            eprintln!("{} {}", Colors::error("Error:"), e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("TERMCANVAS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code_for_client_error(error: &ClientError) -> i32 {
    match error {
        ClientError::SerializationFailed(_) => 64, // EX_USAGE
        ClientError::ConnectionFailed(_) => 69,    // EX_UNAVAILABLE
        ClientError::ConnectionClosed => 74,       // EX_IOERR
        ClientError::Timeout { .. } => 75,         // EX_TEMPFAIL
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Spawn {
            kind,
            id,
            config,
            socket,
            scenario,
        } => {
            handlers::handle_spawn(&kind, &id, config.as_deref(), socket, scenario, cli.json)
                .await?
        }

        Commands::Show {
            kind,
            id,
            config,
            socket,
            scenario,
        } => handlers::handle_show(kind, id, config, socket, scenario).await?,

        Commands::Env => handlers::handle_env(cli.json),

        Commands::Update { id, config, socket } => {
            handlers::handle_update(&id, &config, socket).await?
        }

        Commands::Selection { id, socket } => {
            handlers::handle_query(&id, socket, QueryRequest::GetSelection).await?
        }

        Commands::Content { id, socket } => {
            handlers::handle_query(&id, socket, QueryRequest::GetContent).await?
        }
    }

    Ok(())
}
