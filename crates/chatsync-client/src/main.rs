//! chatsync terminal client
//!
//! Usage: `chatsync-client <name>`
//! - config: `chatsync.yaml` (or `$CHATSYNC_CONFIG`), defaults when absent
//! - `$CHATSYNC_WS_URL` overrides `server.base_url`
//! - stdin lines are chat messages; `/gif`, `/clear`, `/color`, `/draw`,
//!   `/users` and `/quit` are commands

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use chatsync_client::terminal::{format_roster, Command, TerminalView};
use chatsync_client::transport::WsConnector;
use chatsync_client::{config, ChatClient};
use chatsync_core::error::{ChatSyncError, Result};
use chatsync_core::session::ConnectionState;

const ENV_CONFIG: &str = "CHATSYNC_CONFIG";
const DEFAULT_CONFIG: &str = "chatsync.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        eprintln!("chatsync-client: {e} ({})", e.code().as_str());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var(ENV_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG.to_string());
    let mut cfg = config::load_or_default(&path)?;
    config::apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;

    let name = std::env::args()
        .nth(1)
        .ok_or_else(|| ChatSyncError::InvalidIdentity("usage: chatsync-client <name>".into()))?;

    let (connector, mut events) = WsConnector::new();
    let mut client = ChatClient::new(connector, &cfg)?;
    client.subscribe(Arc::new(TerminalView));

    tracing::info!(base_url = %cfg.server.base_url, "chatsync-client starting");
    if !client.join(&name) {
        return Err(ChatSyncError::InvalidIdentity(format!(
            "cannot join as {name:?}: name must be 2-20 characters"
        )));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            ev = events.recv() => {
                let Some(ev) = ev else { break };
                client.handle(ev);
                if client.state() == ConnectionState::Closed {
                    break;
                }
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !apply(&mut client, Command::parse(&line)) {
                        break;
                    }
                }
                Ok(None) => {
                    client.leave();
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    client.leave();
                    break;
                }
            },
        }
    }

    Ok(())
}

/// Returns `false` when the loop should stop.
fn apply(client: &mut ChatClient<WsConnector>, cmd: Command) -> bool {
    let sent = match cmd {
        Command::Empty => return true,
        Command::Quit => {
            client.leave();
            return false;
        }
        Command::Users => {
            println!("{}", format_roster(client.roster()));
            return true;
        }
        Command::Color(color) => {
            if !client.set_color(&color) {
                println!("invalid color {color:?}, expected #rgb or #rrggbb");
            }
            return true;
        }
        Command::Invalid(hint) => {
            println!("{hint}");
            return true;
        }
        Command::Text(text) => client.send_text(&text),
        Command::Gif(url) => client.send_gif(&url),
        Command::Clear => client.clear_canvas(),
        Command::Draw(points) => {
            let color = client.board().color().to_string();
            client.commit_stroke(points, &color)
        }
    };
    if !sent && !client.is_connected() {
        println!("(not connected, dropped)");
    }
    true
}
