//! Line-oriented terminal front end.

use chatsync_core::canvas::DrawingBoard;
use chatsync_core::protocol::{ChatPayload, Content, Envelope, Point};
use chatsync_core::session::ConnectionState;
use chatsync_core::store::{MessageLog, Roster};

use crate::observer::Listener;

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Text(String),
    Gif(String),
    Clear,
    Color(String),
    Draw(Vec<Point>),
    Users,
    Quit,
    Empty,
    /// Unrecognized or badly formed slash command, with a usage hint.
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Text(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((n, a)) => (n, a.trim()),
            None => (rest, ""),
        };

        match name {
            "gif" if !arg.is_empty() => Command::Gif(arg.to_string()),
            "gif" => Command::Invalid("usage: /gif <url>".into()),
            "clear" => Command::Clear,
            "color" if !arg.is_empty() => Command::Color(arg.to_string()),
            "color" => Command::Invalid("usage: /color <hex>".into()),
            "draw" => match parse_points(arg) {
                Some(points) if !points.is_empty() => Command::Draw(points),
                _ => Command::Invalid("usage: /draw x1,y1 x2,y2 ...".into()),
            },
            "users" => Command::Users,
            "quit" => Command::Quit,
            other => Command::Invalid(format!("unknown command /{other}")),
        }
    }
}

fn parse_points(arg: &str) -> Option<Vec<Point>> {
    arg.split_whitespace()
        .map(|pair| {
            let (x, y) = pair.split_once(',')?;
            let x: f64 = x.trim().parse().ok()?;
            let y: f64 = y.trim().parse().ok()?;
            (x.is_finite() && y.is_finite()).then(|| Point::new(x, y))
        })
        .collect()
}

/// Display line for a log entry. Draw entries have none.
pub fn format_entry(env: &Envelope) -> Option<String> {
    let who = env.username.as_deref().unwrap_or("?");
    match &env.content {
        Content::Chat(ChatPayload::Text(text)) => Some(format!("<{who}> {text}")),
        Content::Chat(ChatPayload::Gif(url)) => Some(format!("<{who}> [gif] {url}")),
        Content::System(text) => Some(format!("* {text}")),
        Content::Users(_) | Content::Draw(_) => None,
    }
}

pub fn format_roster(roster: &Roster) -> String {
    format!("online ({}): {}", roster.len(), roster.users().join(", "))
}

/// Prints updates to stdout.
#[derive(Debug, Default)]
pub struct TerminalView;

impl Listener for TerminalView {
    fn connection_changed(&self, state: ConnectionState) {
        match state {
            ConnectionState::Open => println!("-- connected"),
            ConnectionState::Closed => println!("-- disconnected"),
            other => println!("-- {}", other.as_str()),
        }
    }

    fn chat_appended(&self, log: &MessageLog) {
        if let Some(line) = log.last().and_then(format_entry) {
            println!("{line}");
        }
    }

    fn roster_changed(&self, roster: &Roster) {
        if !roster.is_empty() {
            println!("{}", format_roster(roster));
        }
    }

    fn canvas_changed(&self, board: &DrawingBoard) {
        println!(
            "[canvas] {} stroke(s), {} px painted",
            board.canvas().strokes().len(),
            board.raster().painted()
        );
    }
}
