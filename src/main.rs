use std::sync::Arc;

use clap::Parser;
use sketchboard::board::Whiteboard;
use sketchboard::command::Command;
use sketchboard::config::{Config, ConfigError};
use sketchboard::doc::Point;
use sketchboard::engine::Action;
use sketchboard::persistence::PersistenceBridge;
use sketchboard::persistence::cache::{FileCache, LocalCache};
use sketchboard::persistence::remote::{HttpRemote, RemoteError};
use sketchboard::surface::{RecordingSurface, Surface};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("remote client setup failed: {0}")]
    Remote(#[from] RemoteError),
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    if let Err(e) = run(config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), CliError> {
    config.validate()?;

    let remote = HttpRemote::new(&config.remote_url, config.remote_timeout())?;
    let bridge = PersistenceBridge::new(FileCache::new(config.cache_dir.clone()), Arc::new(remote));
    let (mut board, source) = Whiteboard::open(&config, RecordingSurface::default(), bridge).await;
    println!("opened page {} from {source:?} with {} shapes", config.page_id, board.shapes().len());

    let mut pending_text: Option<Point> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        let unhandled = execute(&mut board, command, &mut pending_text);
        for action in unhandled {
            if let Action::TextInputRequested { at } = action {
                println!("text requested at ({}, {}); answer with `text <content>`", at.x, at.y);
                pending_text = Some(at);
            }
        }
    }

    board.settle().await;
    tracing::info!(count = board.shapes().len(), "session closed");
    Ok(())
}

fn execute<C: LocalCache>(
    board: &mut Whiteboard<RecordingSurface, C>,
    command: Command,
    pending_text: &mut Option<Point>,
) -> Vec<Action> {
    match command {
        Command::Tool(tool) => {
            board.set_tool(tool);
            println!("tool: {tool}");
            Vec::new()
        }
        Command::Add(variant) => board.add_shape(variant),
        Command::Down(pt) => board.pointer_down(pt),
        Command::Move(pt) => board.pointer_move(pt),
        Command::Up(pt) => board.pointer_up(pt),
        Command::Text(content) => match pending_text.take() {
            Some(at) => board.provide_text(at, &content),
            None => {
                eprintln!("no text request is pending");
                Vec::new()
            }
        },
        Command::Resize(width) => {
            board.resize(width);
            let (w, h) = board.surface().physical_size();
            println!("surface: {w}x{h}");
            Vec::new()
        }
        Command::List => {
            for shape in board.shapes() {
                let marker = if board.selected_id() == Some(shape.id.as_str()) { "*" } else { " " };
                println!("{marker} {shape}");
            }
            Vec::new()
        }
        Command::Render => {
            for recorded in board.surface().ops() {
                println!("{:?}", recorded.op);
            }
            Vec::new()
        }
    }
}
