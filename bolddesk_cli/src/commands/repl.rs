//! Interactive shell. Each line is parsed with the same clap definition as
//! the command line, so `tickets list --all --format json` works in both.

use std::io::Write;
use std::iter;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{dispatch, Context};
use crate::output::render_error;
use crate::{Cli, Commands};

const PROMPT: &str = "bolddesk> ";

/// What to do with one line of input.
pub enum ReplAction {
    Empty,
    Exit,
    Help,
    /// Output clap produced itself, e.g. `tickets --help`.
    Message(String),
    Invalid(String),
    Command(Box<Cli>),
}

pub fn parse_line(line: &str) -> ReplAction {
    let line = line.trim();
    match line {
        "" => return ReplAction::Empty,
        "exit" | "quit" => return ReplAction::Exit,
        "help" | "?" => return ReplAction::Help,
        _ => {}
    }

    let Some(tokens) = shlex::split(line) else {
        return ReplAction::Invalid("unbalanced quotes".to_string());
    };
    match Cli::try_parse_from(iter::once("bolddesk".to_string()).chain(tokens)) {
        Ok(cli) => ReplAction::Command(Box::new(cli)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                ReplAction::Message(e.to_string())
            }
            _ => ReplAction::Invalid(e.to_string()),
        },
    }
}

/// Flags given on a line override the session's for that line only.
pub fn line_context(session: &Context, cli: &Cli) -> Context {
    Context {
        client: session.client.clone(),
        format: cli.format.unwrap_or(session.format),
        page: cli.page.or(session.page),
        per_page: cli.per_page.or(session.per_page),
    }
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("BoldDesk shell. Type 'help' for commands, 'exit' to leave.");

    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        match parse_line(&line) {
            ReplAction::Empty => {}
            ReplAction::Exit => break,
            ReplAction::Help => {
                println!("{}", Cli::command().render_help());
                println!("Type 'exit' or 'quit' to leave the shell.");
            }
            ReplAction::Message(text) => print!("{}", text),
            ReplAction::Invalid(msg) => eprint!("{}", msg),
            ReplAction::Command(cli) => {
                if matches!(cli.command, Commands::Repl) {
                    eprintln!("Already in the shell.");
                    continue;
                }
                if cli.config.is_some() {
                    eprintln!("--config is ignored inside the shell; restart to switch accounts.");
                }
                let line_ctx = line_context(ctx, &cli);
                if let Err(err) = dispatch(&cli.command, &line_ctx).await {
                    eprintln!("{}", render_error(&err));
                }
            }
        }
    }
    Ok(())
}
