//! Interactive loop
//!
//! Lines starting with `:` are REPL commands; everything else is calc
//! source evaluated in the running session. After each evaluated line the
//! top of the stack is shown. Errors are reported and the session carries
//! on with whatever the failed line left behind.

use crate::load_file;
use calc::Session;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
enum Command {
    Quit,
    Stack,
    Words,
    Clear,
    Load(PathBuf),
    Help,
    Unknown(String),
}

impl Command {
    /// `None` when the line is source rather than a command
    fn parse(line: &str) -> Option<Command> {
        let rest = line.strip_prefix(':')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let command = match name {
            "quit" | "q" => Command::Quit,
            "stack" | "s" => Command::Stack,
            "words" | "w" => Command::Words,
            "clear" => Command::Clear,
            "load" | "l" if !arg.is_empty() => Command::Load(PathBuf::from(arg)),
            "help" | "h" => Command::Help,
            _ => Command::Unknown(line.to_string()),
        };
        Some(command)
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum Outcome {
    Continue,
    Quit,
}

/// Main REPL loop
pub(crate) fn run(session: &mut Session) {
    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error initializing readline: {}", e);
            std::process::exit(1);
        }
    };

    let history_file = dirs_history_file();
    if let Some(ref path) = history_file {
        let _ = rl.load_history(path);
    }

    println!("calc REPL (calcr). Type :help for commands, :quit to exit.\n");

    let mut stdout = io::stdout();
    loop {
        match rl.readline("calc> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match handle_line(session, line, &mut stdout) {
                    Ok(Outcome::Continue) => {}
                    Ok(Outcome::Quit) => {
                        println!("Goodbye!");
                        break;
                    }
                    Err(e) => {
                        eprintln!("Error writing output: {}", e);
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }
}

/// Evaluate one input line or run one command, writing the response to `out`
pub(crate) fn handle_line(
    session: &mut Session,
    line: &str,
    out: &mut impl Write,
) -> io::Result<Outcome> {
    let Some(command) = Command::parse(line) else {
        match session.evaluate_line(line) {
            Ok(stack) => {
                if let Some(top) = stack.last() {
                    writeln!(out, "{}", top)?;
                }
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        out.flush()?;
        return Ok(Outcome::Continue);
    };

    match command {
        Command::Quit => return Ok(Outcome::Quit),
        Command::Stack => write_stack(session, out)?,
        Command::Words => write_words(session, out)?,
        Command::Clear => {
            session.clear_stack();
            writeln!(out, "Stack cleared.")?;
        }
        Command::Load(path) => match load_file(session, &path) {
            Ok(()) => writeln!(out, "Loaded {}", path.display())?,
            Err(e) => writeln!(out, "Error: {}", e)?,
        },
        Command::Help => write_help(out)?,
        Command::Unknown(line) => writeln!(
            out,
            "Unknown command: {}. Type :help for available commands.",
            line
        )?,
    }
    out.flush()?;
    Ok(Outcome::Continue)
}

/// Whole stack, bottom first
fn write_stack(session: &Session, out: &mut impl Write) -> io::Result<()> {
    let stack = session.stack();
    if stack.is_empty() {
        return writeln!(out, "(empty)");
    }
    for (depth, value) in stack.iter().rev().enumerate().rev() {
        writeln!(out, "{:>3}: {}", depth, value)?;
    }
    Ok(())
}

fn write_words(session: &Session, out: &mut impl Write) -> io::Result<()> {
    for (name, aliases) in session.words() {
        if aliases.is_empty() {
            writeln!(out, "{}", name)?;
        } else {
            writeln!(out, "{} (aliases: {})", name, aliases.join(" "))?;
        }
    }
    Ok(())
}

fn write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        r#"
calc REPL Commands:
  :quit, :q        Exit the REPL
  :stack, :s       Show the whole stack (0 is the top)
  :words, :w       List every bound word with its aliases
  :clear           Empty the stack
  :load FILE       Evaluate a source file in this session
  :help            Show this help

Usage:
  - Type expressions to evaluate them; the top of the stack is shown
  - The stack and definitions persist between lines
  - Define words with ",name {{ body }} def"

Examples:
  calc> 3 4 add
  7
  calc> ,square {{ dup mul }} def
  calc> [1 2 3] {{ square }} map
  [1, 4, 9]
"#
    )
}

fn dirs_history_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("calcr_history"))
}
