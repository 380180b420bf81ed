use crate::cli::{self, Commands};
use crate::store::TaskStore;
use crate::task::Status;
use std::io::{self, BufRead, ErrorKind, Write};
use tracing::debug;

const MENU: &str = "\
Task Tracker
1. Add task
2. List tasks
3. Update task
4. Delete task
5. Mark task in progress
6. Mark task done
7. Exit";

enum Step {
    Run(Commands),
    Invalid(String),
    Exit,
}

/// Shows the menu and runs selections until `7`/`exit` or end of input.
pub fn run(store: &TaskStore, input: &mut impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
    loop {
        writeln!(out, "\n{MENU}")?;
        let step = match read_step(input, out) {
            Ok(step) => step,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                debug!("Input closed, leaving interactive mode");
                writeln!(out)?;
                break;
            }
            Err(e) => return Err(e.into()),
        };

        match step {
            Step::Run(command) => cli::execute(command, store, out)?,
            Step::Invalid(message) => writeln!(out, "{message}")?,
            Step::Exit => break,
        }
    }
    writeln!(out, "Goodbye!")?;
    Ok(())
}

fn read_step(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<Step> {
    let choice = prompt(input, out, "Enter your choice (1-7): ")?;
    let step = match choice.trim() {
        "1" => Step::Run(Commands::Add {
            description: prompt(input, out, "Task description: ")?,
        }),
        "2" => {
            let status = prompt(input, out, "Status (todo, in-progress, done; blank for all): ")?;
            match status.trim() {
                "" => Step::Run(Commands::List { status: None }),
                token => match token.parse::<Status>() {
                    Ok(status) => Step::Run(Commands::List {
                        status: Some(status),
                    }),
                    Err(e) => Step::Invalid(e.to_string()),
                },
            }
        }
        "3" => match read_id(input, out)? {
            Ok(id) => Step::Run(Commands::Update {
                id,
                description: prompt(input, out, "New description: ")?,
            }),
            Err(step) => step,
        },
        "4" => with_id(input, out, |id| Commands::Delete { id })?,
        "5" => with_id(input, out, |id| Commands::MarkInProgress { id })?,
        "6" => with_id(input, out, |id| Commands::MarkDone { id })?,
        "7" | "exit" => Step::Exit,
        other => Step::Invalid(format!("Invalid choice: {other}")),
    };
    Ok(step)
}

fn with_id(
    input: &mut impl BufRead,
    out: &mut impl Write,
    command: impl FnOnce(u64) -> Commands,
) -> io::Result<Step> {
    Ok(match read_id(input, out)? {
        Ok(id) => Step::Run(command(id)),
        Err(step) => step,
    })
}

fn read_id(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<Result<u64, Step>> {
    let raw = prompt(input, out, "Task ID: ")?;
    Ok(raw
        .trim()
        .parse()
        .map_err(|_| Step::Invalid(format!("Invalid task ID: {}", raw.trim()))))
}

/// Reads one line, without its line ending. End of input is `UnexpectedEof`.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> io::Result<String> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
