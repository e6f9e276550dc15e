use std::io::{self, BufRead, Write};

use colored::Colorize;
use log::error;

use crate::{
    cli::{
        colors::TABULA_GREEN,
        messages::{error_message, highlight_argument, system_message},
        parsers::CommandParser,
    },
    config::Config,
    error::Result,
    persistence::{DataType, DocumentStore, FileStore, MemoryStore},
    sessions::Session,
    validation,
};

mod colors;
pub mod commands;
mod messages;
pub mod parsers;
mod splash_screen;

pub use commands::{Command, CommandExecutor, CommandResult};
pub use parsers::CliParser;

const DEFAULT_LAST_COMMAND_DELIMITER: &str = "!";

const TABULA_SESSION_COMMANDS_LIST: [(&str, &str); 4] = [
    ("!", "execute the last command, add more to go further back"),
    ("help", "list all available commands"),
    ("history", "list command history for this session"),
    ("quit", "leave the shell; changes are already saved"),
];

const TABULA_ENGINE_COMMANDS_LIST: [(&str, &str); 11] = [
    ("tables", "list all tables"),
    ("create", "create <table> <field>:<type> ..."),
    ("drop", "drop <table>"),
    ("show", "show <table>"),
    ("insert", "insert <table> | <field>=<value> | ..."),
    ("update", "update <table> <index> | <field>=<value> | ..."),
    ("delete", "delete <table> <index>"),
    ("rename", "rename <table> <old field> <new field>"),
    ("diff", "diff <left> <right>; rows of left missing from right"),
    ("save", "write the database to its store"),
    ("reload", "discard the session's database and read the store again"),
];

pub fn open_store(config: &Config, in_memory: bool) -> Box<dyn DocumentStore> {
    //! Pick the store a session will read from and save to.

    if in_memory {
        Box::new(MemoryStore::with_policy(config.policy))
    } else {
        Box::new(FileStore::with_policy(
            config.database_path.clone(),
            config.policy,
        ))
    }
}

pub fn run_client(config: &Config, in_memory: bool, show_splash: bool) -> Result<()> {
    if show_splash {
        splash_screen::splash_screen();
    }

    let mut session = Session::open(open_store(config, in_memory))?;

    println!(
        "{}",
        system_message(
            "info",
            format!(
                "Opened database at {} with {} table(s).",
                highlight_argument(&session.store_description()),
                session.database().list_tables().len()
            )
        )
    );

    start_repl(&mut session);
    Ok(())
}

pub fn show_help() {
    println!();
    println!("{:10} {}", "COMMAND".color(TABULA_GREEN), "DETAILS");
    for (command, details) in TABULA_ENGINE_COMMANDS_LIST {
        println!("{:10} {}", command.color(TABULA_GREEN), details)
    }

    println!();
    println!("{:10} {}", "TYPE".color(TABULA_GREEN), "ACCEPTS");
    for datatype in DataType::ALL {
        println!(
            "{:10} {}",
            datatype.name().color(TABULA_GREEN),
            validation::expected_shape(datatype)
        )
    }

    println!();
    for (command, details) in TABULA_SESSION_COMMANDS_LIST {
        println!("{:10} {}", command.color(TABULA_GREEN), details)
    }
}

fn show_result(result: &CommandResult) {
    if let Some(message) = &result.message {
        println!("{}", system_message("tabula", message.clone()));
    }

    if let Some(table) = &result.table {
        println!("{}", table);
        println!(
            "{}",
            system_message(
                "tabula",
                format!("{} row(s).", result.n_rows_processed.unwrap_or(0))
            )
        );
    }
}

fn start_repl(session: &mut Session) {
    println!(
        "{}",
        system_message(
            "system",
            format!(
                "Use '{}' to leave and '{}' to know all commands available.",
                highlight_argument("quit"),
                highlight_argument("help"),
            ),
        )
    );

    println!(
        "{}",
        system_message(
            "system",
            format!(
                "New session initiated at '{}'.",
                highlight_argument(&session.start_time_string())
            ),
        )
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock();

    loop {
        println!();
        print!("{:6} > ", "tabula".color(TABULA_GREEN).bold());
        if let Err(e) = io::stdout().flush() {
            error!("could not flush stdout: {}", e);
        }

        let mut buffer = String::new();
        match lines.read_line(&mut buffer) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("could not read from stdin: {}", e);
                break;
            }
        }

        if buffer.starts_with(DEFAULT_LAST_COMMAND_DELIMITER) {
            let last = buffer.matches(DEFAULT_LAST_COMMAND_DELIMITER).count();

            match session.get_last_command(last) {
                Some(last_command) => buffer = last_command.to_string(),
                None => {
                    println!(
                        "{}",
                        system_message(
                            "system",
                            format!(
                                "No command {} steps back.",
                                highlight_argument(&last.to_string())
                            ),
                        )
                    );
                    continue;
                }
            }
        }

        let line = buffer.trim();
        if line.is_empty() {
            continue;
        }

        session.add_to_command_history(line);

        match line {
            "history" => {
                for (index, command) in session.command_history(None).iter().enumerate() {
                    println!("{:3} | {}", index, command);
                }
            }
            "help" => show_help(),
            "quit" | "exit" => break,
            command => match CommandParser::parse(command) {
                Ok(command) => match CommandExecutor::new(session).execute(command) {
                    Ok(result) => show_result(&result),
                    Err(e) => println!("{}", error_message("error", e.to_string())),
                },
                Err(message) => println!("{}", message),
            },
        }
    }

    println!("Goodbye!")
}
