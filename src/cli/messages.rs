//! General message formatting functions for prettifying the CLI.
//! Includes basic utility functions such as:
//!
//! - Highlight Text (make the text tabula green but not bold)
//! - System message formatting functions that produce the same
//! format messages.
//! - Error message formatting, in amber so failures stand out.

use colored::Colorize;

use crate::cli::colors::{TABULA_AMBER, TABULA_GREEN};

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a piece of text in the tabula green
    //! color to make it obvious.
    //!
    //! Returns a formatted string.

    format!("{}", argument.color(TABULA_GREEN))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Write a system message on the command line, properly
    //! formatted, according to the command line theme.
    //!
    //! Takes in a source name (like 'system') as [`String`] and
    //! the message as a formatted text; output of [`format!`].

    let source_formatted = format!("{:6}", source_name.color(TABULA_GREEN).bold());

    format!("[{}] {}", source_formatted, message)
}

pub fn error_message(source_name: &str, message: String) -> String {
    let source_formatted = format!("{:6}", source_name.color(TABULA_AMBER).bold());

    format!("[{}] {}", source_formatted, message)
}
