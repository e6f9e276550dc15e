//! The module contains function for displaying CLI splash screen.
//!
//! - Title
//! - Short Description
//! - Version Information

use colored::*;

use crate::cli::colors::TABULA_GREEN;

pub fn splash_screen() {
    show_splash_screen();
    show_version_info();
}

fn show_splash_screen() {
    print!(
        r#"
    {}
        "#,
        r"
    ████████╗ █████╗ ██████╗ ██╗   ██╗██╗      █████╗
    ╚══██╔══╝██╔══██╗██╔══██╗██║   ██║██║     ██╔══██╗
       ██║   ███████║██████╔╝██║   ██║██║     ███████║
       ██║   ██╔══██║██╔══██╗██║   ██║██║     ██╔══██║
       ██║   ██║  ██║██████╔╝╚██████╔╝███████╗██║  ██║
       ╚═╝   ╚═╝  ╚═╝╚═════╝  ╚═════╝ ╚══════╝╚═╝  ╚═╝
        "
        .color(TABULA_GREEN)
    )
}

fn show_version_info() {
    println!(
        r"
    {}

    Version {}
    Authored by {}
        ",
        env!("CARGO_PKG_DESCRIPTION").color(TABULA_GREEN),
        env!("CARGO_PKG_VERSION").color(TABULA_GREEN).italic(),
        env!("CARGO_PKG_AUTHORS").color(TABULA_GREEN).italic(),
    )
}
