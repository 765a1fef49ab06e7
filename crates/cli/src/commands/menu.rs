use std::io::{BufRead, Write};

use anyhow::Result;
use console::style;
use dialoguer::Input;
use tracing::error;

use crate::commands::{create, delete, update};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    Update,
    Delete,
    Exit,
}

pub fn parse_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Create),
        "2" => Some(MenuChoice::Update),
        "3" => Some(MenuChoice::Delete),
        "4" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Source of the user's answers.
pub trait Answers {
    /// `None` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> Option<String>;
}

/// Interactive prompts on the terminal.
pub struct Terminal;

impl Answers for Terminal {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .ok()
    }
}

/// One answer per line, for piped input.
pub struct Lines<R>(pub R);

impl<R: BufRead> Answers for Lines<R> {
    fn ask(&mut self, _prompt: &str) -> Option<String> {
        let mut line = String::new();
        match self.0.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

fn print_menu(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style("Shopify API Operations:").bold())?;
    writeln!(out, "1. Create Data")?;
    writeln!(out, "2. Update All Products")?;
    writeln!(out, "3. Delete All Data")?;
    writeln!(out, "4. Exit")
}

/// Runs the menu on the terminal, or on stdin lines when no one is attending.
pub async fn run(session: &mut Session) -> Result<()> {
    let mut out = std::io::stdout();
    if console::user_attended() {
        run_with(session, &mut Terminal, &mut out).await
    } else {
        run_with(session, &mut Lines(std::io::stdin().lock()), &mut out).await
    }
}

/// Runs the numbered menu until Exit or end of input. A failed action is
/// logged and the menu is shown again.
pub async fn run_with(
    session: &mut Session,
    answers: &mut impl Answers,
    out: &mut impl Write,
) -> Result<()> {
    loop {
        print_menu(out)?;
        let Some(input) = answers.ask("Enter your choice (1-4)") else {
            break;
        };
        let Some(choice) = parse_choice(&input) else {
            writeln!(out, "{}", style("Invalid choice, please try again.").yellow())?;
            continue;
        };

        let outcome = match choice {
            MenuChoice::Create => create::run(session).await,
            MenuChoice::Update => update::run(session).await,
            MenuChoice::Delete => {
                writeln!(out, "{}", delete::PROMPT)?;
                let confirmed = answers
                    .ask("Type y to confirm [y/N]")
                    .is_some_and(|answer| delete::is_yes(&answer));
                if confirmed {
                    delete::run(session).await.map(|_| ())
                } else {
                    writeln!(out, "Nothing deleted.")?;
                    Ok(())
                }
            }
            MenuChoice::Exit => break,
        };
        if let Err(e) = outcome {
            error!("operation failed: {e:#}");
        }
    }
    writeln!(out, "Exiting...")?;
    Ok(())
}
