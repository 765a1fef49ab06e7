use std::io::BufRead;

use anyhow::Result;
use clap::Args;
use dialoguer::Confirm;
use tracing::{info, warn};

use storeseed_admin::cleanup::{self, CleanupReport};
use storeseed_core::SavedState;

use crate::progress;
use crate::session::Session;

pub const PROMPT: &str = "Delete every order, product, collection and customer in the store?";

#[derive(Args)]
pub struct DeleteArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn command(args: DeleteArgs, session: &mut Session) -> Result<()> {
    if !args.yes && !confirm()? {
        println!("Nothing deleted.");
        return Ok(());
    }
    run(session).await?;
    Ok(())
}

/// Asks before anything is deleted. Without a terminal the answer is read
/// as a line from stdin; only `y` or `yes` confirms.
pub fn confirm() -> Result<bool> {
    if console::user_attended() {
        let answer = Confirm::new().with_prompt(PROMPT).default(false).interact()?;
        return Ok(answer);
    }
    println!("{PROMPT} [y/N]");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(is_yes(&line))
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Empties the store, then clears the save file even when the store was
/// already empty.
pub async fn run(session: &mut Session) -> Result<CleanupReport> {
    let spinner = progress::create_spinner("Deleting all records...");
    let result = cleanup::delete_all(&session.client).await;
    spinner.finish_and_clear();
    let report = result?;

    session.save.clear().await?;
    session.state = SavedState::new();

    for sweep in &report.sweeps {
        println!(
            "  {:<20} {} deleted, {} failed",
            sweep.kind.plural(),
            sweep.deleted.len(),
            sweep.failed.len()
        );
    }
    if report.is_clean() {
        info!(deleted = report.deleted(), "Store emptied");
    } else {
        warn!(
            failed = report.failed(),
            "some records could not be deleted and remain in the store"
        );
    }
    Ok(report)
}
