use clap::CommandFactory;
use clap_complete::{generate, Shell};

use super::CommandResult;
use crate::Cli;

pub fn run(shell: Shell) -> CommandResult {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "mundane", &mut std::io::stdout());
    Ok(())
}
