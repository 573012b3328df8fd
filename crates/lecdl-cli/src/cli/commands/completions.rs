//! `lecdl completions <shell>` – shell completion script.

use clap_complete::Shell;

pub fn run_completions(shell: Shell, cmd: &mut clap::Command) {
    clap_complete::generate(shell, cmd, "lecdl", &mut std::io::stdout());
}
