//! CLI parsing tests.

use super::*;


pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
