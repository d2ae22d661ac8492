mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use double_hash_table::Session;
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout().lock(), io::stderr().lock());
    session
        .run(cli.partial_config())
        .context("table session ended with an error")
}
