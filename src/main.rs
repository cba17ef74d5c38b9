mod analysis;
mod ledger;
mod models;
mod run;
mod util;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    match args.len() {
        1 => {
            run::print_usage();
            Ok(())
        }
        2.. => run::as_cli(&args),
        _ => {
            eprintln!("Usage: spendlens <command>");
            Ok(())
        }
    }
}
