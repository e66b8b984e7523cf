//! Headless driver for the tinycube rotation engine.
//!
//! Runs twists through the same animated path a graphical frontend uses, at a
//! fixed synthetic frame rate, then prints the final cubie state as YAML.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    // Initialize logging.
    env_logger::builder().init();
    color_eyre::install()?;

    let args = cli::Args::parse();
    cli::exec(args)
}
