use clap::Parser;

use applens::runtime::{boot, cli::Cli, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    boot::init_logging();
    let (analyzer, config) = boot::boot()?;
    run::run(&cli, &analyzer, &config)
}
