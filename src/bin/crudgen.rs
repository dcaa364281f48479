use clap::Parser;
use crudgen::cli::{run_cli, Cli};
use crudgen::logging::{init_logging_with_config, LogConfig};

fn main() {
    if let Err(err) = init_logging_with_config(&LogConfig::from_env()) {
        eprintln!("warning: {err:#}");
    }

    let cli = Cli::parse();
    if let Err(err) = run_cli(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
