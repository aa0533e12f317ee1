mod args;
mod run;

use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args = args::Args::parse().unwrap_or_else(|e| e.exit());
    init_logging(args.verbose);
    match run::run(&args) {
        Ok(summaries) => run::print_summaries(&summaries),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
