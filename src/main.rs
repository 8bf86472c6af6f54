use clap::Parser;
use megakeep::cli::Cli;
use megakeep::config::Config;
use megakeep::{report, store, Error};

fn print_error(err: &Error) {
    eprintln!("error: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = Config::load()?;

    let pair = match cli.explicit_pair()? {
        Some(pair) => pair,
        None => store::discover_pair(&config.log_dir, &config.naming)?,
    };

    let path = report::run(&config, &pair)?;
    println!("Report written to {}", path.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        print_error(&e);
        std::process::exit(1);
    }
}
