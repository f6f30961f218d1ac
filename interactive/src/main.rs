use clap::Parser;

mod app;
mod args;

use app::{App, AppError};
use args::ArgsInteractive;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = <ArgsInteractive as Parser>::parse();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &ArgsInteractive) -> Result<(), AppError> {
    let app = App::new(args)?;

    app.run()
}
