//! rtimebook main entrypoint.

use rtimebook::errors::AppError;
use rtimebook::run;
use rtimebook::ui::messages::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    match run() {
        Ok(()) => {}
        Err(AppError::Help(text)) => print!("{}", text),
        Err(AppError::Usage(text)) => {
            eprintln!("{}", text);
            std::process::exit(1);
        }
        Err(e) => {
            error(&e);
            std::process::exit(1);
        }
    }
}
