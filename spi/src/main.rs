use std::process::ExitCode;

use crate::driver::Driver;

mod cli;
mod driver;
mod editor;
mod report;

fn main() -> ExitCode {
    env_logger::init();

    match Driver::new().and_then(Driver::run) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("spi: {err}");
            ExitCode::FAILURE
        }
    }
}
