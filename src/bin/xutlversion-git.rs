use std::process::ExitCode;

use xutlversion::cli::{history_main, Services};

fn main() -> ExitCode {
    history_main(std::env::args_os(), &Services::system()).into()
}
