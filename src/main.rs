use std::process::ExitCode;

use xutlversion::cli::{manifest_main, Services};

fn main() -> ExitCode {
    manifest_main(std::env::args_os(), &Services::system()).into()
}
