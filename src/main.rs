use std::process::ExitCode;

fn main() -> ExitCode {
    lox::logging::init();
    lox::cli::main_with_args(std::env::args_os()).into()
}
