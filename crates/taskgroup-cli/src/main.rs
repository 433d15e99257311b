use std::process::ExitCode;

fn main() -> ExitCode {
    taskgroup_cli::run()
}
