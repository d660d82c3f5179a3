use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match tilematch::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
