use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout = std::io::stdout();
    match snatch_tools::run(std::env::args_os(), &mut stdout.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(snatch_tools::EXIT_FAILURE)
        }
    }
}
