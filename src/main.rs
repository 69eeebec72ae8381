use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match tileview::run(&tileview::Conf::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // One line on stdout, `<operation> error: <diagnostic>`
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}
