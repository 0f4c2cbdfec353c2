//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = boundline_cli::run() {
        eprintln!("boundline: {err}");
        std::process::exit(1);
    }
}
