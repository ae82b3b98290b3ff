//! Entry point for the Mingle command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = mingle_cli::run() {
        eprintln!("mingle: {err}");
        std::process::exit(1);
    }
}
