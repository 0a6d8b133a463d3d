//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = fleetgeo_cli::run() {
        eprintln!("fleetgeo: {err}");
        std::process::exit(1);
    }
}
