mod audio;
mod config;
mod error;
mod input;
mod library;
mod menu;
mod orbit;
mod player;
mod runtime;

fn main() {
    std::process::exit(runtime::run());
}
