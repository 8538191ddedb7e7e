#![allow(unsafe_code)]
#![allow(clippy::undocumented_unsafe_blocks)]

mod app;
mod config;
mod error;
mod gfx;

fn main() {
    // Log to stderr, override with `RUST_LOG=debug`
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = app::run() {
        log::error!("{e}");
        std::process::exit(config::INIT_FAILURE_EXIT_CODE);
    }
}
