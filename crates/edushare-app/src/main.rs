//! Command line entry point (native).

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() {
    use edushare_app::cli::{self, Command};

    env_logger::init();
    log::info!("Starting EduShare");

    let config = edushare_app::AppConfig::from_env();
    let result = Command::parse(std::env::args().skip(1))
        .and_then(|command| cli::run(&command, &config, &mut std::io::stdout().lock()));

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("{}\n\n{}", e, cli::USAGE);
        std::process::exit(1);
    }
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
