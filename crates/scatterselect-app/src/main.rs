//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    use scatterselect_app::{App, AppConfig};
    use scatterselect_core::SelectorConfig;
    use std::path::PathBuf;

    env_logger::init();
    log::info!("Starting ScatterSelect");

    let mut config = AppConfig::default();
    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        match SelectorConfig::load(&path) {
            Ok(selector) => config.selector = selector,
            Err(e) => log::warn!("Using default selector config: {}", e),
        }
    }

    if let Err(e) = App::with_config(config).run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
