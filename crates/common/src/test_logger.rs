use std::sync::Once;

static INIT: Once = Once::new();

/// Logger for tests, safe to call from every test
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = simplelog::TermLogger::init(
            log::LevelFilter::Debug,
            simplelog::Config::default(),
            simplelog::TerminalMode::Stderr,
            simplelog::ColorChoice::Auto,
        )
        .inspect_err(|e| eprintln!("failed to init logger: {e}"));
    });
}
