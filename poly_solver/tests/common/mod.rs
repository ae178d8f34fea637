use std::sync::Once;

static INIT: Once = Once::new();

/// Wires up `env_logger` exactly once per test binary.
pub fn init_log() {
    INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init()
            .ok();
    });
}
