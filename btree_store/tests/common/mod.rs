use std::sync::Once;

use tempfile::NamedTempFile;

static INIT: Once = Once::new();

/// Wires up `env_logger` exactly once per test binary with a
/// `Builder::from_default_env` + file:line formatter.
pub fn init_log() {
    INIT.call_once(|| {
        use env_logger::Builder;
        use std::io::Write;

        let mut builder = Builder::from_default_env();
        builder
            .format_timestamp_secs()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{} - {}] [{}:{}] {}",
                    record.level(),
                    record.target(),
                    record.file().unwrap_or("?"),
                    record.line().unwrap_or(0),
                    record.args()
                )
            })
            .is_test(true)
            .try_init()
            .ok();
    });
}

/// A scratch store file that is removed when the test finishes.
pub fn scratch_path() -> (NamedTempFile, std::path::PathBuf) {
    let file = NamedTempFile::new().expect("create scratch file");
    let path = file.path().to_path_buf();
    // The pager wants to create the file itself at this path.
    std::fs::remove_file(&path).ok();
    (file, path)
}
