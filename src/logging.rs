use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

pub const LOG_FILE: &str = "snipdeck.log";

/// Logs to `<dir>/snipdeck.log` so output never lands on the TUI screen.
/// If the file cannot be opened, logging stays off.
pub fn init_file_logging(dir: &Path) {
    let path = dir.join(LOG_FILE);
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();
}

/// Logs to stderr for one-shot commands.
pub fn init_stderr_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .try_init();
}
