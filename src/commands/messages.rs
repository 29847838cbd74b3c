//! User-facing status lines
//!
//! Logs go to stderr through `env_logger`; these lines are the output a user
//! reads, so they bypass the log level.

pub fn info(msg: impl AsRef<str>) {
    println!("✔ {}", msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    println!("⚠ {}", msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("✖ {}", msg.as_ref());
}
