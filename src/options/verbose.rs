use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

pub fn log(message: &str) {
    if is_verbose() {
        println!("{} {}", "[VERBOSE]".blue(), message);
    }
}

/// Diagnostics for degraded results. Goes to stderr so it never mixes with
/// version lists or URLs printed on stdout.
pub fn warn(message: &str) {
    eprintln!("{} {}", "[WARN]".yellow(), message);
}
