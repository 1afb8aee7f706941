//! Tracing initialization for the host process.

use tracing::Level;

/// Initialize the global tracing subscriber.
///
/// Verbose mode lowers the threshold to debug. Safe to call more than
/// once; only the first call installs a subscriber.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_reentrant() {
        init(true);
        init(false);
    }
}
