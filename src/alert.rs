//! Best-effort alerts when a round expires.

use notify_rust::Notification;
use std::io::{self, Write};
use tracing::warn;

/// Fire the end-of-round alert: a desktop notification plus the terminal
/// bell. Both are best-effort; failures are logged and the visual flash in
/// the UI proceeds regardless.
pub fn round_expired(title: &str) {
    if let Err(e) = Notification::new()
        .summary("Time's up!")
        .body(&format!("The round for \"{}\" is over.", title))
        .show()
    {
        warn!("desktop notification failed: {}", e);
    }

    if let Err(e) = ring_bell() {
        warn!("terminal bell failed: {}", e);
    }
}

fn ring_bell() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(b"\x07")?;
    stdout.flush()
}
