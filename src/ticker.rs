//! One-second tick source driving the round countdown.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Sent to the UI once per second while a round is running.
#[derive(Debug, Clone, Copy)]
pub struct Tick;

/// Command sent to the ticker thread.
#[derive(Debug)]
enum TickerCommand {
    /// Start (or restart) emitting ticks, realigned to now
    BeginRound,
    /// Stop emitting ticks without tearing the thread down
    Halt,
    /// Terminate the thread
    Shutdown,
}

/// Emits one `Tick` per second over a channel while a round is active.
///
/// Only one tick generation ever runs: `begin_round` on an already running
/// ticker resets the phase instead of stacking a second schedule, and `halt`
/// stops emission entirely so an expired round costs no further wakeups.
pub struct Ticker {
    /// Sender for commands to the ticker thread
    command_tx: Option<Sender<TickerCommand>>,
    /// Ticker thread handle
    thread_handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            command_tx: None,
            thread_handle: None,
        }
    }

    /// Spawn the ticker thread. It starts halted; call `begin_round` to make
    /// it emit.
    pub fn start_ticking(&mut self, update_tx: Sender<Tick>) {
        // Stop any existing thread first
        self.stop_ticking();

        let (command_tx, command_rx) = mpsc::channel();
        self.command_tx = Some(command_tx);

        let handle = thread::spawn(move || {
            Self::ticker_loop(command_rx, update_tx);
        });

        self.thread_handle = Some(handle);
    }

    /// Ticker loop running in a separate thread.
    fn ticker_loop(command_rx: Receiver<TickerCommand>, update_tx: Sender<Tick>) {
        let check_interval = Duration::from_millis(50);
        let mut running = false;
        let mut next_tick = Instant::now();

        loop {
            // Process all pending commands (non-blocking)
            while let Ok(cmd) = command_rx.try_recv() {
                match cmd {
                    TickerCommand::BeginRound => {
                        running = true;
                        next_tick = Instant::now() + Duration::from_secs(1);
                    }
                    TickerCommand::Halt => {
                        running = false;
                    }
                    TickerCommand::Shutdown => {
                        return;
                    }
                }
            }

            if running && Instant::now() >= next_tick {
                next_tick += Duration::from_secs(1);
                if update_tx.send(Tick).is_err() {
                    // Receiver dropped, nothing left to tick for
                    return;
                }
            }

            thread::sleep(check_interval);
        }
    }

    /// Restart the one-second schedule, phase-aligned to this instant. Any
    /// previously pending tick schedule is discarded.
    pub fn begin_round(&self) {
        if let Some(ref tx) = self.command_tx {
            let _ = tx.send(TickerCommand::BeginRound);
        }
    }

    /// Stop emitting ticks until the next `begin_round`.
    pub fn halt(&self) {
        if let Some(ref tx) = self.command_tx {
            let _ = tx.send(TickerCommand::Halt);
        }
    }

    /// Tear down the ticker thread.
    pub fn stop_ticking(&mut self) {
        if let Some(tx) = self.command_tx.take() {
            let _ = tx.send(TickerCommand::Shutdown);
        }

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop_ticking();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_new_is_idle() {
        let ticker = Ticker::new();
        assert!(ticker.command_tx.is_none());
        assert!(ticker.thread_handle.is_none());
    }

    #[test]
    fn test_ticker_delivers_after_begin_round() {
        let (tx, rx) = mpsc::channel();
        let mut ticker = Ticker::new();
        ticker.start_ticking(tx);
        ticker.begin_round();

        // First tick lands about a second after begin_round.
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        ticker.stop_ticking();
    }

    #[test]
    fn test_stop_ticking_is_idempotent() {
        let (tx, _rx) = mpsc::channel();
        let mut ticker = Ticker::new();
        ticker.start_ticking(tx);
        ticker.stop_ticking();
        ticker.stop_ticking();
        assert!(ticker.command_tx.is_none());
    }
}
