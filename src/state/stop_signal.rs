use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Exit status used when a repeated interrupt aborts the process
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// What a received interrupt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Finish the current item, then release the browser and write output
    Stop,

    /// Give up immediately
    Exit,
}

/// Shared flag raised when the user asks the crawl to stop
///
/// Clones share the same flag. The crawler polls it between pages and
/// between items, never in the middle of one.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    requested: Arc<AtomicBool>,
    interrupts: Arc<AtomicU32>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop
    pub fn request_stop(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Registers one user interrupt
    ///
    /// The first interrupt requests a graceful stop; any later one asks
    /// for an immediate exit.
    pub fn interrupt(&self) -> Interrupt {
        self.request_stop();
        if self.interrupts.fetch_add(1, Ordering::SeqCst) == 0 {
            Interrupt::Stop
        } else {
            Interrupt::Exit
        }
    }

    /// Handles Ctrl-C for the rest of the run
    ///
    /// Spawns a background task on the current Tokio runtime. The first
    /// Ctrl-C raises the flag; a second one exits the process without
    /// writing output.
    pub fn listen_for_ctrl_c(&self) {
        let signal = self.clone();
        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for Ctrl-C: {}", e);
                    return;
                }

                match signal.interrupt() {
                    Interrupt::Stop => tracing::warn!(
                        "Manual stop requested, finishing after the current item (Ctrl-C again to quit now)"
                    ),
                    Interrupt::Exit => {
                        tracing::error!("Interrupted again, exiting without writing output");
                        std::process::exit(INTERRUPTED_EXIT_CODE);
                    }
                }
            }
        });
    }
}
