use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Local, human-readable destination for formatted blocks.
///
/// Each call receives one complete block. Implementations must emit it
/// atomically so blocks from concurrent callers never interleave.
pub trait ConsoleSink: Send + Sync {
    fn write_block(&self, block: &str);
}

/// Writes blocks to stdout, one locked write per block.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutConsole;

impl ConsoleSink for StdoutConsole {
    fn write_block(&self, block: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout must not take the caller down.
        let _ = out.write_all(block.as_bytes()).and_then(|_| out.flush());
    }
}

/// Collects blocks in memory. Handy for tests and for embedding the
/// console output somewhere other than a terminal.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    blocks: Mutex<Vec<String>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every block written so far.
    pub fn blocks(&self) -> Vec<String> {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.blocks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total bytes written.
    pub fn byte_len(&self) -> usize {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(String::len)
            .sum()
    }
}

impl ConsoleSink for MemoryConsole {
    fn write_block(&self, block: &str) {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(block.to_string());
    }
}

/// Discards every block.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentConsole;

impl ConsoleSink for SilentConsole {
    fn write_block(&self, _block: &str) {}
}
