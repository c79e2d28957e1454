/// How a mutation replaces the payload on disk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Truncate the file to the header and write the new payload in place.
    /// A crash between the two steps leaves an empty payload.
    #[default]
    InPlace,

    /// Write header + payload to a temporary file in the same directory,
    /// fsync it, rename it over the store and fsync the directory.
    /// Crash-atomic and durable on POSIX filesystems; the handle is rebound
    /// to the new file after each write.
    AtomicRename,
}

#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Payload replacement strategy (default: `InPlace`).
    pub write_strategy: WriteStrategy,

    /// fsync after every in-place payload write (default: off).
    /// `AtomicRename` always syncs the temporary file before renaming.
    pub sync_writes: bool,
}

impl StoreOptions {
    pub fn new(write_strategy: WriteStrategy, sync_writes: bool) -> Self {
        Self { write_strategy, sync_writes }
    }

    /// Crash-atomic writes through a temporary file.
    pub fn atomic() -> Self {
        Self { write_strategy: WriteStrategy::AtomicRename, sync_writes: true }
    }

    pub fn with_write_strategy(mut self, write_strategy: WriteStrategy) -> Self {
        self.write_strategy = write_strategy;
        self
    }

    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }
}
