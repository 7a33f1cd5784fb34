//! Host-facing helpers for Knack.
//!
//! Everything here talks to something outside the process or outside
//! synchronous control flow:
//!
//! - **`timing`**: Debounce/throttle wrappers over tokio timers
//! - **`storage`**: Key-value persistence with an explicit fallback policy
//! - **`clipboard`**: Native clipboard with an OSC 52 fallback
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename)

pub mod atomic_write;
pub mod clipboard;
pub mod storage;
pub mod timing;

pub use atomic_write::{atomic_write, recover_bak_file};
pub use clipboard::{
    Clipboard, ClipboardError, ClipboardWriter, NoClipboard, Osc52Clipboard, SystemClipboard,
    osc52_sequence,
};
pub use storage::{
    FileStore, KeyValueStore, MemoryStore, Storage, StorageError, UnavailableStore,
};
pub use timing::{Debouncer, Throttle, sleep};
