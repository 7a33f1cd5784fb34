//! Clipboard writes with a native path and a legacy fallback.
//!
//! The native path is the OS clipboard via `arboard`. When no OS clipboard can
//! be reached (headless sessions, SSH), text is handed to the terminal with an
//! OSC 52 escape sequence instead, which most modern terminal emulators honour.
//!
//! On X11 and Wayland the writing process owns the selection: the text is gone
//! once the process exits unless a clipboard manager has taken it over. A write
//! there blocks for up to the configured hold, returning early as soon as
//! another client claims the selection.

use std::fmt;
use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard is available on this host")]
    Unavailable,
    #[error("system clipboard error: {0}")]
    Native(#[from] arboard::Error),
    #[error("failed to write clipboard escape sequence: {0}")]
    Io(#[from] io::Error),
}

pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
#[derive(Debug)]
pub struct SystemClipboard {
    hold: Duration,
}

impl SystemClipboard {
    /// How long a write keeps owning the selection where the OS requires it.
    pub const DEFAULT_HOLD: Duration = Duration::from_secs(2);

    /// `None` when no OS clipboard can be opened from this process.
    pub fn detect() -> Option<Self> {
        match arboard::Clipboard::new() {
            Ok(_) => Some(Self {
                hold: Self::DEFAULT_HOLD,
            }),
            Err(e) => {
                debug!("System clipboard unavailable: {e}");
                None
            }
        }
    }

    /// Ignored on platforms where the OS keeps the text after the writer exits.
    #[must_use]
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_owned_text(
    cb: &mut arboard::Clipboard,
    text: &str,
    hold: Duration,
) -> Result<(), arboard::Error> {
    use std::time::Instant;

    use arboard::SetExtLinux;

    cb.set()
        .wait_until(Instant::now() + hold)
        .text(text.to_owned())
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_owned_text(
    cb: &mut arboard::Clipboard,
    text: &str,
    _hold: Duration,
) -> Result<(), arboard::Error> {
    cb.set_text(text.to_owned())
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut cb = arboard::Clipboard::new()?;
        set_owned_text(&mut cb, text, self.hold)?;
        Ok(())
    }
}

/// Asks the terminal to set the clipboard by writing `ESC ] 52 ; c ; <base64> BEL`.
pub struct Osc52Clipboard<W> {
    out: Mutex<W>,
}

impl Osc52Clipboard<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> fmt::Debug for Osc52Clipboard<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Osc52Clipboard").finish_non_exhaustive()
    }
}

/// The escape sequence that sets the clipboard selection to `text`.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write + Send> ClipboardWriter for Osc52Clipboard<W> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// For hosts with no clipboard at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl ClipboardWriter for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}

/// Native clipboard when the host has one, legacy fallback otherwise.
pub struct Clipboard {
    native: Option<Box<dyn ClipboardWriter>>,
    fallback: Box<dyn ClipboardWriter>,
}

impl Clipboard {
    pub fn new(
        native: Option<Box<dyn ClipboardWriter>>,
        fallback: Box<dyn ClipboardWriter>,
    ) -> Self {
        Self { native, fallback }
    }

    /// OS clipboard if reachable, OSC 52 on stdout otherwise.
    ///
    /// `hold` bounds how long a native write blocks keeping the selection alive.
    pub fn detect(hold: Duration) -> Self {
        let native = SystemClipboard::detect()
            .map(|cb| Box::new(cb.with_hold(hold)) as Box<dyn ClipboardWriter>);
        Self::new(native, Box::new(Osc52Clipboard::stdout()))
    }

    /// Skip the OS clipboard and always use OSC 52 on stdout.
    pub fn osc52_only() -> Self {
        Self::new(None, Box::new(Osc52Clipboard::stdout()))
    }

    /// Every copy fails with [`ClipboardError::Unavailable`].
    pub fn unavailable() -> Self {
        Self::new(None, Box::new(NoClipboard))
    }

    pub fn has_native(&self) -> bool {
        self.native.is_some()
    }

    /// Write `text` through the native clipboard if present, else the fallback.
    ///
    /// A native failure is returned as-is; the fallback is only for hosts that
    /// have no native clipboard at all.
    pub fn copy_to_clipboard(&self, text: &str) -> Result<(), ClipboardError> {
        match &self.native {
            Some(native) => native.write_text(text),
            None => self.fallback.write_text(text),
        }
    }
}

impl fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clipboard")
            .field("native", &self.native.is_some())
            .finish_non_exhaustive()
    }
}
