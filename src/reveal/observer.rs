//! Reveal observers.

use std::io::Write;

/// Receives successive prefixes of the revealed text.
///
/// Called from the reveal task, possibly many times per second. Each call
/// carries the whole text revealed so far, not a delta.
pub trait RevealObserver: Send + 'static {
    fn update(&mut self, text: &str);
}

impl<F> RevealObserver for F
where
    F: FnMut(&str) + Send + 'static,
{
    fn update(&mut self, text: &str) {
        self(text)
    }
}

/// Streams a reveal to a terminal-like writer.
///
/// Emissions within one reveal extend each other, so only the new suffix is
/// written. An emission that does not extend the previous one starts a
/// fresh block on a new line.
pub struct TerminalObserver<W: Write + Send + 'static> {
    out: W,
    shown: String,
}

impl<W: Write + Send + 'static> TerminalObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: String::new(),
        }
    }

    /// Everything written for the current reveal.
    pub fn shown(&self) -> &str {
        &self.shown
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_update(&mut self, text: &str) -> std::io::Result<()> {
        if let Some(suffix) = text.strip_prefix(self.shown.as_str()) {
            self.out.write_all(suffix.as_bytes())?;
        } else {
            self.out.write_all(b"\n")?;
            self.out.write_all(text.as_bytes())?;
        }
        self.out.flush()?;
        self.shown.clear();
        self.shown.push_str(text);
        Ok(())
    }
}

impl TerminalObserver<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send + 'static> RevealObserver for TerminalObserver<W> {
    fn update(&mut self, text: &str) {
        if let Err(e) = self.write_update(text) {
            log::warn!("Failed to write reveal output: {}", e);
        }
    }
}
