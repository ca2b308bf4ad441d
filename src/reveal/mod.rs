//! Progressive reveal of rendered glyph text.
//!
//! A [`RevealScheduler`] hands successive row-aligned prefixes of a
//! [`RevealText`] to a [`RevealObserver`], at most one update per frame and
//! only once enough visible characters have accumulated. Markup never
//! counts towards pacing but is always emitted intact.

mod observer;
mod scheduler;
mod source;

pub use observer::{RevealObserver, TerminalObserver};
pub use scheduler::{
    pace, RevealPacing, RevealPhase, RevealScheduler, RevealState, FRAMES_PER_SECOND,
    FRAME_INTERVAL, VISIBLE_CHARS_PER_FRAME,
};
pub use source::{visible_len, RevealText};
