//! Frame-paced, row-aligned reveal of finished glyph text.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::observer::RevealObserver;
use super::source::RevealText;

/// Visible characters that must accumulate before the observer is updated.
pub const VISIBLE_CHARS_PER_FRAME: usize = 200;

/// Target observer update rate.
pub const FRAMES_PER_SECOND: u32 = 30;

/// Delay before each paced update (1000/30 ms).
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / FRAMES_PER_SECOND as u64);

/// Pacing parameters for a progressive reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPacing {
    /// Visible-character growth since the last update that triggers the next one
    pub threshold: usize,
    /// Suspension before each threshold-triggered update
    pub frame_interval: Duration,
}

impl Default for RevealPacing {
    fn default() -> Self {
        Self {
            threshold: VISIBLE_CHARS_PER_FRAME,
            frame_interval: FRAME_INTERVAL,
        }
    }
}

/// Where a reveal is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Running,
    Complete,
}

/// Snapshot of the active reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    pub full_text: String,
    /// Visible characters shown to the observer so far
    pub visible_len: usize,
    pub phase: RevealPhase,
}

impl RevealState {
    pub fn is_running(&self) -> bool {
        self.phase == RevealPhase::Running
    }
}

/// Walk `text` row by row and call `emit` with row-aligned prefixes.
///
/// Rows are buffered until the visible length has grown by more than
/// `pacing.threshold` since the last update; then the loop sleeps one
/// frame and emits the accumulated prefix. The full text is always emitted
/// last. `emit` receives the prefix and its visible length and can stop the
/// walk by returning `Break`.
///
/// Returns `true` if the walk reached the final emission.
pub async fn pace<F>(text: &RevealText, pacing: &RevealPacing, mut emit: F) -> bool
where
    F: FnMut(&str, usize) -> ControlFlow<()>,
{
    let mut last_visible = 0;
    for rows in 1..=text.row_count() {
        let visible = text.prefix_visible_len(rows);
        if visible - last_visible > pacing.threshold {
            tokio::time::sleep(pacing.frame_interval).await;
            last_visible = visible;
            if emit(text.prefix(rows), visible).is_break() {
                return false;
            }
        }
    }
    emit(text.full_text(), text.visible_len()).is_continue()
}

struct Shared<O> {
    observer: O,
    /// Bumped by every start and clear; a task only writes while its own
    /// generation is current
    generation: u64,
    state: Option<RevealState>,
}

fn lock<O>(shared: &Mutex<Shared<O>>) -> MutexGuard<'_, Shared<O>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives at most one reveal at a time into a single observer.
///
/// Starting a new reveal or clearing cancels the one in flight before
/// returning; a cancelled reveal never reaches the observer again.
pub struct RevealScheduler<O: RevealObserver> {
    shared: Arc<Mutex<Shared<O>>>,
    pacing: RevealPacing,
    task: Option<JoinHandle<()>>,
}

impl<O: RevealObserver> RevealScheduler<O> {
    pub fn new(observer: O) -> Self {
        Self::with_pacing(observer, RevealPacing::default())
    }

    pub fn with_pacing(observer: O, pacing: RevealPacing) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                observer,
                generation: 0,
                state: None,
            })),
            pacing,
            task: None,
        }
    }

    pub fn pacing(&self) -> RevealPacing {
        self.pacing
    }

    /// Reveal progressively when `animate` is set, instantly otherwise.
    pub fn reveal(&mut self, text: RevealText, animate: bool) {
        if animate {
            self.start(text);
        } else {
            self.show(text);
        }
    }

    /// Begin a paced reveal on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn start(&mut self, text: RevealText) {
        let generation = self.begin(&text, RevealPhase::Running);
        let shared = Arc::clone(&self.shared);
        let pacing = self.pacing;
        log::debug!(
            "Starting reveal #{} ({} rows, {} visible chars)",
            generation,
            text.row_count(),
            text.visible_len()
        );

        self.task = Some(tokio::spawn(async move {
            let completed = pace(&text, &pacing, |prefix, visible| {
                let mut guard = lock(&shared);
                if guard.generation != generation {
                    return ControlFlow::Break(());
                }
                guard.observer.update(prefix);
                if let Some(state) = guard.state.as_mut() {
                    state.visible_len = visible;
                }
                ControlFlow::Continue(())
            })
            .await;

            if completed {
                let mut guard = lock(&shared);
                if guard.generation == generation {
                    if let Some(state) = guard.state.as_mut() {
                        state.phase = RevealPhase::Complete;
                    }
                }
            }
        }));
    }

    /// Emit the whole text at once and complete immediately.
    pub fn show(&mut self, text: RevealText) {
        self.begin(&text, RevealPhase::Complete);
        let mut guard = lock(&self.shared);
        guard.observer.update(text.full_text());
        if let Some(state) = guard.state.as_mut() {
            state.visible_len = text.visible_len();
        }
    }

    /// Cancel any reveal in flight and forget its state.
    pub fn clear(&mut self) {
        self.cancel();
        let mut guard = lock(&self.shared);
        guard.generation += 1;
        guard.state = None;
    }

    /// Snapshot of the current reveal, `None` when idle after a clear or
    /// before the first reveal.
    pub fn state(&self) -> Option<RevealState> {
        lock(&self.shared).state.clone()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared)
            .state
            .as_ref()
            .is_some_and(RevealState::is_running)
    }

    /// Wait until the current reveal has finished or been cancelled.
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    log::warn!("Reveal task failed: {}", e);
                }
            }
        }
    }

    /// Run `f` against the observer while no reveal can write to it.
    pub fn with_observer<R>(&self, f: impl FnOnce(&mut O) -> R) -> R {
        f(&mut lock(&self.shared).observer)
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn begin(&mut self, text: &RevealText, phase: RevealPhase) -> u64 {
        self.cancel();
        let mut guard = lock(&self.shared);
        guard.generation += 1;
        guard.state = Some(RevealState {
            full_text: text.full_text().to_string(),
            visible_len: 0,
            phase,
        });
        guard.generation
    }
}

impl<O: RevealObserver> Drop for RevealScheduler<O> {
    fn drop(&mut self) {
        self.cancel();
    }
}
