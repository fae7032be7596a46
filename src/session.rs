//! Top-level session controller.
//!
//! Owns the store, the effect driver, and the reply bus. User operations
//! dispatch actions synchronously; collaborator replies are drained on
//! `tick`. The controller also owns the diagnostics quiet-period deadline,
//! the one operation in the session with true cancellation.

use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::kernel::services::adapters::{EffectDriver, SessionPorts};
use crate::kernel::services::bus::{session_bus, SessionBusReceiver, SessionMessage};
use crate::kernel::services::ports::AsyncExecutor;
use crate::kernel::{Action, Effect, Language, SessionState, Store};

/// Quiet period between the last active-pair change and the syntax check.
pub const CHECK_DEBOUNCE: Duration = Duration::from_millis(500);

const MAX_BUS_DRAIN_PER_TICK: usize = 128;

/// Widget-facing capability: answer with whatever completion candidates the
/// session currently holds. Never blocks on network I/O; the widget reads
/// current state, and fresher candidates arrive through `cursor_moved`.
pub trait CompletionSource {
    fn completions(&self) -> Vec<String>;
}

pub struct SessionController {
    store: Store,
    driver: EffectDriver,
    rx: SessionBusReceiver,
    check_debounce: Duration,
    pending_check_deadline: Option<Instant>,
}

impl SessionController {
    /// Wires a fresh session to its collaborators and requests the initial
    /// file listing.
    pub fn new(ports: SessionPorts, executor: Arc<dyn AsyncExecutor>) -> Self {
        let (bus, rx) = session_bus();
        let driver = EffectDriver::new(ports, executor, bus);
        let mut controller = Self {
            store: Store::new(SessionState::new()),
            driver,
            rx,
            check_debounce: CHECK_DEBOUNCE,
            pending_check_deadline: None,
        };
        controller.refresh_files();
        controller
    }

    pub fn with_check_debounce(mut self, window: Duration) -> Self {
        self.check_debounce = window;
        self
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    // ── Session operations ──

    pub fn refresh_files(&mut self) -> bool {
        self.apply_at(Action::RefreshFiles, Instant::now())
    }

    pub fn open_file(&mut self, filename: &str) -> bool {
        self.apply_at(
            Action::OpenFile {
                filename: filename.into(),
            },
            Instant::now(),
        )
    }

    pub fn close_tab(&mut self, filename: &str) -> bool {
        self.apply_at(
            Action::CloseTab {
                filename: filename.into(),
            },
            Instant::now(),
        )
    }

    pub fn set_active_tab(&mut self, filename: &str) -> bool {
        self.apply_at(
            Action::SetActiveTab {
                filename: filename.into(),
            },
            Instant::now(),
        )
    }

    pub fn edit_active_content(&mut self, content: &str) -> bool {
        self.apply_at(
            Action::EditActiveContent {
                content: content.to_string(),
            },
            Instant::now(),
        )
    }

    pub fn set_active_language(&mut self, language: Language) -> bool {
        self.apply_at(Action::SetActiveLanguage { language }, Instant::now())
    }

    pub fn create_file(&mut self, filename: &str) -> bool {
        self.apply_at(
            Action::CreateFile {
                filename: filename.into(),
            },
            Instant::now(),
        )
    }

    pub fn delete_file(&mut self, filename: &str) -> bool {
        self.apply_at(
            Action::DeleteFile {
                filename: filename.into(),
            },
            Instant::now(),
        )
    }

    pub fn save(&mut self) -> bool {
        self.apply_at(Action::Save, Instant::now())
    }

    pub fn cursor_moved(&mut self, offset: usize) -> bool {
        self.apply_at(Action::CursorMoved { offset }, Instant::now())
    }

    pub fn compile(&mut self) -> bool {
        self.apply_at(Action::Compile, Instant::now())
    }

    pub fn generate_code(&mut self, task: &str) -> bool {
        self.apply_at(
            Action::GenerateCode {
                task: task.to_string(),
            },
            Instant::now(),
        )
    }

    pub fn debug_code(&mut self) -> bool {
        self.apply_at(Action::DebugCode, Instant::now())
    }

    // ── Event loop ──

    /// Applies one action at an explicit time. The operations above call
    /// this with `Instant::now()`; tests drive it with a logical clock.
    pub fn apply_at(&mut self, action: Action, now: Instant) -> bool {
        let result = self.store.dispatch(action);
        self.run_effects(result.effects, now);
        result.state_changed
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Drains collaborator replies, then fires the quiet period if it
    /// elapsed. Returns whether visible state changed.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let mut changed = self.pump(now);
        changed |= self.poll_check_debounce(now);
        changed
    }

    pub fn pending_check(&self) -> bool {
        self.pending_check_deadline.is_some()
    }

    fn pump(&mut self, now: Instant) -> bool {
        let mut changed = false;
        let mut drained = 0usize;
        loop {
            if drained >= MAX_BUS_DRAIN_PER_TICK {
                break;
            }
            match self.rx.try_recv() {
                Ok(SessionMessage::Action(action)) => {
                    drained += 1;
                    changed |= self.apply_at(action, now);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    fn poll_check_debounce(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.pending_check_deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 5 {
            tracing::debug!(
                target: "session.check",
                overshoot_ms = overshoot.as_millis() as u64,
                "check debounce overshoot"
            );
        }

        self.pending_check_deadline = None;
        self.apply_at(Action::CheckDebounceElapsed, now)
    }

    fn run_effects(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                Effect::ScheduleCheck => {
                    self.pending_check_deadline = Some(now + self.check_debounce);
                }
                Effect::CancelCheck => {
                    self.pending_check_deadline = None;
                }
                other => self.driver.run(other),
            }
        }
    }
}

impl CompletionSource for SessionController {
    fn completions(&self) -> Vec<String> {
        self.store.state().suggestions.items.clone()
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
