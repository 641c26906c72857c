//! Round state machine for the carrot field.
//!
//! `GameSession` knows nothing about the DOM: every input (button press, item
//! click, countdown tick) returns an outcome value and the web controller turns
//! that into style toggles, sounds and the pop-up banner. This keeps the rules
//! testable on the host.
//!
//! Lifecycle: `Idle` → `Running` → `Finished(Cancel | Win | Lose)` → `Running` ...

pub mod builder;
pub mod field;

pub use builder::{AssetPaths, GameBuilder, GameConfig};
pub use field::{FieldBounds, ItemKind, ItemPlacement};

use tracing::debug;

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Player pressed the stop button.
    Cancel,
    Win,
    Lose,
}

impl StopReason {
    /// Pop-up text shown when the round ends.
    pub fn banner(self) -> &'static str {
        match self {
            StopReason::Cancel => "REPLAY?👻",
            StopReason::Win => "YOU WON",
            StopReason::Lose => "YOU LOST",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::Cancel => "cancel",
            StopReason::Win => "win",
            StopReason::Lose => "lose",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished(StopReason),
}

/// Display values for a freshly started round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundStart {
    pub remaining_sec: u32,
    pub carrots_left: u32,
}

/// Result of the play/stop button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Started(RoundStart),
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No round running; the click does nothing.
    Ignored,
    /// A carrot was pulled and the round goes on.
    Pulled { carrots_left: u32 },
    /// The last carrot was pulled.
    Won,
    /// A bug was clicked.
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Counted { remaining_sec: u32 },
    Finished(StopReason),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    game_duration_sec: u32,
    carrot_count: u32,
    bug_count: u32,
    phase: Phase,
    score: u32,
    remaining_sec: u32,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            game_duration_sec: config.game_duration_sec,
            carrot_count: config.carrot_count,
            bug_count: config.bug_count,
            phase: Phase::Idle,
            score: 0,
            remaining_sec: config.game_duration_sec,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_sec(&self) -> u32 {
        self.remaining_sec
    }

    pub fn carrot_count(&self) -> u32 {
        self.carrot_count
    }

    pub fn bug_count(&self) -> u32 {
        self.bug_count
    }

    pub fn carrots_left(&self) -> u32 {
        self.carrot_count - self.score
    }

    /// Begin a fresh round, whatever state the previous one ended in.
    pub fn start(&mut self) -> RoundStart {
        self.phase = Phase::Running;
        self.score = 0;
        self.remaining_sec = self.game_duration_sec;
        debug!(duration = self.game_duration_sec, carrots = self.carrot_count, "round started");
        RoundStart {
            remaining_sec: self.remaining_sec,
            carrots_left: self.carrots_left(),
        }
    }

    /// Cancel the running round. `None` if nothing was running.
    pub fn stop(&mut self) -> Option<StopReason> {
        if !self.is_running() {
            return None;
        }
        self.phase = Phase::Finished(StopReason::Cancel);
        debug!(score = self.score, "round cancelled");
        Some(StopReason::Cancel)
    }

    pub fn toggle(&mut self) -> Toggle {
        match self.stop() {
            Some(_) => Toggle::Stopped,
            None => Toggle::Started(self.start()),
        }
    }

    pub fn click(&mut self, kind: ItemKind) -> ClickOutcome {
        if !self.is_running() {
            return ClickOutcome::Ignored;
        }
        match kind {
            ItemKind::Carrot => {
                self.score += 1;
                if self.score == self.carrot_count {
                    self.finish(StopReason::Win);
                    ClickOutcome::Won
                } else {
                    ClickOutcome::Pulled {
                        carrots_left: self.carrots_left(),
                    }
                }
            }
            ItemKind::Bug => {
                self.finish(StopReason::Lose);
                ClickOutcome::Lost
            }
        }
    }

    /// One second of countdown. The tick after the display reaches zero decides the round.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        if self.remaining_sec == 0 {
            let reason = if self.score == self.carrot_count {
                StopReason::Win
            } else {
                StopReason::Lose
            };
            self.finish(reason);
            return TickOutcome::Finished(reason);
        }
        self.remaining_sec -= 1;
        TickOutcome::Counted {
            remaining_sec: self.remaining_sec,
        }
    }

    fn finish(&mut self, reason: StopReason) {
        debug!(reason = reason.as_str(), score = self.score, "round finished");
        self.phase = Phase::Finished(reason);
        self.score = 0;
    }
}

/// `m:s` countdown text, unpadded (`65` → `"1:5"`).
pub fn format_timer(sec: u32) -> String {
    format!("{}:{}", sec / 60, sec % 60)
}
