//! Level lifecycle: `Playing` → `Destroyed` / `Victory`, prompt visibility and
//! the out-of-bounds grace timer.
//!
//! [`LevelMachine`] is plain data so the rules can be tested without an app.
//! The Bevy [`State<LevelState>`](bevy::prelude::State) is kept in step with
//! it by `simulation::sync_level_state_system`.

use bevy::prelude::States;

/// Outcome of the current attempt.  Exactly one holds at any time.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelState {
    /// Rocket is aiming or in flight.
    #[default]
    Playing,
    /// Rocket hit the planet or stayed off-screen past the grace period.
    Destroyed,
    /// Rocket reached the cheese.
    Victory,
}

/// A player request that changes the level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelCommand {
    /// Replay with the same spawn positions.
    Retry,
    /// Re-roll spawn positions, then replay.
    NewLevel,
    /// Any other key; logged and ignored.
    Unknown(String),
}

/// Records when the rocket first left the visible area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutOfBoundsTimer {
    since: Option<f64>,
}

impl OutOfBoundsTimer {
    /// Feed one bounds sample at session time `now` (seconds).
    ///
    /// Returns `true` once the rocket has been continuously out of view for
    /// longer than `grace`.  Re-entering the view clears the timer.
    pub fn observe(&mut self, now: f64, in_view: bool, grace: f64) -> bool {
        if in_view {
            self.since = None;
            return false;
        }
        let since = *self.since.get_or_insert(now);
        now - since > grace
    }

    pub fn clear(&mut self) {
        self.since = None;
    }

    pub fn started_at(&self) -> Option<f64> {
        self.since
    }
}

/// Level state plus the UI flags the transitions drive.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMachine {
    state: LevelState,
    prompts_visible: bool,
    oob: OutOfBoundsTimer,
    grace_secs: f64,
}

impl LevelMachine {
    pub fn new(grace_secs: f64) -> Self {
        Self {
            state: LevelState::Playing,
            prompts_visible: false,
            oob: OutOfBoundsTimer::default(),
            grace_secs,
        }
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn prompts_visible(&self) -> bool {
        self.prompts_visible
    }

    pub fn out_of_bounds_since(&self) -> Option<f64> {
        self.oob.started_at()
    }

    /// Rocket touched the planet.  `Playing` becomes `Destroyed`; a won level
    /// stays `Victory`.  Returns `true` if the prompts were hidden until now.
    pub fn on_planet_contact(&mut self) -> bool {
        if self.state == LevelState::Playing {
            self.state = LevelState::Destroyed;
        }
        self.show_prompts()
    }

    /// Rocket is within the goal radius.  Returns `true` on the transition
    /// into `Victory`, which only happens from `Playing`.
    pub fn on_goal_reached(&mut self) -> bool {
        if self.state != LevelState::Playing {
            return false;
        }
        self.state = LevelState::Victory;
        true
    }

    /// One bounds sample.  Returns `true` when the grace period has just
    /// expired and the prompts are shown.  Ignored while prompts are up.
    pub fn on_bounds_check(&mut self, now: f64, in_view: bool) -> bool {
        if self.prompts_visible {
            return false;
        }
        if !self.oob.observe(now, in_view, self.grace_secs) {
            return false;
        }
        self.oob.clear();
        if self.state == LevelState::Playing {
            self.state = LevelState::Destroyed;
        }
        self.show_prompts()
    }

    /// Back to `Playing` with hidden prompts and a cleared timer.
    pub fn reset(&mut self) {
        self.state = LevelState::Playing;
        self.prompts_visible = false;
        self.oob.clear();
    }

    fn show_prompts(&mut self) -> bool {
        let newly = !self.prompts_visible;
        self.prompts_visible = true;
        newly
    }
}
