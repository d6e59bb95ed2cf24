//! End-to-end game scenarios driven through [`GameSession`] alone.
//!
//! No Bevy app is built: each test feeds drag deltas, releases and frame ticks
//! straight into the session and inspects the queued scene effects.
//!
//! Covered scenarios:
//! 1. Crash into the planet from (−300, −100).
//! 2. One launch impulse per attempt.
//! 3. Out-of-bounds timer expiry and cancellation.
//! 4. Victory fires once and swaps the music.
//! 5. New level from `Victory`.
//! 6. The shipped configuration (outline collider, default mass and gravity):
//!    crash, victory, aiming on the exclusion ring, nose-first contact.

use bevy::math::{Rect, Vec2};
use gravity_rocket::config::GameConfig;
use gravity_rocket::director::SpawnConfig;
use gravity_rocket::effects::{MusicTrack, SceneEffect, SceneEntity};
use gravity_rocket::level::{LevelCommand, LevelState};
use gravity_rocket::session::GameSession;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 1.0 / 60.0;

fn wide_view() -> Rect {
    Rect::from_center_size(Vec2::ZERO, Vec2::splat(2000.0))
}

/// Session with a point-like circular rocket at `rocket` and the cheese
/// somewhere it will never reach unless a test puts it in the way.
fn session_at(rocket: Vec2, cheese: Vec2) -> GameSession {
    let config = GameConfig {
        rocket_outline: Vec::new(),
        rocket_collider_radius: 0.5,
        ..GameConfig::default()
    };
    let mut session =
        GameSession::with_spawn(config, StdRng::seed_from_u64(2024), SpawnConfig { rocket, cheese })
            .expect("valid layout");
    session.drain_effects();
    session
}

/// Session with the compiled defaults: outline collider, real mass and gravity.
fn default_session_at(rocket: Vec2, cheese: Vec2) -> GameSession {
    let mut session = GameSession::with_spawn(
        GameConfig::default(),
        StdRng::seed_from_u64(2024),
        SpawnConfig { rocket, cheese },
    )
    .expect("valid layout");
    session.drain_effects();
    session
}

fn explosion_in(effects: &[SceneEffect]) -> Option<Vec2> {
    effects.iter().find_map(|e| match e {
        SceneEffect::Explosion { at } => Some(*at),
        _ => None,
    })
}

/// Frame clock shared by consecutive runs so session time never goes back.
#[derive(Default)]
struct Clock {
    frame: u32,
}

impl Clock {
    /// Tick until `done` holds or `max_frames` pass; returns every effect seen.
    fn run_until(
        &mut self,
        session: &mut GameSession,
        view: Rect,
        max_frames: u32,
        done: impl Fn(&GameSession) -> bool,
    ) -> Vec<SceneEffect> {
        let mut effects = Vec::new();
        for _ in 0..max_frames {
            let now = f64::from(self.frame) * f64::from(DT);
            self.frame += 1;
            session.tick(DT, now, view);
            effects.extend(session.drain_effects());
            if done(session) {
                break;
            }
        }
        effects
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Released without a drag, the rocket falls straight into the planet.
#[test]
fn crash_into_planet_destroys_rocket() {
    let mut session = session_at(Vec2::new(-300.0, -100.0), Vec2::new(400.0, 400.0));
    let mut clock = Clock::default();
    assert!(session.on_release());

    let effects = clock.run_until(&mut session, wide_view(), 1200, |s| {
        s.level_state() == LevelState::Destroyed
    });

    assert_eq!(session.level_state(), LevelState::Destroyed);
    assert!(session.world().rocket().is_none(), "rocket must be removed");
    assert!(!session.registry().rocket);
    assert!(session.prompts_visible());
    assert!(session.registry().prompts_visible());

    let explosion = effects
        .iter()
        .find_map(|e| match e {
            SceneEffect::Explosion { at } => Some(*at),
            _ => None,
        })
        .expect("explosion effect");
    // On the planet surface along the fall line.
    let expected = Vec2::new(-3.0, -1.0).normalize() * 100.0;
    assert!(
        (explosion - expected).length() < 2.0,
        "explosion at {explosion:?}, expected near {expected:?}"
    );
    assert!(effects.contains(&SceneEffect::Detach(SceneEntity::Rocket)));
}

/// After destruction every tick is a no-op.
#[test]
fn ticks_after_crash_change_nothing() {
    let mut session = session_at(Vec2::new(-300.0, -100.0), Vec2::new(400.0, 400.0));
    let mut clock = Clock::default();
    session.on_release();
    clock.run_until(&mut session, wide_view(), 1200, |s| s.world().rocket().is_none());
    let effects = clock.run_until(&mut session, Rect::default(), 300, |_| false);
    assert!(effects.is_empty());
    assert_eq!(session.level_state(), LevelState::Destroyed);
}

#[test]
fn only_first_release_applies_impulse() {
    let mut session = session_at(Vec2::new(-300.0, -100.0), Vec2::new(400.0, 400.0));
    session.on_drag_delta(-50.0, -100.0);
    assert!(session.on_release());
    let velocity = session.world().rocket().expect("alive").velocity;
    assert!(!session.on_release());
    assert_eq!(session.world().rocket().expect("alive").velocity, velocity);

    // Impulse (−dx/5, dy/5) = (10, −20) divided by the rocket mass.
    let mass = session.config().rocket_mass;
    assert!((velocity - Vec2::new(10.0, -20.0) / mass).length() < 1e-3);
}

#[test]
fn retry_rearms_the_launch() {
    let mut session = session_at(Vec2::new(-300.0, -100.0), Vec2::new(400.0, 400.0));
    session.on_drag_delta(10.0, 10.0);
    session.on_release();
    session.handle_command(LevelCommand::Retry).expect("retry");
    assert_eq!(session.aim().state().delta(), Vec2::ZERO);
    assert!(!session.aim().state().has_fired);
    assert_eq!(session.world().rocket_position(), Some(Vec2::new(-300.0, -100.0)));
    assert!(!session.world().field().enabled);
    assert!(session.on_release());
}

/// A rocket parked outside the view trips the timer after the grace period.
#[test]
fn out_of_bounds_shows_prompts_after_grace() {
    let mut session = session_at(Vec2::new(-300.0, -100.0), Vec2::new(400.0, 400.0));
    let mut clock = Clock::default();
    // View that excludes the resting rocket.
    let view = Rect::from_center_size(Vec2::new(500.0, 500.0), Vec2::splat(100.0));

    clock.run_until(&mut session, view, 110, |_| false);
    assert!(!session.prompts_visible(), "still inside the grace period");

    let effects = clock.run_until(&mut session, view, 30, |s| s.prompts_visible());
    assert!(session.prompts_visible());
    assert_eq!(session.level_state(), LevelState::Destroyed);
    // No crash: the rocket stays and nothing explodes.
    assert!(session.world().rocket().is_some());
    assert!(!effects.iter().any(|e| matches!(e, SceneEffect::Explosion { .. })));
}

#[test]
fn returning_to_view_cancels_timer() {
    let mut session = session_at(Vec2::new(-300.0, -100.0), Vec2::new(400.0, 400.0));
    let mut clock = Clock::default();
    let away = Rect::from_center_size(Vec2::new(500.0, 500.0), Vec2::splat(100.0));

    clock.run_until(&mut session, away, 90, |_| false);
    session.tick(DT, 1.6, wide_view());
    assert_eq!(session.level().out_of_bounds_since(), None);

    // Leaving again restarts the clock: 1.9 s later is still fine.
    session.tick(DT, 2.0, away);
    session.tick(DT, 3.9, away);
    assert!(!session.prompts_visible());
    assert_eq!(session.level_state(), LevelState::Playing);
}

/// Cheese placed on the fall line: victory fires exactly once.
#[test]
fn victory_fires_once_and_swaps_music() {
    let mut session = session_at(Vec2::new(-300.0, -100.0), Vec2::new(-250.0, -83.0));
    let mut clock = Clock::default();
    session.on_release();

    let effects = clock.run_until(&mut session, wide_view(), 600, |s| {
        s.level_state() == LevelState::Victory
    });
    assert_eq!(session.level_state(), LevelState::Victory);
    assert!(session.goal().is_none());
    assert!(effects.contains(&SceneEffect::Detach(SceneEntity::Cheese)));
    assert!(effects.contains(&SceneEffect::StopMusic(MusicTrack::Background)));
    assert!(effects.contains(&SceneEffect::PlayMusic(MusicTrack::Victory)));

    // Keep flying: the rocket eventually hits the planet, state stays Victory.
    let later = clock.run_until(&mut session, wide_view(), 1200, |s| s.world().rocket().is_none());
    let victories = effects
        .iter()
        .chain(later.iter())
        .filter(|e| **e == SceneEffect::PlayMusic(MusicTrack::Victory))
        .count();
    assert_eq!(victories, 1);
    assert_eq!(session.level_state(), LevelState::Victory);
    assert!(session.prompts_visible());
    assert!(later.iter().any(|e| matches!(e, SceneEffect::Explosion { .. })));
}

#[test]
fn new_level_from_victory_resets_everything() {
    let mut session = session_at(Vec2::new(-300.0, -100.0), Vec2::new(-250.0, -83.0));
    let mut clock = Clock::default();
    session.on_drag_delta(3.0, 4.0);
    session.on_release();
    clock.run_until(&mut session, wide_view(), 600, |s| {
        s.level_state() == LevelState::Victory
    });
    let old = session.spawn();

    session.handle_command(LevelCommand::NewLevel).expect("new level");
    let effects = session.drain_effects();

    assert_eq!(session.level_state(), LevelState::Playing);
    assert_ne!(session.spawn(), old);
    assert!(session.spawn().rocket.length() >= 150.0);
    assert_eq!(session.goal(), Some(session.spawn().cheese));
    assert_eq!(session.aim().state().delta(), Vec2::ZERO);
    assert!(!session.aim().state().has_fired);
    assert!(!session.prompts_visible());
    assert!(effects.contains(&SceneEffect::StopMusic(MusicTrack::Victory)));
    assert!(effects.contains(&SceneEffect::PlayMusic(MusicTrack::Background)));
    assert!(effects.contains(&SceneEffect::Detach(SceneEntity::VictoryLabel)));
    assert!(effects.contains(&SceneEffect::Attach {
        entity: SceneEntity::Rocket,
        position: session.spawn().rocket,
    }));
    assert_eq!(session.registry().music, Some(MusicTrack::Background));
}

// ── Shipped configuration ─────────────────────────────────────────────────────

/// The outline collider falls nose first and explodes on the surface.
#[test]
fn default_rocket_crashes_into_planet() {
    let mut session = default_session_at(Vec2::new(-300.0, -100.0), Vec2::new(400.0, 400.0));
    let mut clock = Clock::default();
    assert!(session.on_release());

    let effects = clock.run_until(&mut session, wide_view(), 1200, |s| {
        s.level_state() == LevelState::Destroyed
    });

    assert_eq!(session.level_state(), LevelState::Destroyed);
    assert!(session.world().rocket().is_none());
    assert!(session.prompts_visible());
    let explosion = explosion_in(&effects).expect("explosion effect");
    let expected = Vec2::new(-3.0, -1.0).normalize() * session.config().planet_radius;
    assert!(
        (explosion - expected).length() < 3.0,
        "explosion at {explosion:?}, expected near {expected:?}"
    );
}

#[test]
fn default_rocket_reaches_cheese_on_fall_line() {
    let mut session = default_session_at(Vec2::new(-300.0, -100.0), Vec2::new(-250.0, -83.0));
    let mut clock = Clock::default();
    session.on_release();

    let effects = clock.run_until(&mut session, wide_view(), 600, |s| {
        s.level_state() == LevelState::Victory
    });
    assert_eq!(session.level_state(), LevelState::Victory);
    assert!(effects.contains(&SceneEffect::PlayMusic(MusicTrack::Victory)));
    assert!(explosion_in(&effects).is_none(), "cheese comes before the planet");
}

/// Aiming turns the collider in place; a rocket just outside the exclusion
/// ring must never touch the planet while it waits on the pad.
#[test]
fn aiming_on_exclusion_ring_never_touches_planet() {
    let radius = GameConfig::default().spawn_exclusion_radius + 0.5;
    let pad = Vec2::new(-1.0, -1.0).normalize() * radius;
    let mut session = default_session_at(pad, Vec2::new(400.0, 400.0));
    let mut clock = Clock::default();

    let sweep = (0..36).map(|k| Vec2::from_angle(k as f32 * TAU / 36.0) * 100.0);
    for drag in sweep.chain([Vec2::new(100.0, -31.4)]) {
        session.handle_command(LevelCommand::Retry).expect("retry");
        session.on_drag_delta(drag.x, drag.y);
        let effects = clock.run_until(&mut session, wide_view(), 5, |_| false);

        assert!(explosion_in(&effects).is_none(), "drag {drag:?} hit the planet");
        assert_eq!(session.level_state(), LevelState::Playing);
        assert_eq!(session.world().rocket_position(), Some(pad));
    }
}

/// Upright the outline clears the planet; turned nose-down it reaches in.
#[test]
fn outline_turned_into_planet_is_a_contact() {
    let mut session = default_session_at(Vec2::new(0.0, 143.0), Vec2::new(400.0, 400.0));
    let mut clock = Clock::default();

    let idle = clock.run_until(&mut session, wide_view(), 10, |_| false);
    assert!(explosion_in(&idle).is_none(), "upright outline stays clear");
    assert_eq!(session.level_state(), LevelState::Playing);

    // A downward drag aims the nose straight at the planet.
    session.on_drag_delta(0.0, -100.0);
    let effects = clock.run_until(&mut session, wide_view(), 10, |s| {
        s.world().rocket().is_none()
    });
    let explosion = explosion_in(&effects).expect("nose reaches the surface");
    assert!(
        (explosion - Vec2::new(0.0, 98.5)).length() < 1.0,
        "explosion at {explosion:?}"
    );
    assert_eq!(session.level_state(), LevelState::Destroyed);
}
