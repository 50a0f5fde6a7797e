//! Timed skill effects
//!
//! At most one skill runs at a time. Each skill owns a frame counter that
//! starts at 0 on activation and is bumped at the top of every frame, so the
//! first frame a skill sees is frame 1.
//!
//! The horror skill ends in [`SkillState::Destroyed`], which nothing leaves.

use std::str::FromStr;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::step_ball;
use super::state::{GameEvent, GameState, Score, Side, baseline_velocity, random_sign};
use crate::error::PongError;

/// Wave skill window (5 seconds at 60 fps)
pub const WAVE_DURATION_FRAMES: u32 = 300;
/// Phase advance per wave frame
pub const WAVE_PHASE_STEP: f32 = 0.21;
/// Extra phase on a left paddle hit during the wave
pub const WAVE_LEFT_HIT_JUMP: f32 = 0.28;
/// Extra phase on a right paddle hit during the wave
pub const WAVE_RIGHT_HIT_JUMP: f32 = 0.31;

/// Frame at which bombard zeroes the right-side score
pub const BOMBARD_ZERO_FRAME: u32 = 100;
/// Bombard resets the match on the first frame past this one
pub const BOMBARD_DURATION_FRAMES: u32 = 330;

/// Horror destroys the game on this frame (8 seconds at 60 fps)
pub const HORROR_DURATION_FRAMES: u32 = 480;
/// Horror scrambles the score every this many frames
pub const HORROR_SCRAMBLE_EVERY: u32 = 3;
/// Once destroyed, the score is scrambled every this many frames
pub const DESTROYED_SCRAMBLE_EVERY: u64 = 2;

/// Bounds of the scrambled score (upper bound exclusive)
pub const CHAOS_SCORE_MIN: i32 = -999_999;
pub const CHAOS_SCORE_MAX: i32 = 999_999;

/// Selectable skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    /// Erratic, phase-driven ball velocity
    Wave,
    /// Zeroes the right score, then resets the match
    Bombard,
    /// Score noise, then permanent destruction
    Horror,
}

impl SkillKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillKind::Wave => "wave",
            SkillKind::Bombard => "bombard",
            SkillKind::Horror => "horror",
        }
    }
}

impl FromStr for SkillKind {
    type Err = PongError;

    /// Accepts the skill names and their character aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wave" | "tralalero" => Ok(SkillKind::Wave),
            "bombard" | "bombardilo" => Ok(SkillKind::Bombard),
            "horror" | "sahur" => Ok(SkillKind::Horror),
            _ => Err(PongError::UnknownSkill(s.to_string())),
        }
    }
}

/// Wave skill progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveSkill {
    pub frame: u32,
    /// Phase accumulator driving the ball velocity
    pub phase: f32,
    /// Whether the wave still owns the ball. Cleared when a point is scored.
    pub driving: bool,
}

/// Skill state machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum SkillState {
    #[default]
    Idle,
    Wave(WaveSkill),
    Bombard {
        frame: u32,
    },
    Horror {
        frame: u32,
    },
    /// Terminal: gameplay is over for this session
    Destroyed {
        frame: u64,
    },
}

impl SkillState {
    /// Start `kind` if nothing is running. Returns false otherwise.
    pub fn activate(&mut self, kind: SkillKind) -> bool {
        if self.is_locked() {
            return false;
        }
        *self = match kind {
            SkillKind::Wave => SkillState::Wave(WaveSkill::default()),
            SkillKind::Bombard => SkillState::Bombard { frame: 0 },
            SkillKind::Horror => SkillState::Horror { frame: 0 },
        };
        true
    }

    /// Any skill running, or the game destroyed
    #[inline]
    pub fn is_locked(&self) -> bool {
        !matches!(self, SkillState::Idle)
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        matches!(self, SkillState::Destroyed { .. })
    }

    /// The running skill, if any
    pub fn kind(&self) -> Option<SkillKind> {
        match self {
            SkillState::Wave(_) => Some(SkillKind::Wave),
            SkillState::Bombard { .. } => Some(SkillKind::Bombard),
            SkillState::Horror { .. } => Some(SkillKind::Horror),
            SkillState::Idle | SkillState::Destroyed { .. } => None,
        }
    }

    /// Frames since the current state began (drives overlay animation)
    pub fn frame(&self) -> u64 {
        match *self {
            SkillState::Idle => 0,
            SkillState::Wave(wave) => wave.frame as u64,
            SkillState::Bombard { frame } | SkillState::Horror { frame } => frame as u64,
            SkillState::Destroyed { frame } => frame,
        }
    }

    /// Wave progress while the wave owns the ball
    pub fn driving_wave(&self) -> Option<&WaveSkill> {
        match self {
            SkillState::Wave(wave) if wave.driving => Some(wave),
            _ => None,
        }
    }
}

/// Who moves the ball this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallControl {
    /// Normal physics and AI
    Physics,
    /// The wave skill drives the ball
    Wave,
    /// Nothing moves
    Frozen,
}

/// Advance the skill clock one frame and apply its timed effects
pub fn advance(state: &mut GameState) -> BallControl {
    match state.skill {
        SkillState::Idle => BallControl::Physics,
        SkillState::Wave(wave) => advance_wave(state, wave),
        SkillState::Bombard { frame } => advance_bombard(state, frame + 1),
        SkillState::Horror { frame } => advance_horror(state, frame + 1),
        SkillState::Destroyed { frame } => {
            let frame = frame + 1;
            state.skill = SkillState::Destroyed { frame };
            if frame % DESTROYED_SCRAMBLE_EVERY == 0 {
                let score = chaos_score(&mut state.rng);
                state.set_score(score);
            }
            BallControl::Frozen
        }
    }
}

fn advance_wave(state: &mut GameState, mut wave: WaveSkill) -> BallControl {
    wave.frame += 1;
    if wave.frame == 1 {
        wave.driving = true;
        wave.phase = 0.0;
    }

    if wave.frame > WAVE_DURATION_FRAMES {
        state.skill = SkillState::Idle;
        state.play.ball.vel = baseline_velocity(&mut state.rng);
        state.push_event(GameEvent::SkillEnded(SkillKind::Wave));
        log::info!("Wave skill ended");
        return BallControl::Frozen;
    }

    state.skill = SkillState::Wave(wave);
    if wave.driving {
        BallControl::Wave
    } else {
        BallControl::Frozen
    }
}

fn advance_bombard(state: &mut GameState, frame: u32) -> BallControl {
    state.skill = SkillState::Bombard { frame };

    // Always the right side: there is no notion of who cast the skill
    if frame == BOMBARD_ZERO_FRAME {
        let score = Score {
            right: 0,
            ..state.play.score
        };
        state.set_score(score);
    }

    if frame > BOMBARD_DURATION_FRAMES {
        state.reset_match();
        state.push_event(GameEvent::SkillEnded(SkillKind::Bombard));
        log::info!("Bombard skill ended, match reset");
    }
    BallControl::Frozen
}

fn advance_horror(state: &mut GameState, frame: u32) -> BallControl {
    state.skill = SkillState::Horror { frame };

    if frame % HORROR_SCRAMBLE_EVERY == 0 {
        let score = chaos_score(&mut state.rng);
        state.set_score(score);
    }

    if frame >= HORROR_DURATION_FRAMES {
        state.skill = SkillState::Destroyed { frame: 0 };
        state.push_event(GameEvent::SkillEnded(SkillKind::Horror));
        state.push_event(GameEvent::Destroyed);
        log::info!("Horror skill complete, game destroyed");
    }
    BallControl::Frozen
}

/// One wave-driven ball step.
///
/// Recomputes velocity from the phase, runs the normal ball step, then
/// applies paddle phase jumps. A point ends the drive for the rest of the
/// window.
pub fn drive_wave(state: &mut GameState) {
    let SkillState::Wave(wave) = &mut state.skill else {
        return;
    };
    wave.phase += WAVE_PHASE_STEP;
    let phase = wave.phase;

    let speed = 7.5 + 1.8 * (phase / 2.0).sin();
    let sign = random_sign(&mut state.rng);
    state.play.ball.vel = Vec2::new(
        speed * sign,
        phase.sin() * 6.2 + (phase * 0.7).cos() * 3.8,
    );

    let step = step_ball(state);

    if let SkillState::Wave(wave) = &mut state.skill {
        match step.paddle {
            Some(Side::Left) => wave.phase += WAVE_LEFT_HIT_JUMP,
            Some(Side::Right) => wave.phase += WAVE_RIGHT_HIT_JUMP,
            None => {}
        }
        if step.scored.is_some() {
            wave.driving = false;
            log::debug!("Wave broken by a point on frame {}", wave.frame);
        }
    }
}

/// Independent random scores in [-999999, 999999)
pub fn chaos_score(rng: &mut Pcg32) -> Score {
    Score {
        left: rng.random_range(CHAOS_SCORE_MIN..CHAOS_SCORE_MAX),
        right: rng.random_range(CHAOS_SCORE_MIN..CHAOS_SCORE_MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BASE_BALL_SPEED_X, BASE_BALL_SPEED_Y};
    use crate::sim::state::table_center;
    use crate::sim::tick::{FrameInput, tick};

    fn run(state: &mut GameState, frames: u32) {
        let input = FrameInput::default();
        for _ in 0..frames {
            tick(state, &input);
        }
    }

    #[test]
    fn test_activation_sets_frame_zero() {
        let mut state = GameState::new(3);
        assert!(state.activate_skill(SkillKind::Bombard));
        assert_eq!(state.skill, SkillState::Bombard { frame: 0 });
        assert!(state.events().contains(&GameEvent::SkillStarted(SkillKind::Bombard)));
    }

    #[test]
    fn test_activation_rejected_while_locked() {
        let mut state = GameState::new(3);
        assert!(state.activate_skill(SkillKind::Wave));
        run(&mut state, 10);
        let before = state.skill;

        assert!(!state.activate_skill(SkillKind::Horror));
        assert!(!state.activate_skill(SkillKind::Wave));
        assert_eq!(state.skill, before);
    }

    #[test]
    fn test_skill_names_parse() {
        assert_eq!("wave".parse::<SkillKind>().unwrap(), SkillKind::Wave);
        assert_eq!("Tralalero".parse::<SkillKind>().unwrap(), SkillKind::Wave);
        assert_eq!("bombardilo".parse::<SkillKind>().unwrap(), SkillKind::Bombard);
        assert_eq!(" SAHUR ".parse::<SkillKind>().unwrap(), SkillKind::Horror);
        assert!(matches!(
            "laser".parse::<SkillKind>(),
            Err(PongError::UnknownSkill(name)) if name == "laser"
        ));
        assert_eq!(SkillKind::Horror.as_str(), "horror");
    }

    #[test]
    fn test_wave_drives_ball_fast() {
        let mut state = GameState::new(11);
        state.activate_skill(SkillKind::Wave);
        run(&mut state, 1);

        let wave = state.skill.driving_wave().copied().unwrap();
        assert_eq!(wave.frame, 1);
        assert!((wave.phase - WAVE_PHASE_STEP).abs() < 1e-6);
        // Wave speed is at least 7.5 - 1.8
        assert!(state.play.ball.vel.x.abs() >= 5.7 - 1e-4);
    }

    #[test]
    fn test_wave_ends_after_window() {
        let mut state = GameState::new(11);
        state.activate_skill(SkillKind::Wave);
        run(&mut state, WAVE_DURATION_FRAMES);
        assert!(matches!(state.skill, SkillState::Wave(w) if w.frame == WAVE_DURATION_FRAMES));

        state.drain_events();
        run(&mut state, 1);
        assert_eq!(state.skill, SkillState::Idle);
        assert!(state.events().contains(&GameEvent::SkillEnded(SkillKind::Wave)));
        assert_eq!(state.play.ball.vel.x.abs(), BASE_BALL_SPEED_X);
        assert!(state.play.ball.vel.y.abs() <= BASE_BALL_SPEED_Y);

        // Physics owns the ball again
        let before = state.play.ball.pos;
        run(&mut state, 1);
        assert_ne!(state.play.ball.pos, before);
        assert!(state.activate_skill(SkillKind::Bombard));
    }

    #[test]
    fn test_wave_paddle_hit_jumps_phase() {
        let mut state = GameState::new(2);
        let arena = state.arena;
        state.activate_skill(SkillKind::Wave);
        run(&mut state, 1);

        // Ball just in front of the AI paddle. The wave picks a random
        // horizontal sign, so try seeds until one drives it rightward.
        state.play.right_paddle_y = 0.0;
        state.play.ball.pos = Vec2::new(arena.right_paddle_x() - 4.0, 20.0);
        let phase_before = state.skill.driving_wave().unwrap().phase;

        let mut hit = None;
        for seed in 0..64 {
            let mut trial = state.clone();
            trial.rng = rand::SeedableRng::seed_from_u64(seed);
            drive_wave(&mut trial);
            if trial.events().contains(&GameEvent::PaddleHit(Side::Right)) {
                hit = Some(trial);
                break;
            }
        }
        let trial = hit.expect("some seed drives the ball into the paddle");
        let phase_after = trial.skill.driving_wave().unwrap().phase;
        assert!(
            (phase_after - (phase_before + WAVE_PHASE_STEP + WAVE_RIGHT_HIT_JUMP)).abs() < 1e-5
        );
        assert!(trial.play.ball.vel.x <= 0.0);
    }

    #[test]
    fn test_wave_point_parks_ball_until_window_closes() {
        let mut state = GameState::new(4);
        let arena = state.arena;
        state.activate_skill(SkillKind::Wave);
        run(&mut state, 1);

        // Ball at the left edge with the paddle out of the way
        state.play.left_paddle_y = arena.max_paddle_y();
        let mut scored = None;
        for seed in 0..64 {
            let mut trial = state.clone();
            trial.rng = rand::SeedableRng::seed_from_u64(seed);
            trial.play.ball.pos = Vec2::new(arena.ball_radius + 1.0, 60.0);
            drive_wave(&mut trial);
            if trial.play.score.right == 1 {
                scored = Some(trial);
                break;
            }
        }
        let mut trial = scored.expect("some seed drives the ball out on the left");
        assert!(trial.skill.driving_wave().is_none());
        assert!(matches!(trial.skill, SkillState::Wave(_)));

        let parked = trial.play.ball.pos;
        run(&mut trial, 10);
        assert_eq!(trial.play.ball.pos, parked);
    }

    #[test]
    fn test_bombard_zeroes_right_score_at_frame_100() {
        let mut state = GameState::new(8);
        state.play.score = Score { left: 7, right: 5 };
        state.activate_skill(SkillKind::Bombard);

        run(&mut state, BOMBARD_ZERO_FRAME - 1);
        assert_eq!(state.play.score, Score { left: 7, right: 5 });

        run(&mut state, 1);
        assert_eq!(state.skill, SkillState::Bombard { frame: BOMBARD_ZERO_FRAME });
        assert_eq!(state.play.score, Score { left: 7, right: 0 });
    }

    #[test]
    fn test_bombard_resets_match_after_window() {
        let mut state = GameState::new(8);
        state.play.score = Score { left: 7, right: 5 };
        state.play.left_paddle_y = 0.0;
        state.play.right_paddle_y = 10.0;
        state.play.ball.pos = Vec2::new(100.0, 50.0);
        state.activate_skill(SkillKind::Bombard);

        run(&mut state, BOMBARD_DURATION_FRAMES);
        assert_eq!(state.play.score.left, 7);
        assert!(state.skill.is_locked());

        run(&mut state, 1);
        assert_eq!(state.skill, SkillState::Idle);
        assert_eq!(state.play.score, Score::default());
        assert_eq!(state.play.left_paddle_y, state.arena.centered_paddle_y());
        assert_eq!(state.play.right_paddle_y, state.arena.centered_paddle_y());
        assert_eq!(state.play.ball.pos, table_center(&state.arena));
        assert!(state.events().contains(&GameEvent::MatchReset));
    }

    #[test]
    fn test_bombard_freezes_ball() {
        let mut state = GameState::new(8);
        state.activate_skill(SkillKind::Bombard);
        let ball = state.play.ball;
        let ai = state.play.right_paddle_y;
        run(&mut state, 50);
        assert_eq!(state.play.ball, ball);
        assert_eq!(state.play.right_paddle_y, ai);
    }

    #[test]
    fn test_horror_scrambles_every_third_frame() {
        let mut state = GameState::new(21);
        state.activate_skill(SkillKind::Horror);

        run(&mut state, 2);
        assert_eq!(state.play.score, Score::default());

        state.drain_events();
        run(&mut state, 1);
        let changed = state
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ScoreChanged(_)))
            .count();
        assert_eq!(changed, 1);

        for _ in 0..60 {
            run(&mut state, 1);
            let score = state.play.score;
            for value in [score.left, score.right] {
                assert!((CHAOS_SCORE_MIN..CHAOS_SCORE_MAX).contains(&value));
            }
        }
    }

    #[test]
    fn test_horror_destroys_at_frame_480() {
        let mut state = GameState::new(21);
        state.activate_skill(SkillKind::Horror);

        run(&mut state, HORROR_DURATION_FRAMES - 1);
        assert!(!state.is_destroyed());

        run(&mut state, 1);
        assert!(state.is_destroyed());
        assert!(state.events().contains(&GameEvent::Destroyed));

        // Terminal: nothing gets out
        for kind in [SkillKind::Wave, SkillKind::Bombard, SkillKind::Horror] {
            assert!(!state.activate_skill(kind));
        }
        run(&mut state, 500);
        assert!(state.is_destroyed());
    }

    #[test]
    fn test_destroyed_ignores_pointer_and_freezes_play() {
        let mut state = GameState::new(21);
        state.activate_skill(SkillKind::Horror);
        run(&mut state, HORROR_DURATION_FRAMES);

        let paddle = state.play.left_paddle_y;
        let ai = state.play.right_paddle_y;
        let ball = state.play.ball;
        state.move_player_to(0.0);
        tick(
            &mut state,
            &FrameInput {
                pointer_y: Some(600.0),
                skill: Some(SkillKind::Wave),
            },
        );
        run(&mut state, 30);

        assert_eq!(state.play.left_paddle_y, paddle);
        assert_eq!(state.play.right_paddle_y, ai);
        assert_eq!(state.play.ball, ball);
    }

    #[test]
    fn test_destroyed_scrambles_every_second_frame() {
        let mut state = GameState::new(21);
        state.activate_skill(SkillKind::Horror);
        run(&mut state, HORROR_DURATION_FRAMES);
        state.drain_events();

        run(&mut state, 1);
        assert_eq!(state.skill, SkillState::Destroyed { frame: 1 });
        assert!(state.events().is_empty());

        run(&mut state, 1);
        assert_eq!(state.skill, SkillState::Destroyed { frame: 2 });
        assert_eq!(state.events().len(), 1);
    }
}
