//! Game state and core simulation types
//!
//! Everything a frame step reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::skill::{SkillKind, SkillState};
use crate::consts::*;
use crate::error::Result;
use crate::settings::ArenaConfig;

/// Which half of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Player paddle
    Left,
    /// AI paddle
    Right,
}

impl Side {
    /// Horizontal direction pointing at this side
    #[inline]
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Points for each side. Signed: the horror skill writes negative noise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: i32,
    pub right: i32,
}

impl Score {
    pub fn get(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Things that happened during a frame, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score changed; the host should refresh its display
    ScoreChanged(Score),
    /// A side won a point
    PointScored(Side),
    /// Ball bounced off a paddle
    PaddleHit(Side),
    /// Ball bounced off the top or bottom wall
    WallBounce,
    SkillStarted(SkillKind),
    SkillEnded(SkillKind),
    /// Bombard wiped the table
    MatchReset,
    /// Horror finished; the game is permanently destroyed
    Destroyed,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    /// Ball at the table centre with a random baseline velocity
    pub fn centered(arena: &ArenaConfig, rng: &mut Pcg32) -> Self {
        Self {
            pos: table_center(arena),
            vel: baseline_velocity(rng),
        }
    }
}

/// Mutable per-match record: positions, velocities, score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub left_paddle_y: f32,
    pub right_paddle_y: f32,
    pub ball: Ball,
    pub score: Score,
}

impl MatchState {
    /// Fresh match: paddles and ball centred, zero score
    pub fn new(arena: &ArenaConfig, rng: &mut Pcg32) -> Self {
        Self {
            left_paddle_y: arena.centered_paddle_y(),
            right_paddle_y: arena.centered_paddle_y(),
            ball: Ball::centered(arena, rng),
            score: Score::default(),
        }
    }

    /// Put the ball back at the centre.
    ///
    /// `toward` picks the horizontal direction; `None` flips a coin.
    pub fn respawn_ball(&mut self, arena: &ArenaConfig, rng: &mut Pcg32, toward: Option<Side>) {
        self.ball.pos = table_center(arena);
        self.ball.vel = match toward {
            Some(side) => Vec2::new(BASE_BALL_SPEED_X * side.direction(), random_serve_y(rng)),
            None => baseline_velocity(rng),
        };
    }

    /// Paddle Y for a side
    pub fn paddle_y(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left_paddle_y,
            Side::Right => self.right_paddle_y,
        }
    }
}

/// Centre of the table
#[inline]
pub fn table_center(arena: &ArenaConfig) -> Vec2 {
    Vec2::new(arena.width / 2.0, arena.height / 2.0)
}

/// -1.0 or 1.0 with equal odds
#[inline]
pub fn random_sign(rng: &mut Pcg32) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Vertical serve component in [-0.8, 0.8)
#[inline]
fn random_serve_y(rng: &mut Pcg32) -> f32 {
    BASE_BALL_SPEED_Y * rng.random_range(-1.0..1.0)
}

/// The baseline random serve: fixed horizontal speed toward a random side
pub fn baseline_velocity(rng: &mut Pcg32) -> Vec2 {
    Vec2::new(BASE_BALL_SPEED_X * random_sign(rng), random_serve_y(rng))
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Table geometry (validated)
    pub arena: ArenaConfig,
    /// Paddles, ball and score
    pub play: MatchState,
    /// Active skill, if any
    pub skill: SkillState,
    /// Frames stepped since start
    pub time_frames: u64,
    /// Simulation RNG (serves, wave sign flips, score noise)
    pub(crate) rng: Pcg32,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the default table
    pub fn new(seed: u64) -> Self {
        Self::build(ArenaConfig::default(), seed)
    }

    /// Create a new game on a custom table, rejecting bad geometry
    pub fn with_arena(arena: ArenaConfig, seed: u64) -> Result<Self> {
        arena.validate()?;
        Ok(Self::build(arena, seed))
    }

    fn build(arena: ArenaConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let play = MatchState::new(&arena, &mut rng);
        Self {
            seed,
            arena,
            play,
            skill: SkillState::Idle,
            time_frames: 0,
            rng,
            events: Vec::new(),
        }
    }

    /// True once the horror skill has run its course
    pub fn is_destroyed(&self) -> bool {
        self.skill.is_destroyed()
    }

    /// Centre the player paddle on a pointer Y. Ignored once destroyed.
    pub fn move_player_to(&mut self, pointer_y: f32) {
        if self.is_destroyed() {
            return;
        }
        self.play.left_paddle_y = self
            .arena
            .clamp_paddle_y(pointer_y - self.arena.paddle_height / 2.0);
    }

    /// Request a skill. Returns false (and changes nothing) while another
    /// skill is running or the game is destroyed.
    pub fn activate_skill(&mut self, kind: SkillKind) -> bool {
        if !self.skill.activate(kind) {
            log::debug!("Skill {:?} ignored while {:?}", kind, self.skill);
            return false;
        }
        log::info!("Skill {:?} activated", kind);
        self.push_event(GameEvent::SkillStarted(kind));
        true
    }

    /// Wipe the match: scores zero, everything centred, no skill
    pub fn reset_match(&mut self) {
        self.play = MatchState::new(&self.arena, &mut self.rng);
        self.skill = SkillState::Idle;
        self.push_event(GameEvent::MatchReset);
        self.push_event(GameEvent::ScoreChanged(self.play.score));
    }

    /// Overwrite the score and notify the host
    pub(crate) fn set_score(&mut self, score: Score) {
        self.play.score = score;
        self.push_event(GameEvent::ScoreChanged(score));
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last call
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
