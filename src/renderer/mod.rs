//! Frame rendering
//!
//! [`render`] turns a [`GameState`] into a [`Frame`] display list. It reads
//! the state but never mutates it. Decorative randomness (flash alpha, sparks,
//! title glitch) comes from the caller's `jitter` RNG so the simulation RNG
//! stream stays untouched.

pub mod bombard;
pub mod draw;
pub mod horror;
pub mod table;
pub mod wave;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use draw::{Color, DrawCmd, Font, Frame, Paint, Shadow, Sprite};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{GameState, SkillState};

/// Which presentation a frame uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaintMode {
    /// Plain table (also used while horror builds up)
    Table,
    /// Wave overlay with the ball riding it
    Wave,
    /// Bombard overlay on top of the table
    Bombard,
    /// Horror screen only
    Destroyed,
}

impl PaintMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaintMode::Table => "table",
            PaintMode::Wave => "wave",
            PaintMode::Bombard => "bombard",
            PaintMode::Destroyed => "destroyed",
        }
    }
}

/// Presentation for a skill state. Destroyed wins over everything.
pub fn paint_mode(skill: &SkillState) -> PaintMode {
    if skill.is_destroyed() {
        PaintMode::Destroyed
    } else if skill.driving_wave().is_some() {
        PaintMode::Wave
    } else if matches!(skill, SkillState::Bombard { .. }) {
        PaintMode::Bombard
    } else {
        PaintMode::Table
    }
}

/// Build the display list for the current state
pub fn render<R: Rng>(state: &GameState, settings: &Settings, jitter: &mut R) -> Frame {
    let mode = paint_mode(&state.skill);
    let anim = state.skill.frame();
    let arena = &state.arena;

    let mut frame = Frame::new(mode);
    frame.push(DrawCmd::Clear);

    match mode {
        PaintMode::Table => {
            table::background(&mut frame, arena);
            table::pieces(&mut frame, state);
        }
        // Overlays are translucent over the cleared canvas, not over black
        PaintMode::Wave => {
            wave::paint(&mut frame, arena, settings, anim);
            table::net(&mut frame, arena);
            table::paddles(&mut frame, state);
            if let Some(ride) = state.skill.driving_wave() {
                table::wave_ball(&mut frame, state, ride);
            }
        }
        PaintMode::Bombard => {
            bombard::paint(&mut frame, arena, settings, anim, jitter);
            table::pieces(&mut frame, state);
        }
        PaintMode::Destroyed => {
            horror::paint(&mut frame, arena, settings, anim, jitter);
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FrameInput, SkillKind, WaveSkill, tick};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn jitter() -> Pcg32 {
        Pcg32::seed_from_u64(99)
    }

    fn run(state: &mut GameState, frames: u32) {
        for _ in 0..frames {
            tick(state, &FrameInput::default());
        }
    }

    fn count_polylines(frame: &Frame) -> usize {
        frame
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Polyline { .. }))
            .count()
    }

    #[test]
    fn test_paint_mode_priority() {
        assert_eq!(paint_mode(&SkillState::Idle), PaintMode::Table);
        assert_eq!(
            paint_mode(&SkillState::Wave(WaveSkill {
                frame: 5,
                phase: 1.0,
                driving: true,
            })),
            PaintMode::Wave
        );
        // A broken wave falls back to the table
        assert_eq!(
            paint_mode(&SkillState::Wave(WaveSkill {
                frame: 5,
                phase: 1.0,
                driving: false,
            })),
            PaintMode::Table
        );
        assert_eq!(paint_mode(&SkillState::Bombard { frame: 3 }), PaintMode::Bombard);
        assert_eq!(paint_mode(&SkillState::Horror { frame: 3 }), PaintMode::Table);
        assert_eq!(
            paint_mode(&SkillState::Destroyed { frame: 0 }),
            PaintMode::Destroyed
        );
    }

    #[test]
    fn test_table_frame() {
        let state = GameState::new(1);
        let frame = render(&state, &Settings::default(), &mut jitter());

        assert_eq!(frame.mode, PaintMode::Table);
        assert_eq!(frame.commands[0], DrawCmd::Clear);
        // 640 / 30 rounded up
        assert_eq!(count_polylines(&frame), 22);
        assert!(frame.commands.iter().any(|cmd| matches!(
            cmd,
            DrawCmd::Rect { paint: Paint::Solid(c), .. } if *c == table::LEFT_PADDLE
        )));
        assert!(frame.commands.iter().any(|cmd| matches!(
            cmd,
            DrawCmd::Rect { paint: Paint::Solid(c), .. } if *c == table::RIGHT_PADDLE
        )));
        assert_eq!(frame.texts().count(), 0);
        assert_eq!(frame.sprites().count(), 0);
    }

    #[test]
    fn test_render_does_not_touch_state() {
        let mut state = GameState::new(4);
        state.activate_skill(SkillKind::Bombard);
        run(&mut state, 80);
        let before = state.clone();
        let _ = render(&state, &Settings::default(), &mut jitter());
        assert_eq!(state.play, before.play);
        assert_eq!(state.skill, before.skill);
    }

    #[test]
    fn test_render_deterministic_per_jitter_seed() {
        let mut state = GameState::new(4);
        state.activate_skill(SkillKind::Bombard);
        run(&mut state, 90);
        let settings = Settings::default();

        let a = render(&state, &settings, &mut jitter());
        let b = render(&state, &settings, &mut jitter());
        assert_eq!(a, b);
    }

    #[test]
    fn test_wave_frame() {
        let mut state = GameState::new(8);
        state.activate_skill(SkillKind::Wave);
        run(&mut state, 1);
        let frame = render(&state, &Settings::default(), &mut jitter());

        assert_eq!(frame.mode, PaintMode::Wave);
        assert_eq!(
            frame.texts().collect::<Vec<_>>(),
            ["TRALALERO TRALALA!", "Wave pushes the ball wildly!"]
        );
        assert_eq!(frame.sprites().collect::<Vec<_>>(), [Sprite::Wave]);
        assert!(frame.commands.iter().any(|cmd| matches!(
            cmd,
            DrawCmd::Circle { paint: Paint::Solid(c), .. } if *c == table::WAVE_BALL
        )));
    }

    #[test]
    fn test_bombard_frame() {
        let mut state = GameState::new(8);
        state.activate_skill(SkillKind::Bombard);
        run(&mut state, 50);
        let frame = render(&state, &Settings::default(), &mut jitter());

        assert_eq!(frame.mode, PaintMode::Bombard);
        assert_eq!(frame.sprites().collect::<Vec<_>>(), [Sprite::Bombard]);
        assert!(frame.texts().any(|t| t == "BOMBARDIRO CROCODILO!!"));
    }

    fn has_black_fill(frame: &Frame) -> bool {
        frame.commands.iter().any(|cmd| matches!(
            cmd,
            DrawCmd::Rect { paint: Paint::Solid(c), .. } if *c == Color::BLACK
        ))
    }

    #[test]
    fn test_overlays_skip_black_table_fill() {
        let settings = Settings::default();
        let mut state = GameState::new(8);
        assert!(has_black_fill(&render(&state, &settings, &mut jitter())));

        state.activate_skill(SkillKind::Wave);
        run(&mut state, 1);
        let frame = render(&state, &settings, &mut jitter());
        assert_eq!(frame.mode, PaintMode::Wave);
        assert!(!has_black_fill(&frame));

        state.skill = SkillState::Bombard { frame: 10 };
        let frame = render(&state, &settings, &mut jitter());
        assert_eq!(frame.mode, PaintMode::Bombard);
        assert!(!has_black_fill(&frame));
    }

    #[test]
    fn test_horror_renders_plain_table() {
        let mut state = GameState::new(8);
        state.activate_skill(SkillKind::Horror);
        run(&mut state, 100);
        let frame = render(&state, &Settings::default(), &mut jitter());

        assert_eq!(frame.mode, PaintMode::Table);
        assert_eq!(frame.sprites().count(), 0);
        assert_eq!(frame.texts().count(), 0);
    }

    #[test]
    fn test_destroyed_frame() {
        let mut state = GameState::new(8);
        state.skill = SkillState::Destroyed { frame: 3 };
        let frame = render(&state, &Settings::default(), &mut jitter());

        assert_eq!(frame.mode, PaintMode::Destroyed);
        assert_eq!(frame.sprites().collect::<Vec<_>>(), [Sprite::Horror]);
        let texts: Vec<_> = frame.texts().collect();
        assert_eq!(texts[0], "GAME DESTROYED!");
        assert!(texts.contains(&"TUNG TUNG TUNG TUNG TUNG TUNG TUNG TUNG TUNG SAHUR"));
        // No table pieces underneath
        assert_eq!(count_polylines(&frame), 0);
    }

    #[test]
    fn test_reduced_motion_skips_flash_and_glitch() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };

        let mut state = GameState::new(8);
        state.skill = SkillState::Bombard { frame: 50 };
        let frame = render(&state, &settings, &mut jitter());
        let flash = Color::Hex("#ffffcf");
        assert!(!frame.commands.iter().any(|cmd| matches!(
            cmd,
            DrawCmd::Rect { paint: Paint::Solid(c), .. } if *c == flash
        )));

        state.skill = SkillState::Destroyed { frame: 2 };
        let frame = render(&state, &settings, &mut jitter());
        let title_x = frame.commands.iter().find_map(|cmd| match cmd {
            DrawCmd::Text { text, pos, .. } if *text == "GAME DESTROYED!" => Some(pos.x),
            _ => None,
        });
        assert_eq!(title_x, Some(state.arena.width / 2.0));
    }

    #[test]
    fn test_flash_with_motion() {
        let mut state = GameState::new(8);
        state.skill = SkillState::Bombard { frame: 50 };
        let frame = render(&state, &Settings::default(), &mut jitter());
        let flash = Color::Hex("#ffffcf");
        assert!(frame.commands.iter().any(|cmd| matches!(
            cmd,
            DrawCmd::Rect { paint: Paint::Solid(c), .. } if *c == flash
        )));
    }
}
