//! Horror overlay shown once the game is destroyed

use glam::Vec2;
use rand::Rng;

use super::draw::{Color, DrawCmd, Font, Frame, Shadow, Sprite};
use crate::settings::{ArenaConfig, Settings};

const TITLE: &str = "GAME DESTROYED!";
const CHANT: &str = "TUNG TUNG TUNG TUNG TUNG TUNG TUNG TUNG TUNG SAHUR";

const FOG_LAYERS: usize = 8;
const FACE_SIZE: Vec2 = Vec2::new(300.0, 340.0);
const RED: Color = Color::Hex("#ff0000");

/// Largest horizontal glitch offset of the title, either way
pub const MAX_GLITCH: f32 = 3.0;

pub fn paint<R: Rng>(
    frame: &mut Frame,
    arena: &ArenaConfig,
    settings: &Settings,
    anim: u64,
    jitter: &mut R,
) {
    let t = anim as f32;
    let (w, h) = (arena.width, arena.height);
    let center = Vec2::new(w / 2.0, h / 2.0);

    frame.rect(Vec2::ZERO, Vec2::new(w, h), Color::BLACK, 0.94);

    // Hue-cycling fog
    for i in 0..FOG_LAYERS {
        let fi = i as f32;
        let fog = center
            + Vec2::new(
                (t / 13.0 + fi).sin() * 130.0,
                (t / 6.0 + fi).cos() * 90.0,
            );
        let hue = (anim * 8 + i as u64 * 30) % 360;
        frame.circle(
            fog,
            220.0 - fi * 20.0 + (t / 4.0 + fi).sin() * 12.0,
            Color::Hsl(hue as f32, 88.0, 36.0),
            0.07 + 0.06 * (t / 5.0 + fi).sin(),
        );
    }

    frame.push(DrawCmd::Sprite {
        sprite: Sprite::Horror,
        origin: center,
        rotation: (t / 10.0).sin() * 0.04,
        offset: -FACE_SIZE / 2.0,
        size: FACE_SIZE,
        alpha: 1.0,
    });

    let glitch = if settings.effective_jitter() && anim % 16 < 8 {
        jitter.random::<f32>() * MAX_GLITCH * 2.0 - MAX_GLITCH
    } else {
        0.0
    };
    let font = Font::bold(68, "'Arial Black', Arial");
    let shadow = Shadow {
        color: if anim % 24 < 12 { RED } else { Color::WHITE },
        blur: 60.0 + 35.0 * (t / 7.0).sin().abs(),
    };
    let title_y = h / 2.0 + FACE_SIZE.y / 2.0 + 38.0;

    frame.text(
        TITLE,
        Vec2::new(w / 2.0 + glitch, title_y),
        font,
        if anim % 32 < 16 { Color::WHITE } else { RED },
        Some(shadow),
        (0.94 + 0.05 * (t / 8.0).sin()).min(1.0),
    );
    if anim % 48 < 24 {
        frame.text(
            TITLE,
            Vec2::new(w / 2.0 - glitch, title_y + 2.0),
            font,
            RED,
            Some(shadow),
            0.3,
        );
    }

    frame.text(
        CHANT,
        Vec2::new(
            w / 2.0,
            h / 2.0 + FACE_SIZE.y / 2.0 + 85.0 + 3.0 * (t / 13.0).sin(),
        ),
        Font::bold(42, "'Arial Black', Arial"),
        Color::WHITE,
        Some(Shadow {
            color: Color::BLACK,
            blur: 15.0 + 8.0 * (t / 9.0).sin(),
        }),
        0.76 + 0.2 * (t / 11.0).cos(),
    );
}
