//! Bombard skill overlay: sky, clouds, bomber fly-by, explosions, title

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::draw::{Color, DrawCmd, Font, Frame, LinearGradient, Paint, RadialGradient, Shadow, Sprite};
use crate::settings::{ArenaConfig, Settings};

const TITLE: &str = "BOMBARDIRO CROCODILO!!";
const SUBTITLE: &str = "Opponent's score becomes ZERO!";

const BOMBS: usize = 7;
const BOMB_RADIUS: f32 = 19.0;
const PLANE_SIZE: Vec2 = Vec2::new(340.0, 200.0);
const BLAST_MAX_RADIUS: f32 = 400.0;
/// Explosion sparks start flying after this frame
const SPARKS_AFTER: f32 = 70.0;

pub fn paint<R: Rng>(
    frame: &mut Frame,
    arena: &ArenaConfig,
    settings: &Settings,
    anim: u64,
    jitter: &mut R,
) {
    let t = anim as f32;
    let (w, h) = (arena.width, arena.height);

    let sky = LinearGradient {
        from: Vec2::ZERO,
        to: Vec2::new(0.0, h),
        stops: vec![
            (0.0, Color::Hex("#87ceeb")),
            (0.5, Color::Hex("#fffbe7")),
            (1.0, Color::Hex("#aac8e7")),
        ],
    };
    frame.rect(Vec2::ZERO, Vec2::new(w, h), Paint::Linear(sky), 0.85);

    clouds(frame, w, t, settings.quality.cloud_count());

    // Flash near the end of every second
    if settings.effective_jitter() && anim % 60 > 46 {
        let alpha = 0.32 + jitter.random::<f32>() * 0.18;
        frame.rect(Vec2::ZERO, Vec2::new(w, h), Color::Hex("#ffffcf"), alpha);
    }

    let plane = Vec2::new(-220.0 + t * 8.0, 110.0 + (t / 8.0).sin() * 10.0);
    frame.push(DrawCmd::Sprite {
        sprite: Sprite::Bombard,
        origin: plane,
        rotation: (t / 20.0).sin() * 0.04,
        offset: Vec2::ZERO,
        size: PLANE_SIZE,
        alpha: 1.0,
    });

    for b in 0..BOMBS {
        let fb = b as f32;
        if t > 22.0 + fb * 3.0 {
            let fall = ((t - 18.0 - fb * 4.0) * 9.0).max(0.0);
            let bomb = plane + Vec2::new(170.0 + fb * 24.0, 130.0 + fall);
            frame.circle(bomb, BOMB_RADIUS, Color::Hex("#222"), 1.0);
        }
        if t > 42.0 + fb * 4.0 {
            let radius = ((t - 42.0 - fb * 4.0) * 15.0).min(BLAST_MAX_RADIUS);
            let center = Vec2::new(w - 130.0 - fb * 40.0, h - 80.0 - fb * 22.0);
            let blast = RadialGradient {
                center,
                inner_radius: 28.0,
                outer_radius: radius,
                stops: vec![
                    (0.0, Color::Hex("#fffbe7")),
                    (0.13, Color::Hex("#ffe157")),
                    (0.3, Color::Hex("#ff5d00")),
                    (0.6, Color::Hex("#c00800")),
                    (1.0, Color::Hex("#000")),
                ],
            };
            frame.circle(center, radius, Paint::Radial(blast), 0.92 - fb * 0.08);
        }
    }

    if t > SPARKS_AFTER {
        let origin = Vec2::new(w - 180.0, h - 100.0);
        let reach = (t - SPARKS_AFTER) * 8.0;
        for _ in 0..settings.quality.explosion_particles() {
            let angle = jitter.random::<f32>() * TAU;
            let dist = reach * jitter.random::<f32>();
            let radius = 7.0 + jitter.random::<f32>() * 6.0;
            let green = (120.0 + jitter.random::<f32>() * 110.0) as u8;
            let alpha = jitter.random::<f32>() * 0.5;
            frame.circle(
                origin + Vec2::from_angle(angle) * dist,
                radius,
                Color::Rgba(255, green, 0, alpha),
                1.0,
            );
        }
    }

    frame.text(
        TITLE,
        Vec2::new(w / 2.0, h / 2.0 - 70.0),
        Font::bold(72, "Impact"),
        Color::Hex("#ff2e00"),
        Some(Shadow {
            color: Color::Hex("#ffed44"),
            blur: 58.0 + 15.0 * (t / 8.0).sin(),
        }),
        0.99,
    );
    frame.text(
        SUBTITLE,
        Vec2::new(w / 2.0, h / 2.0 - 17.0),
        Font::bold(42, "'Arial Black', Arial"),
        Color::WHITE,
        Some(Shadow {
            color: Color::Hex("#ff5500"),
            blur: 20.0 + 10.0 * (t / 5.0).cos(),
        }),
        (0.95 + 0.05 * (t / 4.0).sin()).min(1.0),
    );
}

/// Slowly drifting, breathing clouds
fn clouds(frame: &mut Frame, width: f32, t: f32, count: usize) {
    for i in 0..count {
        let fi = i as f32;
        let x = (fi * 65.0 + t * 8.0 + (t / 15.0 + fi).sin() * 20.0).rem_euclid(width);
        let y = 50.0 + (t / 6.0 + fi).sin() * 18.0 + fi * 5.0 + (t / 12.0 + fi * 0.3).cos() * 8.0;
        let radii = Vec2::new(
            55.0 + (i % 4) as f32 * 18.0 + 8.0 * (t / 20.0 + fi).sin(),
            25.0 + (i % 3) as f32 * 7.0 + 4.0 * (t / 18.0 + fi).cos(),
        );
        let color = if i % 5 == 0 {
            Color::WHITE
        } else {
            Color::Hex("#f0f8ff")
        };
        frame.push(DrawCmd::Ellipse {
            center: Vec2::new(x, y),
            radii,
            rotation: (t / 25.0 + fi).sin() * 0.2,
            paint: Paint::Solid(color),
            alpha: 0.12 + (i % 4) as f32 * 0.08 + 0.03 * (t / 10.0 + fi).sin(),
        });
    }
}
