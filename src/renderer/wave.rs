//! Wave skill overlay: water wash, rolling wave lines, sparkles, title

use glam::Vec2;

use super::draw::{Color, DrawCmd, Font, Frame, LinearGradient, Paint, Shadow};
use crate::settings::{ArenaConfig, Settings};

const TITLE: &str = "TRALALERO TRALALA!";
const SUBTITLE: &str = "Wave pushes the ball wildly!";

const WAVE_LINES: usize = 8;
/// Horizontal sample step for wave lines
const LINE_STEP: f32 = 8.0;

pub fn paint(frame: &mut Frame, arena: &ArenaConfig, settings: &Settings, anim: u64) {
    let t = anim as f32;
    let (w, h) = (arena.width, arena.height);

    // Diagonal wash with a drifting middle stop
    let wash = LinearGradient {
        from: Vec2::ZERO,
        to: Vec2::new(w, h),
        stops: vec![
            (0.0, Color::Hex("#78e0ff")),
            (0.5 + 0.2 * (t / 30.0).sin(), Color::Hex("#0080ff")),
            (1.0, Color::Hex("#fff")),
        ],
    };
    frame.rect(Vec2::ZERO, Vec2::new(w, h), Paint::Linear(wash), 0.32);

    for i in 0..WAVE_LINES {
        let fi = i as f32;
        let points = (0..)
            .map(|n| n as f32 * LINE_STEP)
            .take_while(|&x| x < w)
            .map(|x| {
                let y = 160.0
                    + 35.0 * fi
                    + (t / 9.0 + x / 60.0 + fi).sin() * 25.0
                    + (x / 40.0 - t / 7.0).sin() * 12.0
                    + (x / 80.0 + t / 5.0).cos() * 8.0;
                Vec2::new(x, y)
            })
            .collect();
        frame.push(DrawCmd::Polyline {
            points,
            color: Color::Hsl(
                180.0 + fi * 25.0 + (t / 20.0).sin() * 30.0,
                100.0,
                65.0 + fi * 3.0,
            ),
            width: 3.0 + fi * 0.8 + (t / 15.0).sin() * 2.0,
            alpha: 0.15 + 0.08 * fi + 0.05 * (t / 12.0).sin(),
        });
    }

    for p in 0..settings.quality.sparkle_particles() {
        let fp = p as f32;
        let x = (t * 3.0 + fp * 30.0).rem_euclid(w);
        let y = 200.0 + (t / 8.0 + fp).sin() * 120.0 + (x / 50.0).cos() * 40.0;
        let radius = (2.0 + (t / 6.0 + fp).sin() * 1.5).max(1.0);
        let color = Color::Hsla(
            190.0 + (fp + t / 10.0).sin() * 60.0,
            100.0,
            85.0,
            0.4 + 0.3 * (t / 7.0 + fp).sin(),
        );
        frame.circle(Vec2::new(x, y), radius, color, 1.0);
    }

    let title_y = 100.0 + 15.0 * (t / 4.0).sin() + 5.0 * (t / 3.0).cos();
    let alpha = (0.9 + 0.1 * (t / 5.0).sin()).min(1.0);
    let title_paint = Paint::Linear(LinearGradient {
        from: Vec2::ZERO,
        to: Vec2::new(w, 0.0),
        stops: vec![
            (0.0, Color::Hex("#1aeaff")),
            (0.3, Color::Hex("#00ffff")),
            (0.6, Color::Hex("#4dfaff")),
            (1.0, Color::Hex("#87ceeb")),
        ],
    });
    frame.text(
        TITLE,
        Vec2::new(w / 2.0, title_y),
        Font::bold(64, "'Comic Sans MS', Arial"),
        title_paint,
        Some(Shadow {
            color: Color::Hex("#1aeaff"),
            blur: 40.0 + 20.0 * (t / 6.0).sin(),
        }),
        alpha,
    );
    frame.text(
        SUBTITLE,
        Vec2::new(w / 2.0, title_y + 50.0),
        Font::bold(36, "'Arial', sans-serif"),
        Color::Hex("#ffffff"),
        Some(Shadow {
            color: Color::Hex("#0080ff"),
            blur: 25.0,
        }),
        alpha,
    );
}
