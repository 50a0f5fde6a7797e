//! Display list types
//!
//! The renderer never touches a canvas directly. It emits a [`Frame`] of
//! [`DrawCmd`]s which a backend replays. Each command carries its own alpha,
//! shadow and transform, so commands are independent of one another.

use std::fmt;

use glam::Vec2;

use super::PaintMode;

/// A CSS color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// `#rgb` / `#rrggbb` literal
    Hex(&'static str),
    Rgba(u8, u8, u8, f32),
    /// Hue in degrees, saturation and lightness in percent
    Hsl(f32, f32, f32),
    Hsla(f32, f32, f32, f32),
}

impl Color {
    pub const WHITE: Color = Color::Hex("#fff");
    pub const BLACK: Color = Color::Hex("#000");
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Hex(hex) => f.write_str(hex),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({r},{g},{b},{a})"),
            Color::Hsl(h, s, l) => write!(f, "hsl({h},{s}%,{l}%)"),
            Color::Hsla(h, s, l, a) => write!(f, "hsla({h},{s}%,{l}%,{a})"),
        }
    }
}

/// Gradient color stop (offset in 0..=1)
pub type Stop = (f32, Color);

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub from: Vec2,
    pub to: Vec2,
    pub stops: Vec<Stop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub stops: Vec<Stop>,
}

/// Fill style
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Bold canvas font
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: u32,
    pub family: &'static str,
}

impl Font {
    pub const fn bold(size: u32, family: &'static str) -> Self {
        Self { size, family }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bold {}px {}", self.size, self.family)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
}

/// Host-provided images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// Character riding the ball during the wave
    Wave,
    /// Bomber plane
    Bombard,
    /// Horror face
    Horror,
}

impl Sprite {
    /// DOM id of the `<img>` holding this sprite
    pub fn element_id(&self) -> &'static str {
        match self {
            Sprite::Wave => "tralalero-img",
            Sprite::Bombard => "bombardilo-img",
            Sprite::Horror => "sahur-img",
        }
    }
}

/// One paint operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole surface to transparent
    Clear,
    Rect {
        pos: Vec2,
        size: Vec2,
        paint: Paint,
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        paint: Paint,
        alpha: f32,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        paint: Paint,
        alpha: f32,
    },
    Polyline {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
        alpha: f32,
    },
    /// Centre-aligned text
    Text {
        text: &'static str,
        pos: Vec2,
        font: Font,
        paint: Paint,
        shadow: Option<Shadow>,
        alpha: f32,
    },
    /// Image drawn at `offset`/`size` in a frame translated to `origin` and
    /// rotated by `rotation`
    Sprite {
        sprite: Sprite,
        origin: Vec2,
        rotation: f32,
        offset: Vec2,
        size: Vec2,
        alpha: f32,
    },
}

/// A full frame ready for a backend
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub mode: PaintMode,
    pub commands: Vec<DrawCmd>,
}

impl Frame {
    pub fn new(mode: PaintMode) -> Self {
        Self {
            mode,
            commands: Vec::with_capacity(128),
        }
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn rect(&mut self, pos: Vec2, size: Vec2, paint: impl Into<Paint>, alpha: f32) {
        self.push(DrawCmd::Rect {
            pos,
            size,
            paint: paint.into(),
            alpha,
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, paint: impl Into<Paint>, alpha: f32) {
        self.push(DrawCmd::Circle {
            center,
            radius,
            paint: paint.into(),
            alpha,
        });
    }

    pub fn text(
        &mut self,
        text: &'static str,
        pos: Vec2,
        font: Font,
        paint: impl Into<Paint>,
        shadow: Option<Shadow>,
        alpha: f32,
    ) {
        self.push(DrawCmd::Text {
            text,
            pos,
            font,
            paint: paint.into(),
            shadow,
            alpha,
        });
    }

    /// Text commands in draw order
    pub fn texts(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(*text),
            _ => None,
        })
    }

    /// Sprites in draw order
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Sprite { sprite, .. } => Some(*sprite),
            _ => None,
        })
    }
}
