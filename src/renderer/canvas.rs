//! 2D canvas backend
//!
//! Replays a [`Frame`] onto a `CanvasRenderingContext2d`. Every command runs
//! between `save`/`restore`, so alpha, shadows and transforms never leak into
//! the next one.

use std::collections::HashMap;
use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, Document, HtmlImageElement};

use super::draw::{DrawCmd, Frame, LinearGradient, Paint, RadialGradient, Shadow, Sprite};

/// Paints display lists onto one canvas
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    sprites: HashMap<Sprite, HtmlImageElement>,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self {
            ctx,
            width,
            height,
            sprites: HashMap::new(),
        }
    }

    /// Look up the sprite `<img>` elements. Missing ones are skipped when drawn.
    pub fn load_sprites(&mut self, document: &Document) {
        for sprite in [Sprite::Wave, Sprite::Bombard, Sprite::Horror] {
            let image = document
                .get_element_by_id(sprite.element_id())
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
            match image {
                Some(image) => {
                    self.sprites.insert(sprite, image);
                }
                None => log::warn!("Sprite image #{} not found", sprite.element_id()),
            }
        }
    }

    pub fn paint(&self, frame: &Frame) -> Result<(), JsValue> {
        for cmd in &frame.commands {
            self.ctx.save();
            let result = self.paint_cmd(cmd);
            self.ctx.restore();
            result?;
        }
        Ok(())
    }

    fn paint_cmd(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear => {
                ctx.clear_rect(0.0, 0.0, self.width, self.height);
            }
            DrawCmd::Rect {
                pos,
                size,
                paint,
                alpha,
            } => {
                self.set_alpha(*alpha);
                self.set_fill(paint)?;
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Circle {
                center,
                radius,
                paint,
                alpha,
            } => {
                self.set_alpha(*alpha);
                self.set_fill(paint)?;
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    (*radius).max(0.0) as f64,
                    0.0,
                    TAU,
                )?;
                ctx.fill();
            }
            DrawCmd::Ellipse {
                center,
                radii,
                rotation,
                paint,
                alpha,
            } => {
                self.set_alpha(*alpha);
                self.set_fill(paint)?;
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x.max(0.0) as f64,
                    radii.y.max(0.0) as f64,
                    *rotation as f64,
                    0.0,
                    TAU,
                )?;
                ctx.fill();
            }
            DrawCmd::Polyline {
                points,
                color,
                width,
                alpha,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                self.set_alpha(*alpha);
                ctx.set_stroke_style_str(&color.to_string());
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.stroke();
            }
            DrawCmd::Text {
                text,
                pos,
                font,
                paint,
                shadow,
                alpha,
            } => {
                self.set_alpha(*alpha);
                self.set_fill(paint)?;
                if let Some(Shadow { color, blur }) = shadow {
                    ctx.set_shadow_color(&color.to_string());
                    ctx.set_shadow_blur((*blur).max(0.0) as f64);
                }
                ctx.set_font(&font.to_string());
                ctx.set_text_align("center");
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
            DrawCmd::Sprite {
                sprite,
                origin,
                rotation,
                offset,
                size,
                alpha,
            } => {
                let Some(image) = self.sprites.get(sprite) else {
                    return Ok(());
                };
                // Not loaded yet
                if !image.complete() || image.natural_width() == 0 {
                    return Ok(());
                }
                self.set_alpha(*alpha);
                ctx.translate(origin.x as f64, origin.y as f64)?;
                ctx.rotate(*rotation as f64)?;
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    offset.x as f64,
                    offset.y as f64,
                    size.x as f64,
                    size.y as f64,
                )?;
            }
        }
        Ok(())
    }

    fn set_alpha(&self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_fill(&self, paint: &Paint) -> Result<(), JsValue> {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_string()),
            Paint::Linear(gradient) => {
                let g = self.linear(gradient)?;
                self.ctx.set_fill_style_canvas_gradient(&g);
            }
            Paint::Radial(gradient) => {
                let g = self.radial(gradient)?;
                self.ctx.set_fill_style_canvas_gradient(&g);
            }
        }
        Ok(())
    }

    fn linear(&self, gradient: &LinearGradient) -> Result<CanvasGradient, JsValue> {
        let LinearGradient { from, to, stops } = gradient;
        let g = self
            .ctx
            .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64);
        for &(offset, color) in stops {
            g.add_color_stop(offset.clamp(0.0, 1.0), &color.to_string())?;
        }
        Ok(g)
    }

    fn radial(&self, gradient: &RadialGradient) -> Result<CanvasGradient, JsValue> {
        let RadialGradient {
            center,
            inner_radius,
            outer_radius,
            stops,
        } = gradient;
        let (x, y) = (center.x as f64, center.y as f64);
        let g = self.ctx.create_radial_gradient(
            x,
            y,
            (*inner_radius).max(0.0) as f64,
            x,
            y,
            (*outer_radius).max(0.0) as f64,
        )?;
        for &(offset, color) in stops {
            g.add_color_stop(offset.clamp(0.0, 1.0), &color.to_string())?;
        }
        Ok(g)
    }
}
