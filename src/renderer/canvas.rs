//! Browser Canvas 2D painter

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::layout::{self, Rect, SEGMENT_RADIUS};
use crate::config::{GameConfig, Palette};
use crate::sim::RenderSnapshot;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    palette: Palette,
    width: u32,
    height: u32,
    cell: u32,
}

impl CanvasRenderer {
    /// Size the canvas to the board and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, config: &GameConfig) -> Result<Self, JsValue> {
        canvas.set_width(config.canvas_width);
        canvas.set_height(config.canvas_height);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            palette: config.palette.clone(),
            width: config.canvas_width,
            height: config.canvas_height,
            cell: config.cell_size,
        })
    }

    /// Draw one frame
    pub fn render(&self, snapshot: &RenderSnapshot, new_record: bool) -> Result<(), JsValue> {
        let (w, h) = (self.width as f64, self.height as f64);
        self.ctx.set_fill_style_str(&self.palette.background);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.draw_grid();
        self.draw_food(snapshot)?;
        self.draw_snake(snapshot);
        self.draw_hud(snapshot)?;
        if let Some(overlay) = layout::overlay(snapshot, new_record) {
            self.draw_overlay(&overlay)?;
        }
        Ok(())
    }

    fn draw_grid(&self) {
        let ctx = &self.ctx;
        let (w, h) = (self.width as f64, self.height as f64);
        ctx.set_stroke_style_str(&self.palette.grid);
        ctx.set_line_width(0.5);
        for x in layout::grid_lines(self.width, self.cell) {
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, h);
            ctx.stroke();
        }
        for y in layout::grid_lines(self.height, self.cell) {
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(w, y);
            ctx.stroke();
        }
    }

    fn draw_food(&self, snapshot: &RenderSnapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (x, y, r) = layout::food_circle(snapshot.food, self.cell as f64);

        let glow = ctx.create_radial_gradient(x, y, 0.0, x, y, r * 2.0)?;
        glow.add_color_stop(0.0, &self.palette.food)?;
        glow.add_color_stop(0.5, &self.palette.food_glow)?;
        glow.add_color_stop(1.0, "transparent")?;
        ctx.set_fill_style_canvas_gradient(&glow);
        ctx.begin_path();
        ctx.arc(x, y, r * 2.0, 0.0, TAU)?;
        ctx.fill();

        ctx.set_fill_style_str(&self.palette.food);
        ctx.begin_path();
        ctx.arc(x, y, r, 0.0, TAU)?;
        ctx.fill();
        Ok(())
    }

    fn draw_snake(&self, snapshot: &RenderSnapshot) {
        let cell = self.cell as f64;
        for (i, &segment) in snapshot.snake_body.iter().enumerate() {
            let color = if i == 0 {
                &self.palette.snake_head
            } else {
                &self.palette.snake_body
            };
            self.ctx.set_fill_style_str(color);
            self.round_rect(layout::segment_rect(segment, cell), SEGMENT_RADIUS);
            self.ctx.fill();
        }

        if let Some(&head) = snapshot.snake_body.first() {
            self.ctx.set_fill_style_str("#ffffff");
            for eye in layout::eye_rects(head, snapshot.head_direction, cell) {
                self.ctx.fill_rect(eye.x, eye.y, eye.w, eye.h);
            }
        }
    }

    /// Rounded rectangle path from quadratic corners
    fn round_rect(&self, r: Rect, radius: f64) {
        let ctx = &self.ctx;
        let (x, y, w, h) = (r.x, r.y, r.w, r.h);
        ctx.begin_path();
        ctx.move_to(x + radius, y);
        ctx.line_to(x + w - radius, y);
        ctx.quadratic_curve_to(x + w, y, x + w, y + radius);
        ctx.line_to(x + w, y + h - radius);
        ctx.quadratic_curve_to(x + w, y + h, x + w - radius, y + h);
        ctx.line_to(x + radius, y + h);
        ctx.quadratic_curve_to(x, y + h, x, y + h - radius);
        ctx.line_to(x, y + radius);
        ctx.quadratic_curve_to(x, y, x + radius, y);
        ctx.close_path();
    }

    fn draw_hud(&self, snapshot: &RenderSnapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_font("bold 16px Arial");
        ctx.set_text_align("left");
        for (i, line) in layout::hud_lines(snapshot).iter().enumerate() {
            let color = if i == 0 {
                &self.palette.text
            } else {
                &self.palette.text_secondary
            };
            ctx.set_fill_style_str(color);
            ctx.fill_text(line, 10.0, 25.0 + 25.0 * i as f64)?;
        }
        Ok(())
    }

    fn draw_overlay(&self, overlay: &layout::Overlay) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (self.width as f64, self.height as f64);

        ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_text_align("center");
        ctx.set_fill_style_str(&self.palette.text);
        ctx.set_font("bold 48px Arial");
        ctx.fill_text(&overlay.title, w / 2.0, h / 2.0 - 20.0)?;

        ctx.set_fill_style_str(&self.palette.text_secondary);
        ctx.set_font("20px Arial");
        ctx.fill_text(&overlay.subtitle, w / 2.0, h / 2.0 + 30.0)?;

        if let Some(hint) = &overlay.hint {
            ctx.set_font("16px Arial");
            ctx.fill_text(hint, w / 2.0, h / 2.0 + 70.0)?;
        }
        Ok(())
    }
}
