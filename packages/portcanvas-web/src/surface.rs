use crate::error::WebError;
use portcanvas_core::paint::NO_SHADOW_COLOR;
use portcanvas_core::{DrawSurface, FillParams, Point, Rect, Shadow, StrokeParams, TextParams};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`DrawSurface`] over a canvas element's 2D context.
///
/// The context keeps pen state between calls, so every primitive sets all
/// of the state it depends on before drawing.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, WebError> {
        let no_context = || WebError::NoContext {
            canvas_id: canvas.id(),
        };
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(no_context)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| no_context())?;

        Ok(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    fn apply_shadow(&self, shadow: Option<&Shadow>) {
        match shadow {
            Some(shadow) => {
                self.ctx.set_shadow_blur(shadow.blur);
                self.ctx.set_shadow_color(&shadow.color);
                self.ctx.set_shadow_offset_x(shadow.offset_x);
                self.ctx.set_shadow_offset_y(shadow.offset_y);
            }
            None => {
                self.ctx.set_shadow_blur(0.0);
                self.ctx.set_shadow_color(NO_SHADOW_COLOR);
                self.ctx.set_shadow_offset_x(0.0);
                self.ctx.set_shadow_offset_y(0.0);
            }
        }
    }
}

impl DrawSurface for CanvasSurface {
    type Error = WebError;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, params: &StrokeParams<'_>) -> Result<(), Self::Error> {
        self.apply_shadow(params.shadow);
        self.ctx.set_stroke_style_str(params.color);
        self.ctx.set_line_width(params.width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, params: &FillParams<'_>) -> Result<(), Self::Error> {
        self.apply_shadow(params.shadow);
        self.ctx.set_fill_style_str(params.color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        params: &TextParams<'_>,
    ) -> Result<(), Self::Error> {
        self.apply_shadow(params.shadow);
        self.ctx.set_font(params.font);
        self.ctx.set_text_baseline(params.baseline.as_str());
        self.ctx.set_fill_style_str(params.color);
        self.ctx.fill_text(text, at.x, at.y)?;
        Ok(())
    }
}
