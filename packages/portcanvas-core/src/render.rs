use crate::options::BridgeOptions;
use crate::paint::{FillParams, FontSpec, Rect, StrokeParams, TextBaseline, TextParams};
use crate::scene::{Element, RectElement, Scene, TextElement};
use crate::surface::DrawSurface;

/// Paints scenes onto a [`DrawSurface`] in a single pass over the element
/// list. Later elements paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRenderer {
    clear: bool,
    default_font: FontSpec,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::from_options(&BridgeOptions::default())
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &BridgeOptions) -> Self {
        Self {
            clear: options.clear,
            default_font: options.default_font.clone(),
        }
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn with_default_font(mut self, font: FontSpec) -> Self {
        self.default_font = font;
        self
    }

    pub fn clears(&self) -> bool {
        self.clear
    }

    /// Returns the number of elements painted; unsupported elements are not
    /// counted.
    pub fn render<S: DrawSurface>(&self, scene: &Scene, surface: &mut S) -> Result<usize, S::Error> {
        if self.clear {
            surface.clear()?;
        }

        let mut painted = 0;
        for (index, element) in scene.elements.iter().enumerate() {
            match element {
                Element::Rect(rect) => self.paint_rect(rect, surface)?,
                Element::Text(text) => self.paint_text(text, surface)?,
                Element::Unsupported => {
                    tracing::trace!(index, "skipping element with unsupported type");
                    continue;
                }
            }
            painted += 1;
        }

        tracing::debug!(canvas_id = %scene.canvas_id, painted, "scene rendered");
        Ok(painted)
    }

    fn paint_rect<S: DrawSurface>(&self, rect: &RectElement, surface: &mut S) -> Result<(), S::Error> {
        let bounds = Rect::from_parts(rect.position, rect.size);

        // Border goes down first; the fill is painted over its inner half.
        if let Some(border) = &rect.border {
            surface.stroke_rect(
                bounds,
                &StrokeParams {
                    color: &border.color,
                    width: border.width,
                    shadow: None,
                },
            )?;
        }

        surface.fill_rect(
            bounds,
            &FillParams {
                color: &rect.background_color,
                shadow: rect.shadow.as_ref(),
            },
        )
    }

    fn paint_text<S: DrawSurface>(&self, text: &TextElement, surface: &mut S) -> Result<(), S::Error> {
        let font = self.default_font.resolve(text).css();
        surface.fill_text(
            &text.content,
            text.position,
            &TextParams {
                font: &font,
                color: &text.color,
                baseline: TextBaseline::Top,
                shadow: None,
            },
        )
    }
}
