use crate::paint::{FillParams, Rect, StrokeParams, TextBaseline, TextParams};
use crate::scene::{Point, Shadow};
use serde::Serialize;
use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

/// A 2D drawing target with stateless primitives.
///
/// Implementations must apply every field of the params they are given,
/// including resetting the shadow when `shadow` is `None`.
pub trait DrawSurface {
    type Error;

    /// Clears the whole surface.
    fn clear(&mut self) -> Result<(), Self::Error>;

    fn stroke_rect(&mut self, rect: Rect, params: &StrokeParams<'_>) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, rect: Rect, params: &FillParams<'_>) -> Result<(), Self::Error>;

    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        params: &TextParams<'_>,
    ) -> Result<(), Self::Error>;
}

/// One primitive as issued to a [`RecordingSurface`].
///
/// `shadow: None` records that the call ran with the shadow reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCall {
    Clear {
        width: f64,
        height: f64,
    },
    #[serde(rename_all = "camelCase")]
    StrokeRect {
        rect: Rect,
        color: String,
        line_width: f64,
        shadow: Option<Shadow>,
    },
    FillRect {
        rect: Rect,
        color: String,
        shadow: Option<Shadow>,
    },
    FillText {
        text: String,
        at: Point,
        color: String,
        font: String,
        baseline: TextBaseline,
        shadow: Option<Shadow>,
    },
}

/// Surface that records draw calls instead of rasterizing them.
///
/// Clones share the same call log, so a host can hand out surfaces while a
/// test keeps a handle for inspection.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    calls: Rc<RefCell<Vec<DrawCall>>>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.borrow().clone()
    }

    pub fn take_calls(&self) -> Vec<DrawCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    /// True when both handles record into the same log, i.e. they stand for
    /// the same canvas.
    pub fn shares_log_with(&self, other: &RecordingSurface) -> bool {
        Rc::ptr_eq(&self.calls, &other.calls)
    }

    fn push(&self, call: DrawCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        // Browser default canvas size.
        Self::new(300.0, 150.0)
    }
}

impl DrawSurface for RecordingSurface {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.push(DrawCall::Clear {
            width: self.width,
            height: self.height,
        });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, params: &StrokeParams<'_>) -> Result<(), Self::Error> {
        self.push(DrawCall::StrokeRect {
            rect,
            color: params.color.to_string(),
            line_width: params.width,
            shadow: params.shadow.cloned(),
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, params: &FillParams<'_>) -> Result<(), Self::Error> {
        self.push(DrawCall::FillRect {
            rect,
            color: params.color.to_string(),
            shadow: params.shadow.cloned(),
        });
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        params: &TextParams<'_>,
    ) -> Result<(), Self::Error> {
        self.push(DrawCall::FillText {
            text: text.to_string(),
            at,
            color: params.color.to_string(),
            font: params.font.to_string(),
            baseline: params.baseline,
            shadow: params.shadow.cloned(),
        });
        Ok(())
    }
}
