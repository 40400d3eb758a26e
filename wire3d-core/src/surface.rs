/// A position on the drawing surface, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A 2D immediate-mode drawing target.
///
/// The core never owns a surface. Hosts hand one to the viewer each frame.
pub trait DrawSurface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Stroke a straight segment in the given color label.
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: &str);
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceCall {
    Clear,
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        color: String,
    },
}

/// Test double that records every call in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn line_colors(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Line { color, .. } => Some(color.as_str()),
                SurfaceCall::Clear => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(SurfaceCall::Clear);
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: &str) {
        self.calls.push(SurfaceCall::Line {
            from,
            to,
            color: color.to_string(),
        });
    }
}
