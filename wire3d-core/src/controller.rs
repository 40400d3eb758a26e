/// Keyboard mapping onto camera mutations
use crate::config::ViewerConfig;
use crate::projection::Camera;
use crate::transform::Matrix4x4;

/// World axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn rotation(self, angle: f64) -> Matrix4x4 {
        match self {
            Axis::X => Matrix4x4::rotation_x(angle),
            Axis::Y => Matrix4x4::rotation_y(angle),
            Axis::Z => Matrix4x4::rotation_z(angle),
        }
    }
}

/// A single camera mutation produced by one key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    Translate { axis: Axis, delta: f64 },
    Rotate { axis: Axis, angle: f64 },
    Zoom { factor: f64 },
}

/// Map a key identifier (DOM `KeyboardEvent.key` naming) to a command.
///
/// Unknown keys map to `None`.
pub fn command_for_key(key: &str, config: &ViewerConfig) -> Option<CameraCommand> {
    use CameraCommand::*;

    let step = config.translation_step;
    let rot = config.rotation_step;

    let command = match key {
        "ArrowLeft" => Translate { axis: Axis::X, delta: -step },
        "ArrowRight" => Translate { axis: Axis::X, delta: step },
        "ArrowUp" => Translate { axis: Axis::Y, delta: step },
        "ArrowDown" => Translate { axis: Axis::Y, delta: -step },
        "PageUp" => Translate { axis: Axis::Z, delta: step },
        "PageDown" => Translate { axis: Axis::Z, delta: -step },

        "w" => Rotate { axis: Axis::X, angle: -rot },
        "s" => Rotate { axis: Axis::X, angle: rot },
        "a" => Rotate { axis: Axis::Y, angle: -rot },
        "d" => Rotate { axis: Axis::Y, angle: rot },
        "q" => Rotate { axis: Axis::Z, angle: -rot },
        "e" => Rotate { axis: Axis::Z, angle: rot },

        "x" => Zoom { factor: 1.0 - config.zoom_step },
        "z" => Zoom { factor: 1.0 + config.zoom_step },

        _ => return None,
    };
    Some(command)
}

impl Camera {
    pub fn apply(&mut self, command: CameraCommand) {
        match command {
            CameraCommand::Translate { axis, delta } => match axis {
                Axis::X => self.translate(delta, 0.0, 0.0),
                Axis::Y => self.translate(0.0, delta, 0.0),
                Axis::Z => self.translate(0.0, 0.0, delta),
            },
            CameraCommand::Rotate { axis, angle } => self.rotate(&axis.rotation(angle)),
            CameraCommand::Zoom { factor } => self.zoom_by(factor),
        }
    }
}
