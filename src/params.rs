use serde::Serialize;

use crate::gestures::GestureLabel;

/// Values the renderer reads once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderParams {
    pub scale: f32,
    pub rotation_speed: f32,
    pub show_secondary_display: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        map_to_params(GestureLabel::Idle)
    }
}

impl From<GestureLabel> for RenderParams {
    fn from(g: GestureLabel) -> Self {
        map_to_params(g)
    }
}

pub fn map_to_params(effective: GestureLabel) -> RenderParams {
    match effective {
        GestureLabel::OpenPalm => RenderParams {
            scale: 1.5,
            rotation_speed: 0.02,
            show_secondary_display: false,
        },
        GestureLabel::IndexPoint => RenderParams {
            scale: 1.0,
            rotation_speed: 0.0,
            show_secondary_display: true,
        },
        // ambient spin
        GestureLabel::Idle => RenderParams {
            scale: 1.0,
            rotation_speed: 0.005,
            show_secondary_display: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_exact() {
        let cases = [
            (GestureLabel::OpenPalm, 1.5, 0.02, false),
            (GestureLabel::IndexPoint, 1.0, 0.0, true),
            (GestureLabel::Idle, 1.0, 0.005, false),
        ];
        for (g, scale, rotation_speed, show) in cases {
            assert_eq!(
                map_to_params(g),
                RenderParams {
                    scale,
                    rotation_speed,
                    show_secondary_display: show
                },
                "{g}"
            );
        }
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(RenderParams::default(), map_to_params(GestureLabel::Idle));
        assert_eq!(RenderParams::from(GestureLabel::OpenPalm).scale, 1.5);
    }
}
