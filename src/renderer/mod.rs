//! Rendering module
//!
//! The game draws through the [`Surface`] trait, a minimal 2D drawing
//! context in playfield pixels (origin top-left, y down). [`DrawList`]
//! records calls for headless runs; [`RenderState`] draws with WebGPU.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use crate::settings::Settings;
use crate::sim::GameState;

/// Axis-aligned rectangle, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// On/off lengths of a dashed stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub on: f32,
    pub off: f32,
}

/// Center divider style
pub const CENTER_LINE_DASH: Dash = Dash { on: 5.0, off: 15.0 };
pub const CENTER_LINE_WIDTH: f32 = 2.0;

/// A 2D drawing context
pub trait Surface {
    /// Fill the whole surface
    fn clear(&mut self, color: [f32; 4]);
    fn fill_rect(&mut self, rect: Rect, color: [f32; 4]);
    fn stroke_dashed_line(&mut self, from: Vec2, to: Vec2, dash: Dash, width: f32, color: [f32; 4]);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: [f32; 4],
    },
    FillRect {
        rect: Rect,
        color: [f32; 4],
    },
    DashedLine {
        from: Vec2,
        to: Vec2,
        dash: Dash,
        width: f32,
        color: [f32; 4],
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
}

/// Surface that records every call; a clear drops earlier commands
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: [f32; 4]) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_rect(&mut self, rect: Rect, color: [f32; 4]) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_dashed_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        dash: Dash,
        width: f32,
        color: [f32; 4],
    ) {
        self.commands.push(DrawCommand::DashedLine {
            from,
            to,
            dash,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }
}

/// Draw one frame: background, center divider, paddles, ball
pub fn draw_game(state: &GameState, settings: &Settings, surface: &mut dyn Surface) {
    surface.clear(settings.background);

    let mid_x = settings.width / 2.0;
    surface.stroke_dashed_line(
        Vec2::new(mid_x, 0.0),
        Vec2::new(mid_x, settings.height),
        CENTER_LINE_DASH,
        CENTER_LINE_WIDTH,
        settings.foreground,
    );

    for paddle in [&state.left, &state.right] {
        surface.fill_rect(
            Rect::new(paddle.pos.x, paddle.pos.y, paddle.width, paddle.height),
            paddle.color,
        );
    }

    surface.fill_circle(state.ball.pos, state.ball.radius, state.ball.color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::colors;

    #[test]
    fn test_draw_game_order() {
        let settings = Settings::default();
        let state = GameState::new(&settings, 1);
        let mut list = DrawList::new();
        draw_game(&state, &settings, &mut list);

        assert_eq!(
            list.commands,
            vec![
                DrawCommand::Clear {
                    color: colors::BACKGROUND
                },
                DrawCommand::DashedLine {
                    from: Vec2::new(400.0, 0.0),
                    to: Vec2::new(400.0, 600.0),
                    dash: CENTER_LINE_DASH,
                    width: 2.0,
                    color: colors::FOREGROUND,
                },
                DrawCommand::FillRect {
                    rect: Rect::new(20.0, 250.0, 15.0, 100.0),
                    color: colors::FOREGROUND,
                },
                DrawCommand::FillRect {
                    rect: Rect::new(765.0, 250.0, 15.0, 100.0),
                    color: colors::FOREGROUND,
                },
                DrawCommand::FillCircle {
                    center: Vec2::new(400.0, 300.0),
                    radius: 10.0,
                    color: colors::FOREGROUND,
                },
            ]
        );
    }

    #[test]
    fn test_clear_starts_a_new_frame() {
        let settings = Settings::default();
        let state = GameState::new(&settings, 1);
        let mut list = DrawList::new();
        draw_game(&state, &settings, &mut list);
        draw_game(&state, &settings, &mut list);
        assert_eq!(list.commands.len(), 5);
    }
}
