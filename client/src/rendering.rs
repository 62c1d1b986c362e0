//! Draw sink for the arena mirror and the HUD

use crate::game::Scoreboard;
use macroquad::prelude::{
    clear_background, draw_rectangle, draw_rectangle_lines, draw_text, draw_triangle,
    measure_text, vec2, Color, GREEN, WHITE,
};
use shared::arena::{Arena, EntityKind};
use shared::math::Vec2;

/// Unit ship outline, nose along +x.
const SHIP_SHAPE: [(f32, f32); 3] = [(-0.5, 0.5), (-0.5, -0.5), (0.5, 0.0)];

pub struct Renderer {
    width: f32,
    height: f32,
}

impl Renderer {
    pub fn new(width: f32, height: f32) -> Self {
        Renderer { width, height }
    }

    /// World space has its origin at the centre with y up; screen space
    /// starts top-left with y down.
    pub fn world_to_screen(&self, point: Vec2) -> (f32, f32) {
        (point.x + self.width / 2.0, self.height / 2.0 - point.y)
    }

    /// Screen-space corners of a ship triangle.
    pub fn ship_vertices(&self, position: Vec2, heading: f32, scale: f32) -> [(f32, f32); 3] {
        let (sin, cos) = heading.sin_cos();
        SHIP_SHAPE.map(|(x, y)| {
            let rotated = Vec2::new(x * cos - y * sin, x * sin + y * cos);
            self.world_to_screen(position + rotated * scale)
        })
    }

    pub fn render(&self, arena: &Arena, scoreboard: &Scoreboard) {
        clear_background(Color::from_rgba(10, 10, 20, 255));

        for (index, slot) in arena.iter_active() {
            match slot.kind {
                EntityKind::Ship => {
                    let color = if Some(index) == scoreboard.ship_id {
                        GREEN
                    } else {
                        Color::from_rgba(255, 68, 68, 255)
                    };
                    let [a, b, c] = self.ship_vertices(slot.position, slot.heading, slot.scale);
                    draw_triangle(vec2(a.0, a.1), vec2(b.0, b.1), vec2(c.0, c.1), color);
                }
                EntityKind::Bullet => {
                    self.draw_square(slot.position, slot.scale, Color::from_rgba(255, 255, 0, 255));
                }
                EntityKind::Asteroid => {
                    let (x, y) = self.world_to_screen(slot.position);
                    let half = slot.scale / 2.0;
                    draw_rectangle_lines(x - half, y - half, slot.scale, slot.scale, 2.0, WHITE);
                }
            }
        }

        self.draw_hud(scoreboard);
    }

    fn draw_square(&self, center: Vec2, size: f32, color: Color) {
        let (x, y) = self.world_to_screen(center);
        draw_rectangle(x - size / 2.0, y - size / 2.0, size, size, color);
    }

    fn draw_hud(&self, scoreboard: &Scoreboard) {
        let ship = scoreboard
            .ship_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let status = format!(
            "Ship {}   Score {}   Lives {}",
            ship, scoreboard.score, scoreboard.lives
        );
        draw_text(&status, 10.0, 20.0, 20.0, WHITE);

        if scoreboard.game_over {
            let text = "GAME OVER";
            let size = 48.0;
            let dims = measure_text(text, None, size as u16, 1.0);
            draw_text(
                text,
                (self.width - dims.width) / 2.0,
                self.height / 2.0,
                size,
                Color::from_rgba(255, 68, 68, 255),
            );
        }
    }
}
