//! Frame draw list
//!
//! Scenes describe what to draw each tick; the host backend walks the list.
//! Coordinates are screen pixels unless a command says otherwise.

use glam::Vec2;

use crate::platform::ImageHandle;

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const GOLD: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.5];

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { color: [f32; 4] },
    Sprite { image: ImageHandle, pos: Vec2, size: Vec2 },
    Rect { pos: Vec2, size: Vec2, color: [f32; 4] },
    Text { text: String, pos: Vec2, color: [f32; 4] },
}

#[derive(Debug, Default)]
pub struct Frame {
    /// World-space offset subtracted from world draws
    pub camera: Vec2,
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self, color: [f32; 4]) {
        self.commands.push(DrawCommand::Clear { color });
    }

    /// Sprite at a world position, shifted by the camera
    pub fn sprite_world(&mut self, image: ImageHandle, world_pos: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Sprite {
            image,
            pos: world_pos - self.camera,
            size,
        });
    }

    pub fn rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
        self.commands.push(DrawCommand::Rect { pos, size, color });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, color: [f32; 4]) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All text lines, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_sprites_follow_camera() {
        let mut frame = Frame::new();
        frame.camera = Vec2::new(100.0, 50.0);
        frame.sprite_world(ImageHandle::placeholder("a.png"), Vec2::new(150.0, 60.0), Vec2::splat(32.0));
        frame.text("hi", Vec2::ZERO, WHITE);

        match &frame.commands()[0] {
            DrawCommand::Sprite { pos, .. } => assert_eq!(*pos, Vec2::new(50.0, 10.0)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["hi"]);
        frame.reset();
        assert!(frame.commands().is_empty());
    }
}
