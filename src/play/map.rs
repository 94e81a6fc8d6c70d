use crate::score::Coord;
use ggez::graphics::Rect;
use ggez::mint::{Point2, Vector2};

/// Placement of an image scaled to fit inside a panel, keeping its aspect ratio
/// and centered on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub origin: Point2<f32>,
    pub scale: f32,

    /// Size of the unscaled image in pixels
    pub image: (f32, f32),
}

impl Fit {
    pub fn new(panel: Rect, (image_w, image_h): (f32, f32)) -> Self {
        let scale = (panel.w / image_w.max(1.)).min(panel.h / image_h.max(1.));
        let (w, h) = (image_w * scale, image_h * scale);

        Self {
            origin: Point2 {
                x: panel.x + (panel.w - w) * 0.5,
                y: panel.y + (panel.h - h) * 0.5,
            },
            scale,
            image: (image_w, image_h),
        }
    }

    /// Where the scaled image lands on screen.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.image.0 * self.scale,
            self.image.1 * self.scale,
        )
    }

    pub fn draw_scale(&self) -> Vector2<f32> {
        Vector2 {
            x: self.scale,
            y: self.scale,
        }
    }

    /// Map a window pixel to an image pixel. Clicks outside the drawn image are
    /// ignored; positions on its edge are clamped into the image.
    pub fn to_image(&self, pixel: Point2<f32>) -> Option<Coord> {
        if !self.bounds().contains(pixel) || self.scale <= 0. {
            return None;
        }

        let x = ((pixel.x - self.origin.x) / self.scale).floor() as i32;
        let y = ((pixel.y - self.origin.y) / self.scale).floor() as i32;

        Some(Coord::new(
            x.clamp(0, self.image.0 as i32),
            y.clamp(0, self.image.1 as i32),
        ))
    }

    /// Window position of an image pixel.
    pub fn to_screen(&self, coord: Coord) -> Point2<f32> {
        Point2 {
            x: self.origin.x + coord.x as f32 * self.scale,
            y: self.origin.y + coord.y as f32 * self.scale,
        }
    }
}
