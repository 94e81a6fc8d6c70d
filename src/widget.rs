use crate::assets::Assets;
use crate::config::Theme;
use ggez::graphics::{self, Canvas, Color, DrawParam, Drawable, PxScale, Rect, Text, TextFragment};
use ggez::mint::{Point2, Vector2};
use ggez::{Context, GameResult};

/// Corner radius of cards
pub const CARD_RADIUS: f32 = 16.;

/// Corner radius of buttons
const BUTTON_RADIUS: f32 = 12.;

/// A clickable rounded button.
#[derive(Debug, Clone, Copy)]
pub struct Button {
    pub label: &'static str,
    pub rect: Rect,
    pub color: Color,
}

impl Button {
    pub fn new(label: &'static str, rect: Rect, color: Color) -> Self {
        Self { label, rect, color }
    }

    #[inline]
    pub fn contains(&self, point: Point2<f32>) -> bool {
        self.rect.contains(point)
    }

    /// Draw the button. Hovered buttons are brightened, disabled ones greyed out.
    pub fn draw(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        theme: &Theme,
        enabled: bool,
    ) -> GameResult {
        let hovered = enabled && self.contains(ctx.mouse.position());

        let fill = if !enabled {
            Color::from_rgb(100, 100, 100)
        } else if hovered {
            lighten(self.color, 0.15)
        } else {
            self.color
        };

        let mesh = graphics::Mesh::new_rounded_rectangle(
            ctx,
            graphics::DrawMode::fill(),
            self.rect,
            BUTTON_RADIUS,
            fill,
        )?;
        canvas.draw(&mesh, DrawParam::default());

        let text = label(self.label, 18., theme.text());
        draw_centered(ctx, canvas, &text, center(self.rect));

        Ok(())
    }
}

#[inline]
pub fn center(rect: Rect) -> Point2<f32> {
    Point2 {
        x: rect.x + rect.w * 0.5,
        y: rect.y + rect.h * 0.5,
    }
}

/// Mix a color towards white.
pub fn lighten(color: Color, amount: f32) -> Color {
    Color::new(
        color.r + (1. - color.r) * amount,
        color.g + (1. - color.g) * amount,
        color.b + (1. - color.b) * amount,
        color.a,
    )
}

pub fn label(text: impl Into<String>, size: f32, color: Color) -> Text {
    Text::new(
        TextFragment::new(text.into())
            .scale(PxScale::from(size))
            .color(color),
    )
}

/// Width and height of a laid out text.
pub fn text_size(ctx: &mut Context, text: &Text) -> (f32, f32) {
    text.dimensions(ctx)
        .map(|rect| (rect.w, rect.h))
        .unwrap_or((0., 0.))
}

pub fn draw_centered(ctx: &mut Context, canvas: &mut Canvas, text: &Text, center: Point2<f32>) {
    let (w, h) = text_size(ctx, text);
    canvas.draw(
        text,
        DrawParam::default().dest(Point2 {
            x: center.x - w * 0.5,
            y: center.y - h * 0.5,
        }),
    );
}

/// A filled card with a thin lighter border.
pub fn draw_card(ctx: &mut Context, canvas: &mut Canvas, rect: Rect, color: Color) -> GameResult {
    let fill =
        graphics::Mesh::new_rounded_rectangle(ctx, graphics::DrawMode::fill(), rect, CARD_RADIUS, color)?;
    let border = graphics::Mesh::new_rounded_rectangle(
        ctx,
        graphics::DrawMode::stroke(2.),
        rect,
        CARD_RADIUS,
        lighten(color, 0.1),
    )?;

    canvas.draw(&fill, DrawParam::default());
    canvas.draw(&border, DrawParam::default());
    Ok(())
}

/// Stretch the background image over the window, if one was loaded. A translucent
/// layer keeps text readable on top of it.
pub fn draw_backdrop(
    ctx: &mut Context,
    canvas: &mut Canvas,
    assets: &Assets,
    theme: &Theme,
) -> GameResult {
    let Some(background) = &assets.background else {
        return Ok(());
    };

    let (w, h) = ctx.gfx.drawable_size();
    canvas.draw(
        background,
        DrawParam::default().scale(Vector2 {
            x: w / background.width() as f32,
            y: h / background.height() as f32,
        }),
    );

    let mut shade = theme.background();
    shade.a = 0.7;
    let veil = graphics::Mesh::new_rectangle(
        ctx,
        graphics::DrawMode::fill(),
        Rect::new(0., 0., w, h),
        shade,
    )?;
    canvas.draw(&veil, DrawParam::default());

    Ok(())
}

/// Vertically stacked rects of equal size centered on `center_x`.
pub fn column(center_x: f32, top: f32, (w, h): (f32, f32), gap: f32, count: usize) -> Vec<Rect> {
    (0..count)
        .map(|i| Rect::new(center_x - w * 0.5, top + i as f32 * (h + gap), w, h))
        .collect()
}

/// Horizontally stacked rects of equal size centered on `center_x`.
pub fn row(center_x: f32, top: f32, (w, h): (f32, f32), gap: f32, count: usize) -> Vec<Rect> {
    let total = count as f32 * w + count.saturating_sub(1) as f32 * gap;
    let left = center_x - total * 0.5;
    (0..count)
        .map(|i| Rect::new(left + i as f32 * (w + gap), top, w, h))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_stacks_downwards() {
        let rects = column(100., 10., (50., 20.), 5., 3);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0], Rect::new(75., 10., 50., 20.));
        assert_eq!(rects[2].y, 10. + 2. * 25.);
    }

    #[test]
    fn row_is_centered() {
        let rects = row(100., 0., (40., 10.), 20., 2);
        assert_eq!(rects[0].x, 100. - 50.);
        assert_eq!(rects[1].x + rects[1].w, 100. + 50.);
    }

    #[test]
    fn button_hit_test() {
        let button = Button::new("OK", Rect::new(10., 10., 100., 40.), Color::WHITE);
        assert!(button.contains(Point2 { x: 50., y: 30. }));
        assert!(!button.contains(Point2 { x: 5., y: 30. }));
    }

    #[test]
    fn lighten_moves_towards_white() {
        let c = lighten(Color::new(0., 0.5, 1., 1.), 0.5);
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.75, 1., 1.));
    }
}
