use crate::config::Theme;
use crate::session::Summary;
use crate::widget::{self, Button};
use crate::Transition;
use ggez::graphics::{Canvas, Rect};
use ggez::input::keyboard::KeyCode;
use ggez::mint::Point2;
use ggez::{Context, GameResult};

/// Final screen of a game.
#[derive(Debug)]
pub struct ResultsScreen {
    summary: Summary,

    /// Something went wrong while playing or saving
    notice: Option<String>,
}

impl ResultsScreen {
    pub fn new(summary: Summary, notice: Option<String>) -> Self {
        Self { summary, notice }
    }

    fn card((x, y): (f32, f32)) -> Rect {
        Rect::new(x * 0.5 - 300., y * 0.5 - 220., 600., 440.)
    }

    fn buttons(size: (f32, f32), theme: &Theme) -> [Button; 3] {
        let card = Self::card(size);
        let rects = widget::row(
            card.x + card.w * 0.5,
            card.y + card.h - 80.,
            (170., 50.),
            15.,
            3,
        );
        [
            Button::new("MAIN MENU", rects[0], theme.primary()),
            Button::new("RANKING", rects[1], theme.success()),
            Button::new("EXIT", rects[2], theme.danger()),
        ]
    }

    pub fn click(&self, ctx: &mut Context, theme: &Theme, pixel: Point2<f32>) -> Option<Transition> {
        let [menu, ranking, exit] = Self::buttons(ctx.gfx.drawable_size(), theme);

        if menu.contains(pixel) {
            Some(Transition::MainMenu)
        } else if ranking.contains(pixel) {
            Some(Transition::Leaderboard)
        } else if exit.contains(pixel) {
            Some(Transition::Quit)
        } else {
            None
        }
    }

    pub fn key(&self, key: KeyCode) -> Option<Transition> {
        match key {
            KeyCode::Escape | KeyCode::Return => Some(Transition::MainMenu),
            _ => None,
        }
    }

    pub fn draw(&self, ctx: &mut Context, canvas: &mut Canvas, theme: &Theme) -> GameResult {
        let size = ctx.gfx.drawable_size();
        let card = Self::card(size);
        widget::draw_card(ctx, canvas, card, theme.card())?;

        let center_x = card.x + card.w * 0.5;
        let Summary {
            username,
            total_score,
            rounds_completed,
            rounds_total,
            rating,
        } = &self.summary;

        let headline = widget::label(rating.headline(), 36., theme.accent());
        widget::draw_centered(ctx, canvas, &headline, Point2 { x: center_x, y: card.y + 50. });

        let lines = [
            format!("Player: {username}"),
            format!("Final Score: {total_score} points"),
            format!("Rounds Completed: {rounds_completed}/{rounds_total}"),
            format!("Thanks for playing {}!", crate::TITLE),
        ];
        for (i, line) in lines.into_iter().enumerate() {
            let text = widget::label(line, 22., theme.text());
            widget::draw_centered(
                ctx,
                canvas,
                &text,
                Point2 {
                    x: center_x,
                    y: card.y + 120. + i as f32 * 40.,
                },
            );
        }

        if let Some(notice) = &self.notice {
            let text = widget::label(notice.as_str(), 16., theme.danger());
            widget::draw_centered(ctx, canvas, &text, Point2 { x: center_x, y: card.y + 290. });
        }

        for button in Self::buttons(size, theme) {
            button.draw(ctx, canvas, theme, true)?;
        }

        Ok(())
    }
}
