use crate::config::Theme;
use crate::leaderboard::{Leaderboard, PlayerScore};
use crate::widget::{self, Button};
use crate::Transition;
use ggez::graphics::{self, Canvas, DrawParam, Rect};
use ggez::input::keyboard::KeyCode;
use ggez::mint::Point2;
use ggez::{Context, GameResult};
use log::error;

const ROW_HEIGHT: f32 = 40.;

/// Leaderboard table.
#[derive(Debug)]
pub struct RankingScreen {
    leaderboard: Leaderboard,
    entries: Vec<PlayerScore>,
    notice: Option<String>,
}

impl RankingScreen {
    pub fn new(leaderboard: Leaderboard) -> Self {
        let entries = leaderboard.load();
        Self {
            leaderboard,
            entries,
            notice: None,
        }
    }

    fn table((x, y): (f32, f32)) -> Rect {
        Rect::new(x * 0.5 - 320., 140., 640., (y - 260.).max(ROW_HEIGHT * 2.))
    }

    fn buttons(size: (f32, f32), theme: &Theme) -> [Button; 2] {
        let rects = widget::row(size.0 * 0.5, size.1 - 90., (220., 50.), 20., 2);
        [
            Button::new("BACK TO MENU", rects[0], theme.primary()),
            Button::new("CLEAR RANKINGS", rects[1], theme.danger()),
        ]
    }

    fn clear(&mut self) {
        match self.leaderboard.clear() {
            Ok(()) => {
                self.entries.clear();
                self.notice = None;
            }
            Err(err) => {
                error!("{err}");
                self.notice = Some(format!("Failed to clear rankings: {err}"));
            }
        }
    }

    pub fn click(&mut self, ctx: &mut Context, theme: &Theme, pixel: Point2<f32>) -> Option<Transition> {
        let [back, clear] = Self::buttons(ctx.gfx.drawable_size(), theme);

        if back.contains(pixel) {
            return Some(Transition::MainMenu);
        }
        if clear.contains(pixel) {
            self.clear();
        }
        None
    }

    pub fn key(&mut self, key: KeyCode) -> Option<Transition> {
        match key {
            KeyCode::Escape => Some(Transition::MainMenu),
            _ => None,
        }
    }

    pub fn draw(&self, ctx: &mut Context, canvas: &mut Canvas, theme: &Theme) -> GameResult {
        let size = ctx.gfx.drawable_size();

        let title = widget::label("LEADERBOARD", 44., theme.text());
        widget::draw_centered(ctx, canvas, &title, Point2 { x: size.0 * 0.5, y: 60. });

        let subtitle = widget::label("Top players of the campus challenge", 18., theme.text_secondary());
        widget::draw_centered(ctx, canvas, &subtitle, Point2 { x: size.0 * 0.5, y: 105. });

        let table = Self::table(size);
        widget::draw_card(ctx, canvas, table, theme.card())?;

        // Rank, name and score columns
        let columns = [table.x + 80., table.x + table.w * 0.5, table.x + table.w - 100.];

        let header = Rect::new(table.x, table.y, table.w, ROW_HEIGHT + 10.);
        let header_mesh = graphics::Mesh::new_rounded_rectangle(
            ctx,
            graphics::DrawMode::fill(),
            header,
            widget::CARD_RADIUS,
            widget::lighten(theme.card(), 0.1),
        )?;
        canvas.draw(&header_mesh, DrawParam::default());

        for (x, caption) in columns.iter().zip(["RANK", "PLAYER", "SCORE"]) {
            let text = widget::label(caption, 18., theme.text());
            widget::draw_centered(ctx, canvas, &text, Point2 { x: *x, y: header.y + header.h * 0.5 });
        }

        let first_row = header.y + header.h + ROW_HEIGHT * 0.5;

        if self.entries.is_empty() {
            let text = widget::label("No scores yet. Play a game!", 20., theme.text_secondary());
            widget::draw_centered(ctx, canvas, &text, Point2 { x: columns[1], y: first_row });
        }

        let max_rows = ((table.h - header.h) / ROW_HEIGHT).floor() as usize;
        for (i, entry) in self.entries.iter().take(max_rows).enumerate() {
            let y = first_row + i as f32 * ROW_HEIGHT;
            let rank_color = match i {
                0 => theme.warning(),
                1 | 2 => theme.accent(),
                _ => theme.text(),
            };

            let cells = [
                (format!("#{}", i + 1), rank_color),
                (entry.username.clone(), theme.text()),
                (entry.score.to_string(), theme.success()),
            ];
            for (x, (value, color)) in columns.iter().zip(cells) {
                let text = widget::label(value, 20., color);
                widget::draw_centered(ctx, canvas, &text, Point2 { x: *x, y });
            }
        }

        if let Some(notice) = &self.notice {
            let text = widget::label(notice.as_str(), 16., theme.danger());
            widget::draw_centered(ctx, canvas, &text, Point2 { x: size.0 * 0.5, y: size.1 - 110. });
        }

        for button in Self::buttons(size, theme) {
            button.draw(ctx, canvas, theme, true)?;
        }

        Ok(())
    }
}
