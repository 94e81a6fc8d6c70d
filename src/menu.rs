use crate::config::Theme;
use crate::error::UsernameError;
use crate::session::{self, MAX_USERNAME_LEN};
use crate::widget::{self, Button};
use crate::Transition;
use ggez::graphics::{self, Canvas, Color, DrawParam, Rect};
use ggez::input::keyboard::KeyCode;
use ggez::mint::Point2;
use ggez::{Context, GameResult};

/// Longest text the name box accepts while typing
const NAME_BUFFER_LEN: usize = 20;

const BUTTON_SIZE: (f32, f32) = (300., 60.);

#[derive(Debug)]
pub struct MainMenu {
    pub items: [MainMenuItem; 4],
    pub selected: usize,

    /// Open while the player types their name
    pub name_entry: Option<NameEntry>,

    /// Name of the last player, offered again on the next start
    last_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuItem {
    Start,
    Leaderboard,
    HowToPlay,
    Exit,
}

impl MainMenuItem {
    fn label(&self) -> &'static str {
        match self {
            Self::Start => "START GAME",
            Self::Leaderboard => "LEADERBOARD",
            Self::HowToPlay => "HOW TO PLAY",
            Self::Exit => "EXIT GAME",
        }
    }

    fn color(&self, theme: &Theme) -> Color {
        match self {
            Self::Start => theme.primary(),
            Self::Leaderboard => theme.success(),
            Self::HowToPlay => theme.warning(),
            Self::Exit => theme.danger(),
        }
    }
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            items: [
                MainMenuItem::Start,
                MainMenuItem::Leaderboard,
                MainMenuItem::HowToPlay,
                MainMenuItem::Exit,
            ],
            selected: 0,
            name_entry: None,
            last_name: String::new(),
        }
    }

    /// Open the name box, pre-filled with the previous player's name.
    pub fn prompt_name(&mut self) {
        self.name_entry = Some(NameEntry {
            buf: self.last_name.clone(),
            error: None,
        });
    }

    fn buttons(&self, (x, y): (f32, f32), theme: &Theme) -> Vec<Button> {
        widget::column(x * 0.5, y * 0.5 - 60., BUTTON_SIZE, 20., self.items.len())
            .into_iter()
            .zip(self.items.iter())
            .map(|(rect, item)| Button::new(item.label(), rect, item.color(theme)))
            .collect()
    }

    fn activate(&mut self, item: MainMenuItem) -> Option<Transition> {
        match item {
            MainMenuItem::Start => {
                self.prompt_name();
                None
            }
            MainMenuItem::Leaderboard => Some(Transition::Leaderboard),
            MainMenuItem::HowToPlay => Some(Transition::HowToPlay),
            MainMenuItem::Exit => Some(Transition::Quit),
        }
    }

    /// Validate the typed name and start a game with it. Invalid names keep the box
    /// open with an error.
    fn confirm_name(&mut self) -> Option<Transition> {
        let entry = self.name_entry.as_mut()?;

        match session::validate_username(&entry.buf) {
            Ok(name) => {
                self.last_name = name.clone();
                self.name_entry = None;
                Some(Transition::StartGame(name))
            }
            Err(err) => {
                entry.error = Some(err);
                None
            }
        }
    }

    pub fn click(
        &mut self,
        ctx: &mut Context,
        theme: &Theme,
        pixel: Point2<f32>,
    ) -> Option<Transition> {
        let size = ctx.gfx.drawable_size();

        if self.name_entry.is_some() {
            let [ok, cancel] = NameEntry::buttons(size, theme);
            if ok.contains(pixel) {
                return self.confirm_name();
            }
            if cancel.contains(pixel) {
                self.name_entry = None;
            }
            return None;
        }

        let hit = self
            .buttons(size, theme)
            .iter()
            .position(|button| button.contains(pixel))?;
        self.selected = hit;
        self.activate(self.items[hit])
    }

    pub fn key(&mut self, key: KeyCode) -> Option<Transition> {
        if let Some(entry) = &mut self.name_entry {
            match key {
                KeyCode::Return | KeyCode::NumpadEnter => return self.confirm_name(),
                KeyCode::Escape => self.name_entry = None,
                KeyCode::Back => {
                    entry.buf.pop();
                    entry.error = None;
                }
                _ => {}
            }
            return None;
        }

        match key {
            KeyCode::Up => {
                self.selected = (self.selected + self.items.len() - 1) % self.items.len();
            }
            KeyCode::Down => self.selected = (self.selected + 1) % self.items.len(),
            KeyCode::Return | KeyCode::NumpadEnter => return self.activate(self.items[self.selected]),
            KeyCode::Escape => return Some(Transition::Quit),
            _ => {}
        }
        None
    }

    pub fn text_input(&mut self, character: char) {
        if let Some(entry) = &mut self.name_entry {
            entry.push(character);
        }
    }

    pub fn draw(&self, ctx: &mut Context, canvas: &mut Canvas, theme: &Theme) -> GameResult {
        let (x, y) = ctx.gfx.drawable_size();

        let title = widget::label(crate::TITLE, 48., theme.text());
        widget::draw_centered(ctx, canvas, &title, Point2 { x: x * 0.5, y: y * 0.5 - 200. });

        let subtitle = widget::label("Explore Your Campus Like Never Before", 20., theme.text_secondary());
        widget::draw_centered(ctx, canvas, &subtitle, Point2 { x: x * 0.5, y: y * 0.5 - 150. });

        for (i, button) in self.buttons((x, y), theme).iter().enumerate() {
            button.draw(ctx, canvas, theme, self.name_entry.is_none())?;

            if i == self.selected && self.name_entry.is_none() {
                let outline = graphics::Mesh::new_rounded_rectangle(
                    ctx,
                    graphics::DrawMode::stroke(3.),
                    button.rect,
                    12.,
                    theme.text(),
                )?;
                canvas.draw(&outline, DrawParam::default());
            }
        }

        let version = widget::label(
            concat!("Version ", env!("CARGO_PKG_VERSION"), " - Campus Edition"),
            14.,
            theme.text_secondary(),
        );
        widget::draw_centered(ctx, canvas, &version, Point2 { x: x * 0.5, y: y - 30. });

        if let Some(entry) = &self.name_entry {
            entry.draw(ctx, canvas, theme)?;
        }

        Ok(())
    }
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

/// Text box asking for the player's name.
#[derive(Debug)]
pub struct NameEntry {
    /// Current text buffer
    pub buf: String,
    pub error: Option<UsernameError>,
}

impl NameEntry {
    fn push(&mut self, character: char) {
        if character.is_control() || self.buf.chars().count() >= NAME_BUFFER_LEN {
            return;
        }
        self.buf.push(character);
        self.error = None;
    }

    fn panel((x, y): (f32, f32)) -> Rect {
        Rect::new(x * 0.5 - 220., y * 0.5 - 130., 440., 260.)
    }

    fn buttons(size: (f32, f32), theme: &Theme) -> [Button; 2] {
        let panel = Self::panel(size);
        let rects = widget::row(
            panel.x + panel.w * 0.5,
            panel.y + panel.h - 70.,
            (160., 50.),
            20.,
            2,
        );
        [
            Button::new("START", rects[0], theme.success()),
            Button::new("CANCEL", rects[1], theme.danger()),
        ]
    }

    fn draw(&self, ctx: &mut Context, canvas: &mut Canvas, theme: &Theme) -> GameResult {
        let size = ctx.gfx.drawable_size();
        let panel = Self::panel(size);
        widget::draw_card(ctx, canvas, panel, theme.card())?;

        let center_x = panel.x + panel.w * 0.5;

        let banner = widget::label(
            format!("Enter your username (max {MAX_USERNAME_LEN})"),
            18.,
            theme.text_secondary(),
        );
        widget::draw_centered(ctx, canvas, &banner, Point2 { x: center_x, y: panel.y + 30. });

        let field = Rect::new(panel.x + 40., panel.y + 60., panel.w - 80., 50.);
        let mesh = graphics::Mesh::new_rectangle(
            ctx,
            graphics::DrawMode::fill(),
            field,
            theme.background(),
        )?;
        canvas.draw(&mesh, DrawParam::default());

        let name = widget::label(format!("{}_", self.buf), 24., theme.text());
        widget::draw_centered(ctx, canvas, &name, widget::center(field));

        if let Some(err) = &self.error {
            let text = widget::label(err.to_string(), 16., theme.danger());
            widget::draw_centered(ctx, canvas, &text, Point2 { x: center_x, y: field.y + 70. });
        }

        for button in Self::buttons(size, theme) {
            button.draw(ctx, canvas, theme, true)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_navigation_wraps() {
        let mut menu = MainMenu::new();
        assert!(menu.key(KeyCode::Up).is_none());
        assert_eq!(menu.items[menu.selected], MainMenuItem::Exit);
        assert!(menu.key(KeyCode::Down).is_none());
        assert_eq!(menu.items[menu.selected], MainMenuItem::Start);
    }

    #[test]
    fn start_opens_name_entry_and_validates() {
        let mut menu = MainMenu::new();
        assert!(menu.key(KeyCode::Return).is_none());
        assert!(menu.name_entry.is_some());

        // Empty name is rejected and the box stays open
        assert!(menu.key(KeyCode::Return).is_none());
        assert_eq!(
            menu.name_entry.as_ref().unwrap().error,
            Some(UsernameError::Empty)
        );

        for c in " zara\u{8}".chars() {
            menu.text_input(c);
        }
        match menu.key(KeyCode::Return) {
            Some(Transition::StartGame(name)) => assert_eq!(name, "zara"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(menu.name_entry.is_none());

        // The name is offered again next time
        menu.prompt_name();
        assert_eq!(menu.name_entry.as_ref().unwrap().buf, "zara");
    }

    #[test]
    fn too_long_name_is_rejected() {
        let mut menu = MainMenu::new();
        menu.prompt_name();
        for c in "abcdefghijklmnop".chars() {
            menu.text_input(c);
        }

        assert!(menu.key(KeyCode::Return).is_none());
        assert_eq!(
            menu.name_entry.as_ref().unwrap().error,
            Some(UsernameError::TooLong { max: 12 })
        );

        for _ in 0..4 {
            menu.key(KeyCode::Back);
        }
        assert!(matches!(menu.key(KeyCode::Return), Some(Transition::StartGame(_))));
    }

    #[test]
    fn escape_closes_entry_before_quitting() {
        let mut menu = MainMenu::new();
        menu.prompt_name();
        assert!(menu.key(KeyCode::Escape).is_none());
        assert!(menu.name_entry.is_none());
        assert!(matches!(menu.key(KeyCode::Escape), Some(Transition::Quit)));
    }
}
