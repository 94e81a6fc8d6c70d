use self::map::Fit;
use crate::assets::{self, Assets};
use crate::config::Theme;
use crate::session::{HintState, RoundOutcome, Session};
use crate::widget::{self, Button};
use crate::Transition;
use ggez::graphics::{self, Canvas, Color, DrawParam, Image, Rect};
use ggez::input::keyboard::KeyCode;
use ggez::mint::Point2;
use ggez::{Context, GameResult};
use log::{debug, info};
use std::time::{Duration, Instant};

mod map;

/// Height of the top status bar
const STATUS_HEIGHT: f32 = 70.;

/// Space around and between panels
const MARGIN: f32 = 20.;

/// Share of the width given to the photograph
const PHOTO_SHARE: f32 = 0.6;

const BUTTON_SIZE: (f32, f32) = (200., 50.);

/// How long a transient notice stays on screen
const NOTICE_DURATION: Duration = Duration::from_secs(3);

const MARKER_RADIUS: f32 = 8.;

/// Where the parts of the game screen go for a given window size.
#[derive(Debug, Clone, Copy)]
struct Layout {
    status: Rect,
    photo: Rect,
    map: Rect,
    hint: Button,
    submit: Button,
    proceed: Button,
}

impl Layout {
    fn new((w, h): (f32, f32), theme: &Theme) -> Self {
        let top = STATUS_HEIGHT + MARGIN * 2.;
        let inner_w = w - MARGIN * 3.;
        let panel_h = h - top - BUTTON_SIZE.1 - MARGIN * 2.;

        let photo = Rect::new(MARGIN, top, inner_w * PHOTO_SHARE, panel_h);
        let map = Rect::new(
            photo.x + photo.w + MARGIN,
            top,
            inner_w * (1. - PHOTO_SHARE),
            panel_h,
        );

        let buttons = widget::row(
            map.x + map.w * 0.5,
            map.y + map.h + MARGIN * 0.5,
            BUTTON_SIZE,
            MARGIN,
            2,
        );

        Self {
            status: Rect::new(MARGIN, MARGIN, w - MARGIN * 2., STATUS_HEIGHT),
            photo,
            map,
            hint: Button::new("GET HINT", buttons[0], theme.warning()),
            submit: Button::new("SUBMIT GUESS", buttons[1], theme.success()),
            proceed: Button::new(
                "CONTINUE",
                Rect::new(
                    w * 0.5 - BUTTON_SIZE.0 * 0.5,
                    h * 0.5 + 110.,
                    BUTTON_SIZE.0,
                    BUTTON_SIZE.1,
                ),
                theme.primary(),
            ),
        }
    }

    fn map_fit(&self, assets: &Assets) -> Fit {
        map_fit(self.map, assets)
    }
}

/// The map sits below the panel title.
fn map_fit(panel: Rect, assets: &Assets) -> Fit {
    let area = Rect::new(
        panel.x + MARGIN,
        panel.y + MARGIN * 2.,
        (panel.w - MARGIN * 2.).max(0.),
        (panel.h - MARGIN * 3.).max(0.),
    );
    Fit::new(area, assets.map_size())
}

#[derive(Debug)]
enum Phase {
    /// The clock is running and the player can place a guess
    Guessing,

    /// Showing the result of the last round
    RoundOver(RoundOutcome),
}

#[derive(Debug)]
struct Notice {
    text: String,
    shown: Instant,
}

/// The game screen.
#[derive(Debug)]
pub struct PlayScreen {
    session: Session,
    photo: Option<Image>,

    /// Time accumulated towards the next clock tick
    clock: Duration,

    phase: Phase,
    hint: Option<&'static str>,
    notice: Option<Notice>,

    /// Message carried to the results screen
    failure: Option<String>,
}

impl PlayScreen {
    pub fn new(ctx: &mut Context, session: Session) -> Self {
        let mut play = Self {
            session,
            photo: None,
            clock: Duration::ZERO,
            phase: Phase::Guessing,
            hint: None,
            notice: None,
            failure: None,
        };
        play.next_round(ctx);
        play
    }

    /// Start the next round and load its photograph. A photo that can not be loaded
    /// ends the session.
    fn next_round(&mut self, ctx: &mut Context) {
        self.phase = Phase::Guessing;
        self.clock = Duration::ZERO;
        self.hint = None;
        self.notice = None;
        self.photo = None;

        let Some(round) = self.session.start_round(&mut rand::thread_rng()) else {
            return;
        };

        let photo = round.location.photo.clone();
        match assets::load_photo(ctx, &photo) {
            Ok(image) => self.photo = Some(image),
            Err(err) => {
                self.failure = Some(format!("Error loading image {photo}: {err}"));
                self.session.finish();
            }
        }
    }

    fn show_notice(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            shown: Instant::now(),
        });
    }

    pub fn update(&mut self, ctx: &mut Context) -> Option<Transition> {
        if self.session.is_finished() {
            return Some(Transition::GameOver {
                summary: self.session.summary(),
                notice: self.failure.take(),
            });
        }

        if !matches!(self.phase, Phase::Guessing) {
            return None;
        }

        self.clock += ctx.time.delta();
        while self.clock >= Duration::from_secs(1) {
            self.clock -= Duration::from_secs(1);

            if let Some(outcome) = self.session.tick() {
                info!("Time's up at {}", outcome.location().name);
                self.phase = Phase::RoundOver(outcome);
                break;
            }
        }

        if let Some(notice) = &self.notice {
            if notice.shown.elapsed() >= NOTICE_DURATION {
                self.notice = None;
            }
        }

        None
    }

    pub fn click(
        &mut self,
        ctx: &mut Context,
        theme: &Theme,
        assets: &Assets,
        pixel: Point2<f32>,
    ) -> Option<Transition> {
        let layout = Layout::new(ctx.gfx.drawable_size(), theme);

        match self.phase {
            Phase::RoundOver(_) => {
                if layout.proceed.contains(pixel) {
                    self.next_round(ctx);
                }
            }
            Phase::Guessing => {
                if layout.hint.contains(pixel) {
                    self.buy_hint();
                } else if layout.submit.contains(pixel) {
                    self.submit();
                } else if let Some(coord) = layout.map_fit(assets).to_image(pixel) {
                    match self.session.place_guess(coord) {
                        Ok(()) => debug!("Guess placed at ({}, {})", coord.x, coord.y),
                        Err(err) => debug!("Ignoring click on map: {err}"),
                    }
                }
            }
        }

        None
    }

    pub fn key(&mut self, ctx: &mut Context, key: KeyCode) -> Option<Transition> {
        let round_over = matches!(self.phase, Phase::RoundOver(_));

        match key {
            KeyCode::Escape => {
                info!("{} left the game", self.session.username());
                return Some(Transition::MainMenu);
            }
            KeyCode::Return | KeyCode::Space if round_over => self.next_round(ctx),
            KeyCode::Return if !round_over => self.submit(),
            KeyCode::H if !round_over => self.buy_hint(),
            _ => {}
        }
        None
    }

    fn buy_hint(&mut self) {
        match self.session.use_hint() {
            Ok(hint) => {
                debug!("Hint bought for {}", self.session.username());
                self.hint = Some(hint);
            }
            Err(err) => self.show_notice(err.to_string()),
        }
    }

    fn submit(&mut self) {
        match self.session.submit() {
            Ok(outcome) => self.phase = Phase::RoundOver(outcome),
            Err(err) => self.show_notice(err.to_string()),
        }
    }
}

/// Drawing logic impls
impl PlayScreen {
    pub fn draw(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        theme: &Theme,
        assets: &Assets,
    ) -> GameResult {
        let layout = Layout::new(ctx.gfx.drawable_size(), theme);

        self.draw_status(ctx, canvas, theme, layout.status)?;
        self.draw_photo(ctx, canvas, theme, layout.photo)?;
        self.draw_map(ctx, canvas, theme, assets, layout.map)?;

        let hint_ready = self
            .session
            .round()
            .map_or(false, |round| round.hint == HintState::Ready);
        let guessing = matches!(self.phase, Phase::Guessing);
        layout.hint.draw(ctx, canvas, theme, guessing && hint_ready)?;
        layout.submit.draw(ctx, canvas, theme, guessing)?;

        if let Some(notice) = &self.notice {
            let text = widget::label(notice.text.as_str(), 20., theme.danger());
            widget::draw_centered(
                ctx,
                canvas,
                &text,
                Point2 {
                    x: layout.map.x + layout.map.w * 0.5,
                    y: layout.map.y - MARGIN * 0.5,
                },
            );
        }

        if let Phase::RoundOver(outcome) = &self.phase {
            self.draw_round_over(ctx, canvas, theme, &layout, outcome)?;
        }

        Ok(())
    }

    fn draw_status(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        theme: &Theme,
        rect: Rect,
    ) -> GameResult {
        widget::draw_card(ctx, canvas, rect, theme.card())?;

        let rules = self.session.rules();
        let round = self.session.round();

        let round_no = round.map_or(self.session.rounds_completed(), |r| r.number);
        let timer = round.map_or(0, |r| r.time_left);
        let hint = match round.map(|r| r.hint) {
            Some(HintState::Locked(remaining)) => format!("{remaining}s"),
            Some(HintState::Ready) => "Ready!".to_string(),
            Some(HintState::Used) | None => "Used".to_string(),
        };

        let timer_color = if timer <= 10 {
            theme.danger()
        } else {
            theme.text()
        };

        let cells = [
            ("PLAYER", self.session.username().to_string(), theme.text()),
            ("ROUND", format!("{}/{}", round_no, rules.rounds), theme.text()),
            ("SCORE", self.session.total_score().to_string(), theme.success()),
            ("TIME", format!("{timer}s"), timer_color),
            ("HINT", hint, theme.warning()),
        ];

        let cell_w = rect.w / cells.len() as f32;
        for (i, (caption, value, color)) in cells.into_iter().enumerate() {
            let x = rect.x + cell_w * (i as f32 + 0.5);

            let caption = widget::label(caption, 14., theme.text_secondary());
            widget::draw_centered(ctx, canvas, &caption, Point2 { x, y: rect.y + 20. });

            let value = widget::label(value, 24., color);
            widget::draw_centered(ctx, canvas, &value, Point2 { x, y: rect.y + 48. });
        }

        Ok(())
    }

    fn draw_photo(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        theme: &Theme,
        rect: Rect,
    ) -> GameResult {
        widget::draw_card(ctx, canvas, rect, theme.card())?;

        let inner = inset(rect, MARGIN);
        match &self.photo {
            Some(photo) => {
                let fit = Fit::new(inner, (photo.width() as f32, photo.height() as f32));
                canvas.draw(
                    photo,
                    DrawParam::default().dest(fit.origin).scale(fit.draw_scale()),
                );
            }
            None => {
                let text = widget::label("No photo", 24., theme.text_secondary());
                widget::draw_centered(ctx, canvas, &text, widget::center(inner));
            }
        }

        if let Some(hint) = self.hint {
            let text = widget::label(hint, 18., theme.warning());
            let (_, h) = widget::text_size(ctx, &text);
            canvas.draw(
                &text,
                DrawParam::default().dest(Point2 {
                    x: inner.x,
                    y: inner.y + inner.h - h,
                }),
            );
        }

        Ok(())
    }

    fn draw_map(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        theme: &Theme,
        assets: &Assets,
        rect: Rect,
    ) -> GameResult {
        widget::draw_card(ctx, canvas, rect, theme.card())?;

        let title = widget::label("CLICK ON MAP TO GUESS", 16., theme.text());
        widget::draw_centered(
            ctx,
            canvas,
            &title,
            Point2 {
                x: rect.x + rect.w * 0.5,
                y: rect.y + MARGIN,
            },
        );

        let fit = map_fit(rect, assets);
        canvas.draw(
            &assets.map,
            DrawParam::default().dest(fit.origin).scale(fit.draw_scale()),
        );

        let guess = match &self.phase {
            Phase::Guessing => self.session.round().and_then(|r| r.guess),
            Phase::RoundOver(RoundOutcome::Guessed { guess, .. }) => Some(*guess),
            Phase::RoundOver(RoundOutcome::TimedOut { .. }) => None,
        };

        if let Phase::RoundOver(outcome) = &self.phase {
            let actual = fit.to_screen(outcome.location().coord());
            if let Some(guess) = guess.filter(|g| *g != outcome.location().coord()) {
                let line = graphics::Mesh::new_line(
                    ctx,
                    &[fit.to_screen(guess), actual],
                    2.,
                    theme.text_secondary(),
                )?;
                canvas.draw(&line, DrawParam::default());
            }
            draw_marker(ctx, canvas, actual, theme.success())?;
        }

        if let Some(guess) = guess {
            draw_marker(ctx, canvas, fit.to_screen(guess), theme.danger())?;
        }

        Ok(())
    }

    fn draw_round_over(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        theme: &Theme,
        layout: &Layout,
        outcome: &RoundOutcome,
    ) -> GameResult {
        let (w, h) = ctx.gfx.drawable_size();
        let card = Rect::new(w * 0.5 - 250., h * 0.5 - 170., 500., 360.);
        widget::draw_card(ctx, canvas, card, theme.card())?;

        let location = &outcome.location().name;
        let (title, lines) = match outcome {
            RoundOutcome::Guessed {
                distance, points, ..
            } => (
                format!("ROUND {} RESULTS", self.session.rounds_completed()),
                vec![
                    format!("Correct Location: {location}"),
                    format!("Your Guess: {distance:.0} pixels away"),
                    format!("Points Earned: {points} points"),
                    format!("Total Score: {} points", self.session.total_score()),
                ],
            ),
            RoundOutcome::TimedOut { .. } => (
                "TIME'S UP!".to_string(),
                vec![
                    format!("Correct Location: {location}"),
                    "No points earned for this round.".to_string(),
                ],
            ),
        };

        let center_x = card.x + card.w * 0.5;
        let title = widget::label(title, 28., theme.primary());
        widget::draw_centered(ctx, canvas, &title, Point2 { x: center_x, y: card.y + 40. });

        for (i, line) in lines.into_iter().enumerate() {
            let text = widget::label(line, 20., theme.text());
            widget::draw_centered(
                ctx,
                canvas,
                &text,
                Point2 {
                    x: center_x,
                    y: card.y + 100. + i as f32 * 36.,
                },
            );
        }

        layout.proceed.draw(ctx, canvas, theme, true)
    }
}

fn draw_marker(
    ctx: &mut Context,
    canvas: &mut Canvas,
    at: Point2<f32>,
    color: Color,
) -> GameResult {
    let dot = graphics::Mesh::new_circle(
        ctx,
        graphics::DrawMode::fill(),
        at,
        MARKER_RADIUS,
        0.1,
        color,
    )?;
    let ring = graphics::Mesh::new_circle(
        ctx,
        graphics::DrawMode::stroke(2.),
        at,
        MARKER_RADIUS,
        0.1,
        Color::WHITE,
    )?;
    canvas.draw(&dot, DrawParam::default());
    canvas.draw(&ring, DrawParam::default());
    Ok(())
}

#[inline]
fn inset(rect: Rect, by: f32) -> Rect {
    Rect::new(
        rect.x + by,
        rect.y + by,
        (rect.w - by * 2.).max(0.),
        (rect.h - by * 2.).max(0.),
    )
}
