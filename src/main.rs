use assets::Assets;
use config::Config;
use ggez::conf::{WindowMode, WindowSetup};
use ggez::event::{self, MouseButton};
use ggez::graphics;
use ggez::input::keyboard::KeyInput;
use ggez::mint::Point2;
use ggez::{Context, GameError, GameResult};
use how_to_play::HowToPlay;
use leaderboard::Leaderboard;
use log::{error, info};
use menu::MainMenu;
use play::PlayScreen;
use ranking::RankingScreen;
use results::ResultsScreen;
use session::{Session, Summary};
use simple_logger::SimpleLogger;

mod assets;
mod config;
mod error;
mod how_to_play;
mod leaderboard;
mod location;
mod menu;
mod play;
mod ranking;
mod results;
mod score;
mod session;
mod widget;

const TITLE: &str = "Campus Geo Guesser";

/// Which view is active. Screens that carry state own it.
#[derive(Debug)]
enum Screen {
    MainMenu,
    Playing(Box<PlayScreen>),
    Results(ResultsScreen),
    Leaderboard(RankingScreen),
    HowToPlay,
}

/// Requested by a screen in response to input.
#[derive(Debug)]
pub enum Transition {
    MainMenu,

    /// Back to the main menu with the name box open
    NewGame,

    StartGame(String),

    GameOver {
        summary: Summary,
        notice: Option<String>,
    },

    Leaderboard,
    HowToPlay,
    Quit,
}

struct Game {
    config: Config,
    assets: Assets,
    leaderboard: Leaderboard,

    main_menu: MainMenu,
    how_to_play: HowToPlay,

    screen: Screen,
}

impl Game {
    pub fn new(ctx: &mut Context, config: Config) -> Result<Self, GameError> {
        let assets = Assets::load(ctx, &config.assets)?;
        let leaderboard = Leaderboard::new(
            config.leaderboard.file.clone(),
            config.leaderboard.capacity,
        );
        info!("Using leaderboard {}", leaderboard.path().display());

        Ok(Self {
            assets,
            leaderboard,
            main_menu: MainMenu::new(),
            how_to_play: HowToPlay::new(&config.rules),
            screen: Screen::MainMenu,
            config,
        })
    }

    fn apply(&mut self, ctx: &mut Context, transition: Transition) {
        self.screen = match transition {
            Transition::MainMenu => Screen::MainMenu,
            Transition::NewGame => {
                self.main_menu.prompt_name();
                Screen::MainMenu
            }
            Transition::StartGame(username) => {
                let session = Session::new(
                    username,
                    self.config.rules,
                    self.config.locations.clone(),
                );
                Screen::Playing(Box::new(PlayScreen::new(ctx, session)))
            }
            Transition::GameOver {
                summary,
                mut notice,
            } => {
                if summary.rounds_completed > 0 {
                    if let Err(err) = self
                        .leaderboard
                        .add_score(&summary.username, summary.total_score)
                    {
                        error!("{err}");
                        notice.get_or_insert_with(|| format!("Could not save your score: {err}"));
                    }
                }
                Screen::Results(ResultsScreen::new(summary, notice))
            }
            Transition::Leaderboard => {
                Screen::Leaderboard(RankingScreen::new(self.leaderboard.clone()))
            }
            Transition::HowToPlay => Screen::HowToPlay,
            Transition::Quit => {
                info!("Goodbye");
                ctx.request_quit();
                return;
            }
        };
    }
}

impl event::EventHandler for Game {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let transition = match &mut self.screen {
            Screen::Playing(play) => play.update(ctx),
            _ => None,
        };

        if let Some(transition) = transition {
            self.apply(ctx, transition);
        }

        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let theme = self.config.theme;
        let mut canvas = graphics::Canvas::from_frame(ctx, Some(theme.background()));

        widget::draw_backdrop(ctx, &mut canvas, &self.assets, &theme)?;

        match &self.screen {
            Screen::MainMenu => self.main_menu.draw(ctx, &mut canvas, &theme)?,
            Screen::Playing(play) => play.draw(ctx, &mut canvas, &theme, &self.assets)?,
            Screen::Results(results) => results.draw(ctx, &mut canvas, &theme)?,
            Screen::Leaderboard(ranking) => ranking.draw(ctx, &mut canvas, &theme)?,
            Screen::HowToPlay => self.how_to_play.draw(ctx, &mut canvas, &theme)?,
        }

        canvas.finish(ctx)?;

        Ok(())
    }

    fn mouse_button_down_event(
        &mut self,
        ctx: &mut Context,
        button: MouseButton,
        x: f32,
        y: f32,
    ) -> Result<(), GameError> {
        if button != MouseButton::Left {
            return Ok(());
        }

        let pixel = Point2 { x, y };
        let theme = self.config.theme;

        let transition = match &mut self.screen {
            Screen::MainMenu => self.main_menu.click(ctx, &theme, pixel),
            Screen::Playing(play) => play.click(ctx, &theme, &self.assets, pixel),
            Screen::Results(results) => results.click(ctx, &theme, pixel),
            Screen::Leaderboard(ranking) => ranking.click(ctx, &theme, pixel),
            Screen::HowToPlay => self.how_to_play.click(ctx, &theme, pixel),
        };

        if let Some(transition) = transition {
            self.apply(ctx, transition);
        }
        Ok(())
    }

    fn key_down_event(
        &mut self,
        ctx: &mut Context,
        input: KeyInput,
        _repeated: bool,
    ) -> Result<(), GameError> {
        let Some(key) = input.keycode else {
            return Ok(());
        };

        let transition = match &mut self.screen {
            Screen::MainMenu => self.main_menu.key(key),
            Screen::Playing(play) => play.key(ctx, key),
            Screen::Results(results) => results.key(key),
            Screen::Leaderboard(ranking) => ranking.key(key),
            Screen::HowToPlay => self.how_to_play.key(key),
        };

        if let Some(transition) = transition {
            self.apply(ctx, transition);
        }
        Ok(())
    }

    fn text_input_event(&mut self, _ctx: &mut Context, character: char) -> Result<(), GameError> {
        if let Screen::MainMenu = self.screen {
            self.main_menu.text_input(character);
        }
        Ok(())
    }
}

pub fn main() -> GameResult {
    let config = config::load_config().unwrap_or_default();

    if let Err(err) = SimpleLogger::new().with_level(config.logging).init() {
        eprintln!("Failed to initialize logger: {err}");
    }

    info!("Starting {TITLE} v{}", env!("CARGO_PKG_VERSION"));

    let cb = ggez::ContextBuilder::new("campus-guesser", "campus")
        .window_setup(WindowSetup::default().title(TITLE))
        .window_mode(
            WindowMode::default()
                .dimensions(config.window.width, config.window.height)
                .resizable(true),
        )
        .add_resource_path(config.assets.resources.clone());
    let (mut ctx, event_loop) = cb.build()?;

    let state = Game::new(&mut ctx, config).map_err(|err| {
        error!("Failed to start: {err}");
        err
    })?;
    event::run(ctx, event_loop, state);
}
