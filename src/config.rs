use crate::location::{self, Location};
use ggez::graphics::Color;
use log::LevelFilter;
use serde::Deserialize;
use std::{env, fs::read_to_string, path::Path, path::PathBuf};

/// Environment variable key to load the config from
const CONFIG_ENV_KEY: &str = "CAMPUS_GUESSER_CONFIG";

/// Config file looked up in the working directory
const CONFIG_FILE: &str = "config.json";

/// Load the config from the environment, then from disk. Problems are reported on
/// stderr because the logger is configured from the result.
pub fn load_config() -> Option<Config> {
    if let Ok(env) = env::var(CONFIG_ENV_KEY) {
        return match serde_json::from_str(&env) {
            Ok(value) => Some(value),
            Err(err) => {
                eprintln!("Failed to load env config (Using default): {:?}", err);
                None
            }
        };
    }

    let file = Path::new(CONFIG_FILE);
    if !file.exists() {
        return None;
    }

    let data = match read_to_string(file) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Failed to load config file (Using defaults): {:?}", err);
            return None;
        }
    };

    match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("Failed to load config file (Using default): {:?}", err);
            None
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LevelFilter,
    pub window: WindowConfig,
    pub rules: Rules,
    pub leaderboard: LeaderboardConfig,
    pub assets: AssetConfig,
    pub theme: Theme,
    pub locations: Vec<Location>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LevelFilter::Info,
            window: WindowConfig::default(),
            rules: Rules::default(),
            leaderboard: LeaderboardConfig::default(),
            assets: AssetConfig::default(),
            theme: Theme::default(),
            locations: location::campus(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.,
            height: 850.,
        }
    }
}

/// Round structure of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub rounds: usize,
    pub round_seconds: u32,
    /// Seconds into a round before a hint can be bought
    pub hint_delay: u32,
    pub hint_cost: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            rounds: 5,
            round_seconds: 30,
            hint_delay: 10,
            hint_cost: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub file: PathBuf,
    pub capacity: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("rankings.txt"),
            capacity: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory mounted as the ggez resource root
    pub resources: PathBuf,
    pub map: String,
    pub background: Option<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            resources: PathBuf::from("resources"),
            map: "/campus_map.png".to_string(),
            background: Some("/background.png".to_string()),
        }
    }
}

/// Colors used by every screen, as RGB triples.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub primary: [u8; 3],
    pub success: [u8; 3],
    pub warning: [u8; 3],
    pub danger: [u8; 3],
    pub background: [u8; 3],
    pub card: [u8; 3],
    pub text: [u8; 3],
    pub text_secondary: [u8; 3],
    pub accent: [u8; 3],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: [40, 124, 253],
            success: [34, 197, 94],
            warning: [249, 115, 22],
            danger: [239, 68, 68],
            background: [15, 23, 42],
            card: [30, 41, 59],
            text: [248, 250, 252],
            text_secondary: [148, 163, 184],
            accent: [168, 85, 247],
        }
    }
}

#[inline]
fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgb(r, g, b)
}

impl Theme {
    pub fn primary(&self) -> Color {
        rgb(self.primary)
    }

    pub fn success(&self) -> Color {
        rgb(self.success)
    }

    pub fn warning(&self) -> Color {
        rgb(self.warning)
    }

    pub fn danger(&self) -> Color {
        rgb(self.danger)
    }

    pub fn background(&self) -> Color {
        rgb(self.background)
    }

    pub fn card(&self) -> Color {
        rgb(self.card)
    }

    pub fn text(&self) -> Color {
        rgb(self.text)
    }

    pub fn text_secondary(&self) -> Color {
        rgb(self.text_secondary)
    }

    pub fn accent(&self) -> Color {
        rgb(self.accent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_game() {
        let config = Config::default();
        assert_eq!(config.rules, Rules::default());
        assert_eq!(config.rules.rounds, 5);
        assert_eq!(config.rules.round_seconds, 30);
        assert_eq!(config.leaderboard.capacity, 10);
        assert_eq!(config.leaderboard.file, PathBuf::from("rankings.txt"));
        assert_eq!(config.locations.len(), 11);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "logging": "debug", "rules": { "rounds": 3 } }"#).unwrap();

        assert_eq!(config.logging, LevelFilter::Debug);
        assert_eq!(config.rules.rounds, 3);
        assert_eq!(config.rules.hint_cost, 50);
        assert_eq!(config.theme.primary, [40, 124, 253]);
        assert_eq!(config.locations, location::campus());
    }

    #[test]
    fn custom_locations_replace_catalogue() {
        let config: Config = serde_json::from_str(
            r#"{ "locations": [ { "name": "Gate", "photo": "/gate.png", "x": 10, "y": 20 } ] }"#,
        )
        .unwrap();

        assert_eq!(config.locations, vec![Location::new("Gate", "/gate.png", 10, 20)]);
    }

    #[test]
    fn theme_colors_convert() {
        let theme = Theme::default();
        assert_eq!(theme.danger(), Color::from_rgb(239, 68, 68));
    }
}
