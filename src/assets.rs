use crate::config::AssetConfig;
use ggez::graphics::Image;
use ggez::{Context, GameResult};
use log::{error, info, warn};

/// Images shared by every screen.
#[derive(Debug)]
pub struct Assets {
    pub map: Image,
    pub background: Option<Image>,
}

impl Assets {
    /// The campus map is required, the background is optional.
    pub fn load(ctx: &mut Context, config: &AssetConfig) -> GameResult<Self> {
        let map = Image::from_path(ctx, &config.map).map_err(|err| {
            error!("Failed to load campus map {}: {err}", config.map);
            err
        })?;
        info!("Loaded campus map {} ({}x{})", config.map, map.width(), map.height());

        let background = match &config.background {
            Some(path) => match Image::from_path(ctx, path) {
                Ok(image) => Some(image),
                Err(err) => {
                    warn!("No background image at {path} (Using theme color): {err}");
                    None
                }
            },
            None => None,
        };

        Ok(Self { map, background })
    }

    pub fn map_size(&self) -> (f32, f32) {
        (self.map.width() as f32, self.map.height() as f32)
    }
}

/// Load the photograph of a round.
pub fn load_photo(ctx: &mut Context, path: &str) -> GameResult<Image> {
    Image::from_path(ctx, path).map_err(|err| {
        error!("Failed to load photo {path}: {err}");
        err
    })
}
