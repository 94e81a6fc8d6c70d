use crate::config::{Rules, Theme};
use crate::score::{BASE_POINTS, PENALTY_PER_PIXEL, TIME_BONUS_PER_SECOND};
use crate::session::MAX_USERNAME_LEN;
use crate::widget::{self, Button};
use crate::Transition;
use ggez::graphics::{Canvas, DrawParam};
use ggez::input::keyboard::KeyCode;
use ggez::mint::{Point2, Vector2};
use ggez::{Context, GameResult};

/// A titled block of rules text.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub points: Vec<String>,
}

#[derive(Debug)]
pub struct HowToPlay {
    sections: Vec<Section>,
}

impl HowToPlay {
    pub fn new(rules: &Rules) -> Self {
        Self {
            sections: sections(rules),
        }
    }

    fn buttons((x, y): (f32, f32), theme: &Theme) -> [Button; 2] {
        let rects = widget::row(x * 0.5, y - 80., (260., 50.), 20., 2);
        [
            Button::new("BACK TO MAIN MENU", rects[0], theme.primary()),
            Button::new("START PLAYING NOW!", rects[1], theme.success()),
        ]
    }

    pub fn click(&self, ctx: &mut Context, theme: &Theme, pixel: Point2<f32>) -> Option<Transition> {
        let [back, start] = Self::buttons(ctx.gfx.drawable_size(), theme);

        if back.contains(pixel) {
            Some(Transition::MainMenu)
        } else if start.contains(pixel) {
            Some(Transition::NewGame)
        } else {
            None
        }
    }

    pub fn key(&self, key: KeyCode) -> Option<Transition> {
        match key {
            KeyCode::Escape => Some(Transition::MainMenu),
            _ => None,
        }
    }

    pub fn draw(&self, ctx: &mut Context, canvas: &mut Canvas, theme: &Theme) -> GameResult {
        let (x, y) = ctx.gfx.drawable_size();

        let title = widget::label("HOW TO PLAY", 40., theme.text());
        widget::draw_centered(ctx, canvas, &title, Point2 { x: x * 0.5, y: 50. });

        // Two columns of sections
        let column_w = (x - 90.) * 0.5;
        let mut tops = [100., 100.];

        for (i, section) in self.sections.iter().enumerate() {
            let column = i % 2;
            let left = 30. + column as f32 * (column_w + 30.);

            let heading = widget::label(section.title, 22., theme.warning());
            canvas.draw(&heading, DrawParam::default().dest(Point2 { x: left, y: tops[column] }));
            tops[column] += 34.;

            for point in section.points.iter() {
                let mut text = widget::label(format!("- {point}"), 17., theme.text());
                text.set_bounds(Vector2 { x: column_w, y: f32::INFINITY });
                text.set_wrap(true);

                let (_, h) = widget::text_size(ctx, &text);
                canvas.draw(&text, DrawParam::default().dest(Point2 { x: left, y: tops[column] }));
                tops[column] += h + 6.;
            }
            tops[column] += 18.;
        }

        for button in Self::buttons((x, y), theme) {
            button.draw(ctx, canvas, theme, true)?;
        }

        Ok(())
    }
}

fn lines(points: &[&str]) -> Vec<String> {
    points.iter().map(|p| p.to_string()).collect()
}

/// Rules text for the configured game.
pub fn sections(rules: &Rules) -> Vec<Section> {
    vec![
        Section {
            title: "Game Overview",
            points: lines(&[
                "Identify spots around the campus by looking at photographs and pinpointing their locations on the campus map.",
            ]),
        },
        Section {
            title: "How to Play",
            points: vec![
                format!("Enter your username (maximum {MAX_USERNAME_LEN} characters)"),
                "Study the location photograph on the left panel".to_string(),
                "Click on the campus map where you think the photo was taken".to_string(),
                "Click again to move your guess, then submit it".to_string(),
                format!(
                    "Each game has {} rounds of {} seconds",
                    rules.rounds, rules.round_seconds
                ),
            ],
        },
        Section {
            title: "Scoring System",
            points: vec![
                format!("Base Points: {BASE_POINTS} points per round"),
                format!("Distance Penalty: -{PENALTY_PER_PIXEL} points per pixel away from the actual location"),
                format!("Time Bonus: +{TIME_BONUS_PER_SECOND} points per second remaining"),
                "Formula: max(0, 1000 - distance_penalty) + time_bonus".to_string(),
                "No guess before the timer runs out scores nothing".to_string(),
            ],
        },
        Section {
            title: "Hint System",
            points: vec![
                format!("Hints become available after {} seconds", rules.hint_delay),
                format!("Each hint costs {} points from your current score", rules.hint_cost),
                "Provides helpful clues about the location".to_string(),
            ],
        },
        Section {
            title: "Tips for Success",
            points: lines(&[
                "Look for distinctive features in the photographs",
                "Act quickly to earn time bonuses",
                "Save hints for when you're really stuck",
            ]),
        },
        Section {
            title: "Performance Levels",
            points: lines(&[
                "Excellent: above 5000 points",
                "Good: above 3000 points",
                "Nice Try: 3000 points or less",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_text_follows_configuration() {
        let rules = Rules {
            rounds: 7,
            round_seconds: 45,
            hint_delay: 5,
            hint_cost: 80,
        };
        let sections = sections(&rules);
        let all: Vec<&String> = sections.iter().flat_map(|s| s.points.iter()).collect();

        assert!(all.iter().any(|p| p.as_str() == "Each game has 7 rounds of 45 seconds"));
        assert!(all.iter().any(|p| p.as_str() == "Hints become available after 5 seconds"));
        assert!(all
            .iter()
            .any(|p| p.as_str() == "Each hint costs 80 points from your current score"));
        assert!(all
            .iter()
            .any(|p| p.as_str() == "Distance Penalty: -0.5 points per pixel away from the actual location"));
    }
}
