//! Round sequencing for a single player's game.

use crate::config::Rules;
use crate::error::{HintError, RoundError, UsernameError};
use crate::location::Location;
use crate::score::{self, Coord, Rating};
use log::{debug, info};
use rand::Rng;

/// Longest accepted username
pub const MAX_USERNAME_LEN: usize = 12;

/// Trim and check a username typed by the player.
pub fn validate_username(raw: &str) -> Result<String, UsernameError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(UsernameError::Empty);
    }
    if name.chars().count() > MAX_USERNAME_LEN {
        return Err(UsernameError::TooLong {
            max: MAX_USERNAME_LEN,
        });
    }
    // The leaderboard file has no escaping
    if name.contains(',') {
        return Err(UsernameError::Comma);
    }

    Ok(name.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintState {
    /// Counting down, holds the seconds left
    Locked(u32),
    Ready,
    Used,
}

/// The round currently being played.
#[derive(Debug, Clone)]
pub struct Round {
    /// 1 based
    pub number: usize,
    pub location: Location,
    pub guess: Option<Coord>,
    pub time_left: u32,
    pub hint: HintState,
}

impl Round {
    #[inline]
    pub fn actual(&self) -> Coord {
        self.location.coord()
    }
}

/// How a round ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    Guessed {
        location: Location,
        guess: Coord,
        distance: f64,
        points: i32,
    },
    TimedOut {
        location: Location,
    },
}

impl RoundOutcome {
    pub fn points(&self) -> i32 {
        match self {
            Self::Guessed { points, .. } => *points,
            Self::TimedOut { .. } => 0,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Self::Guessed { location, .. } | Self::TimedOut { location } => location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub username: String,
    pub total_score: i32,
    pub rounds_completed: usize,
    pub rounds_total: usize,
    pub rating: Rating,
}

#[derive(Debug)]
pub struct Session {
    username: String,
    rules: Rules,

    /// Locations not yet played this session
    deck: Vec<Location>,

    round: Option<Round>,
    rounds_completed: usize,
    total_score: i32,

    /// Set once the session can not start any more rounds
    finished: bool,
}

impl Session {
    pub fn new(username: String, rules: Rules, locations: Vec<Location>) -> Self {
        info!(
            "Starting a {} round game for {username} with {} locations",
            rules.rounds,
            locations.len()
        );
        Self {
            username,
            rules,
            deck: locations,
            round: None,
            rounds_completed: 0,
            total_score: 0,
            finished: false,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    pub fn rounds_completed(&self) -> usize {
        self.rounds_completed
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Draw the next location. Returns `None` and finishes the session when all
    /// rounds have been played or no unplayed locations remain.
    pub fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Round> {
        if self.finished || self.deck.is_empty() || self.rounds_completed >= self.rules.rounds {
            self.finish();
            return None;
        }

        let index = rng.gen_range(0..self.deck.len());
        let location = self.deck.remove(index);
        debug!("Round {} at {}", self.rounds_completed + 1, location.name);

        self.round = Some(Round {
            number: self.rounds_completed + 1,
            location,
            guess: None,
            time_left: self.rules.round_seconds,
            hint: if self.rules.hint_delay == 0 {
                HintState::Ready
            } else {
                HintState::Locked(self.rules.hint_delay)
            },
        });

        self.round.as_ref()
    }

    /// End the session early, e.g. when a round can not be shown.
    pub fn finish(&mut self) {
        if !self.finished {
            info!(
                "Game over for {}: {} points in {} round(s)",
                self.username, self.total_score, self.rounds_completed
            );
        }
        self.round = None;
        self.finished = true;
    }

    /// Record or move the player's guess.
    pub fn place_guess(&mut self, coord: Coord) -> Result<(), RoundError> {
        let round = self.round.as_mut().ok_or(RoundError::NotRunning)?;
        round.guess = Some(coord);
        Ok(())
    }

    /// Advance the clock by one second. Returns the outcome if time ran out.
    pub fn tick(&mut self) -> Option<RoundOutcome> {
        let round = self.round.as_mut()?;

        round.time_left = round.time_left.saturating_sub(1);
        if let HintState::Locked(remaining) = round.hint {
            round.hint = match remaining.saturating_sub(1) {
                0 => HintState::Ready,
                n => HintState::Locked(n),
            };
        }

        if round.time_left > 0 {
            return None;
        }

        let location = self.end_round()?.location;
        debug!("Time ran out at {}", location.name);
        Some(RoundOutcome::TimedOut { location })
    }

    /// Score the current guess and end the round.
    pub fn submit(&mut self) -> Result<RoundOutcome, RoundError> {
        let round = self.round.as_ref().ok_or(RoundError::NotRunning)?;
        let guess = round.guess.ok_or(RoundError::NoGuess)?;

        let actual = round.actual();
        let points = score::score(actual, guess, round.time_left);
        let distance = score::distance(actual, guess);

        let location = self.end_round().ok_or(RoundError::NotRunning)?.location;
        self.total_score += points;

        debug!(
            "Guess for {} was {distance:.0}px away: {points} points",
            location.name
        );

        Ok(RoundOutcome::Guessed {
            location,
            guess,
            distance,
            points,
        })
    }

    /// Buy the hint for the current round.
    pub fn use_hint(&mut self) -> Result<&'static str, HintError> {
        let cost = self.rules.hint_cost;
        let round = self.round.as_mut().ok_or(HintError::NotRunning)?;

        match round.hint {
            HintState::Locked(remaining) => return Err(HintError::NotReady { remaining }),
            HintState::Used => return Err(HintError::AlreadyUsed),
            HintState::Ready => {}
        }

        if self.total_score < cost {
            return Err(HintError::InsufficientPoints { cost });
        }

        self.total_score -= cost;
        round.hint = HintState::Used;
        Ok(round.location.hint())
    }

    pub fn summary(&self) -> Summary {
        Summary {
            username: self.username.clone(),
            total_score: self.total_score,
            rounds_completed: self.rounds_completed,
            rounds_total: self.rules.rounds,
            rating: Rating::for_total(self.total_score),
        }
    }

    fn end_round(&mut self) -> Option<Round> {
        let round = self.round.take()?;
        self.rounds_completed += 1;
        Some(round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rules() -> Rules {
        Rules {
            rounds: 3,
            round_seconds: 30,
            hint_delay: 10,
            hint_cost: 50,
        }
    }

    fn session() -> Session {
        Session::new("tester".to_string(), rules(), location::campus())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn usernames() {
        assert_eq!(validate_username("  sara "), Ok("sara".to_string()));
        assert_eq!(validate_username("   "), Err(UsernameError::Empty));
        assert_eq!(
            validate_username("abcdefghijklm"),
            Err(UsernameError::TooLong { max: 12 })
        );
        assert_eq!(validate_username("abcdefghijkl"), Ok("abcdefghijkl".to_string()));
        assert_eq!(validate_username("a,b"), Err(UsernameError::Comma));
    }

    #[test]
    fn exact_guess_scores_with_time_bonus() {
        let mut s = session();
        let mut rng = rng();
        let actual = s.start_round(&mut rng).unwrap().actual();

        for _ in 0..5 {
            assert!(s.tick().is_none());
        }
        s.place_guess(actual).unwrap();

        let outcome = s.submit().unwrap();
        assert_eq!(outcome.points(), 1000 + 25 * 3);
        assert_eq!(s.total_score(), 1075);
        assert_eq!(s.rounds_completed(), 1);
        assert!(s.round().is_none());
    }

    #[test]
    fn submit_without_guess_keeps_round() {
        let mut s = session();
        s.start_round(&mut rng());

        assert_eq!(s.submit(), Err(RoundError::NoGuess));
        assert!(s.round().is_some());
        assert_eq!(s.rounds_completed(), 0);
    }

    #[test]
    fn guess_between_rounds_is_rejected() {
        let mut s = session();
        let actual = s.start_round(&mut rng()).unwrap().actual();
        s.place_guess(actual).unwrap();
        s.submit().unwrap();

        assert_eq!(s.place_guess(Coord::new(3, 3)), Err(RoundError::NotRunning));
        assert!(s.round().is_none());
    }

    #[test]
    fn guess_can_be_moved_before_submit() {
        let mut s = session();
        let actual = s.start_round(&mut rng()).unwrap().actual();

        s.place_guess(Coord::new(0, 0)).unwrap();
        s.place_guess(actual).unwrap();

        match s.submit().unwrap() {
            RoundOutcome::Guessed { guess, distance, .. } => {
                assert_eq!(guess, actual);
                assert_eq!(distance, 0.);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn timeout_scores_zero_even_with_unsubmitted_guess() {
        let mut s = session();
        let actual = s.start_round(&mut rng()).unwrap().actual();
        s.place_guess(actual).unwrap();

        for _ in 0..29 {
            assert!(s.tick().is_none());
        }
        let outcome = s.tick().unwrap();

        assert!(matches!(outcome, RoundOutcome::TimedOut { .. }));
        assert_eq!(outcome.points(), 0);
        assert_eq!(s.total_score(), 0);
        assert_eq!(s.rounds_completed(), 1);
        assert!(s.tick().is_none());
    }

    #[test]
    fn hint_unlocks_after_delay_and_costs_points() {
        let mut s = session();
        let mut rng = rng();

        // Earn some points first
        let actual = s.start_round(&mut rng).unwrap().actual();
        s.place_guess(actual).unwrap();
        s.submit().unwrap();
        let before = s.total_score();

        s.start_round(&mut rng);
        assert_eq!(s.use_hint(), Err(HintError::NotReady { remaining: 10 }));
        for _ in 0..9 {
            s.tick();
        }
        assert_eq!(s.use_hint(), Err(HintError::NotReady { remaining: 1 }));
        s.tick();

        let expected = s.round().unwrap().location.hint();
        assert_eq!(s.use_hint(), Ok(expected));
        assert_eq!(s.total_score(), before - 50);
        assert_eq!(s.use_hint(), Err(HintError::AlreadyUsed));
    }

    #[test]
    fn hint_needs_enough_points() {
        let mut s = session();
        s.start_round(&mut rng());
        for _ in 0..10 {
            s.tick();
        }

        assert_eq!(s.use_hint(), Err(HintError::InsufficientPoints { cost: 50 }));
        assert_eq!(s.round().unwrap().hint, HintState::Ready);
        assert_eq!(s.total_score(), 0);
    }

    #[test]
    fn session_ends_after_configured_rounds_without_repeats() {
        let mut s = session();
        let mut rng = rng();
        let mut seen = Vec::new();

        while let Some(round) = s.start_round(&mut rng) {
            seen.push(round.location.name.clone());
            let guess = round.actual();
            s.place_guess(guess).unwrap();
            s.submit().unwrap();
        }

        assert_eq!(seen.len(), 3);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 3);
        assert!(s.is_finished());

        let summary = s.summary();
        assert_eq!(summary.rounds_completed, 3);
        assert_eq!(summary.rounds_total, 3);
        assert_eq!(summary.total_score, 3 * 1090);
        assert_eq!(summary.rating, Rating::Good);
    }

    #[test]
    fn session_ends_when_deck_runs_out() {
        let locations = location::campus().into_iter().take(2).collect();
        let mut s = Session::new("tester".to_string(), rules(), locations);
        let mut rng = rng();

        assert!(s.start_round(&mut rng).is_some());
        while s.tick().is_none() {}
        assert!(s.start_round(&mut rng).is_some());
        while s.tick().is_none() {}
        assert!(s.start_round(&mut rng).is_none());

        assert!(s.is_finished());
        assert_eq!(s.summary().rounds_completed, 2);
    }

    #[test]
    fn finish_early_stops_rounds() {
        let mut s = session();
        let mut rng = rng();
        s.start_round(&mut rng);
        s.finish();

        assert!(s.round().is_none());
        assert!(s.start_round(&mut rng).is_none());
        assert_eq!(s.place_guess(Coord::new(1, 1)), Err(RoundError::NotRunning));
        assert_eq!(s.use_hint(), Err(HintError::NotRunning));
    }
}
