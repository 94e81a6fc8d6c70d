use nalgebra::Point2;

/// A pixel position on the campus map image.
pub type Coord = Point2<i32>;

/// Points awarded for a perfect guess before penalties
pub const BASE_POINTS: i32 = 1000;

/// Penalty per pixel between the guess and the actual location
pub const PENALTY_PER_PIXEL: f64 = 0.5;

/// Bonus per second left on the clock
pub const TIME_BONUS_PER_SECOND: i32 = 3;

/// Straight line pixel distance between two map positions.
#[inline]
pub fn distance(actual: Coord, guess: Coord) -> f64 {
    nalgebra::distance(&actual.cast::<f64>(), &guess.cast::<f64>())
}

/// Score a single guess.
///
/// The distance penalty is floored before it is subtracted and the base part never
/// drops below zero, so the time bonus is always awarded in full.
pub fn score(actual: Coord, guess: Coord, time_left: u32) -> i32 {
    let penalty = (distance(actual, guess) * PENALTY_PER_PIXEL).floor() as i32;
    let bonus = i32::try_from(time_left)
        .unwrap_or(i32::MAX)
        .saturating_mul(TIME_BONUS_PER_SECOND);

    BASE_POINTS.saturating_sub(penalty).max(0).saturating_add(bonus)
}

/// How a finished game is rated on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Good,
    NiceTry,
}

impl Rating {
    pub fn for_total(total: i32) -> Self {
        if total > 5000 {
            Self::Excellent
        } else if total > 3000 {
            Self::Good
        } else {
            Self::NiceTry
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT WORK!",
            Self::Good => "GOOD JOB!",
            Self::NiceTry => "NICE TRY!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_guess_gets_full_points_and_bonus() {
        let p = Coord::new(100, 100);
        assert_eq!(score(p, p, 30), 1090);
    }

    #[test]
    fn penalty_is_half_the_distance() {
        assert_eq!(distance(Coord::new(0, 0), Coord::new(300, 400)), 500.);
        assert_eq!(score(Coord::new(0, 0), Coord::new(300, 400), 0), 750);
    }

    #[test]
    fn penalty_is_floored() {
        // distance 3, penalty 1.5 -> 1
        assert_eq!(score(Coord::new(0, 0), Coord::new(3, 0), 0), 999);
        // distance sqrt(2), penalty ~0.707 -> 0
        assert_eq!(score(Coord::new(0, 0), Coord::new(1, 1), 0), 1000);
    }

    #[test]
    fn far_guess_keeps_time_bonus() {
        let actual = Coord::new(0, 0);
        let guess = Coord::new(5000, 0);
        assert_eq!(score(actual, guess, 0), 0);
        assert_eq!(score(actual, guess, 10), 30);
    }

    #[test]
    fn monotonic_in_distance_and_time() {
        let actual = Coord::new(50, 50);
        let mut last = i32::MAX;
        for dx in (0..3000).step_by(7) {
            let s = score(actual, Coord::new(50 + dx, 50), 12);
            assert!(s <= last);
            last = s;
        }

        let guess = Coord::new(120, 80);
        let mut last = i32::MIN;
        for t in 0..=30 {
            let s = score(actual, guess, t);
            assert!(s >= last);
            last = s;
        }
    }

    #[test]
    fn huge_time_left_saturates() {
        let p = Coord::new(10, 10);
        assert_eq!(score(p, p, u32::MAX), i32::MAX);
        assert!(score(p, p, u32::MAX) >= score(p, p, 0));
        assert_eq!(score(p, Coord::new(5000, 10), i32::MAX as u32 + 1), i32::MAX);
    }

    #[test]
    fn ratings() {
        assert_eq!(Rating::for_total(5001), Rating::Excellent);
        assert_eq!(Rating::for_total(5000), Rating::Good);
        assert_eq!(Rating::for_total(3001), Rating::Good);
        assert_eq!(Rating::for_total(3000), Rating::NiceTry);
        assert_eq!(Rating::for_total(0), Rating::NiceTry);
    }
}
