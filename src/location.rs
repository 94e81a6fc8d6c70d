use crate::score::Coord;
use serde::Deserialize;

/// A campus spot that can be the subject of a round.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub name: String,

    /// Resource path of the photograph shown to the player
    pub photo: String,

    /// Where the spot is on the campus map image
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub fn new(name: &str, photo: &str, x: i32, y: i32) -> Self {
        Self {
            name: name.to_string(),
            photo: photo.to_string(),
            x,
            y,
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    /// Clue revealed when the player buys a hint.
    pub fn hint(&self) -> &'static str {
        HINTS
            .iter()
            .find(|(keyword, _)| self.name.contains(keyword))
            .map(|(_, hint)| *hint)
            .unwrap_or("Hint: An important location on campus.")
    }
}

/// Keyword to clue, checked in order.
const HINTS: [(&str, &str); 10] = [
    ("Bus Stop", "Hint: Where students wait for campus shuttles."),
    ("Cafe", "Hint: Place to grab a quick bite and hang out."),
    (
        "CS Lawn",
        "Hint: A green area often associated with the Computer Science department.",
    ),
    (
        "CS View",
        "Hint: Offers a specific perspective near the Computer Science block.",
    ),
    (
        "Kia ker raha ha bhai?",
        "Hint: This is a unique, perhaps informal, campus spot.",
    ),
    (
        "N-Block",
        "Hint: One of the main academic blocks, starting with 'N'.",
    ),
    ("CUI Logo", "Hint: You'll find the university's emblem here."),
    ("Mosque", "Hint: The campus prayer area."),
    ("Parking", "Hint: Where you'd leave your vehicle."),
    (
        "Physics",
        "Hint: The building dedicated to the study of physical sciences.",
    ),
];

/// The built in campus catalogue.
pub fn campus() -> Vec<Location> {
    vec![
        Location::new("Bus Stop", "/bus_stop.png", 412, 414),
        Location::new("Cafe Front", "/cafe_front.png", 187, 347),
        Location::new("CS Lawn", "/cs_lawn.png", 205, 103),
        Location::new("CS Lawn (2)", "/cs_lawn (2).png", 125, 241),
        Location::new("CS View", "/cs_view.png", 239, 197),
        Location::new("Kia ker raha ha bhai?", "/kia ker raha ha bhai.png", 105, 255),
        Location::new("N-Block Front", "/nblock_front.png", 71, 268),
        Location::new("CUI Logo", "/near_logo.png", 297, 69),
        Location::new("Near Mosque", "/near_mosque.png", 278, 54),
        Location::new("Near Parking", "/near_parking.png", 99, 200),
        Location::new("Physics Block", "/physics block.png", 246, 178),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_names_are_unique() {
        let locations = campus();
        assert_eq!(locations.len(), 11);
        for (i, a) in locations.iter().enumerate() {
            for b in locations.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn hints_match_by_keyword() {
        let locations = campus();
        let find = |name: &str| locations.iter().find(|l| l.name == name).unwrap();

        assert_eq!(find("Cafe Front").hint(), "Hint: Place to grab a quick bite and hang out.");
        assert_eq!(find("CS Lawn (2)").hint(), find("CS Lawn").hint());
        assert_eq!(find("Near Mosque").hint(), "Hint: The campus prayer area.");
        assert_eq!(
            Location::new("Library", "/library.png", 0, 0).hint(),
            "Hint: An important location on campus."
        );
    }

    #[test]
    fn coord_uses_map_position() {
        let bus = &campus()[0];
        assert_eq!(bus.coord(), Coord::new(412, 414));
    }
}
