use std::fmt;

/// Compass point for a heading, in 45 degree buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

// Lower bounds of every bucket except N, which takes whatever is left.
const BUCKETS: [(f64, Direction); 7] = [
    (22.5, Direction::NE),
    (67.5, Direction::E),
    (112.5, Direction::SE),
    (157.5, Direction::S),
    (202.5, Direction::SW),
    (247.5, Direction::W),
    (292.5, Direction::NW),
];

impl Direction {
    /// Heading is expected in [0, 360).
    pub fn from_heading(heading: f64) -> Direction {
        BUCKETS
            .iter()
            .find(|(lower, _)| heading >= *lower && heading < lower + 45.0)
            .map(|(_, direction)| *direction)
            .unwrap_or(Direction::N)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
