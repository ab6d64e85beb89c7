use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    pub const fn grey(level: u8) -> Color {
        Color { red: level, green: level, blue: level }
    }

    pub fn components(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Text colours for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub unit: Color,
}

impl Palette {
    /// Used while there is no fix, or no idea whether it is day.
    pub const NEUTRAL: Palette = Palette {
        text: Color::grey(0x00),
        unit: Color::grey(0x00),
    };
    pub const DAY: Palette = Palette {
        text: Color::grey(0xFF),
        unit: Color::grey(0x88),
    };
    pub const NIGHT: Palette = Palette {
        text: Color::grey(0xBB),
        unit: Color::grey(0x66),
    };
}

/// Everything a renderer needs to draw the display once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub heading: String,
    pub speed: String,
    pub unit: String,
    pub date: String,
    pub time: String,
    pub palette: Palette,
}
