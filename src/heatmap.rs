use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: Rgb,
    pub card: Rgb,
    pub text: Rgb,
    pub primary: Rgb,
    pub border: Rgb,
    pub heat_low: Rgb,
    pub heat_high: Rgb,
}

const LIGHT: Palette = Palette {
    background: Rgb::new(242, 242, 242),
    card: Rgb::new(255, 255, 255),
    text: Rgb::new(28, 28, 30),
    primary: Rgb::new(0, 122, 255),
    border: Rgb::new(216, 216, 216),
    heat_low: Rgb::new(214, 245, 214),
    heat_high: Rgb::new(51, 153, 51),
};

const DARK: Palette = Palette {
    background: Rgb::new(1, 1, 1),
    card: Rgb::new(18, 18, 18),
    text: Rgb::new(229, 229, 231),
    primary: Rgb::new(10, 132, 255),
    border: Rgb::new(39, 39, 41),
    heat_low: Rgb::new(38, 77, 38),
    heat_high: Rgb::new(13, 25, 13),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme '{other}', expected 'light' or 'dark'")),
        }
    }
}

pub fn color_for(count: u32, max_count: u32, mode: ThemeMode) -> Rgb {
    let palette = mode.palette();
    if count == 0 || max_count == 0 {
        return palette.card;
    }

    let intensity = (f64::from(count) / f64::from(max_count)).min(1.0);
    let (low, high) = (palette.heat_low, palette.heat_high);
    Rgb {
        r: interpolate(low.r, high.r, intensity),
        g: interpolate(low.g, high.g, intensity),
        b: interpolate(low.b, high.b, intensity),
    }
}

fn interpolate(start: u8, end: u8, intensity: f64) -> u8 {
    let start = f64::from(start);
    let end = f64::from(end);
    (start + (end - start) * intensity).round() as u8
}
