use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tab group colors offered by the host browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabColor {
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
    Grey,
}

pub const PALETTE: [TabColor; 9] = [
    TabColor::Blue,
    TabColor::Red,
    TabColor::Yellow,
    TabColor::Green,
    TabColor::Pink,
    TabColor::Purple,
    TabColor::Cyan,
    TabColor::Orange,
    TabColor::Grey,
];

impl TabColor {
    pub fn as_str(self) -> &'static str {
        match self {
            TabColor::Blue => "blue",
            TabColor::Red => "red",
            TabColor::Yellow => "yellow",
            TabColor::Green => "green",
            TabColor::Pink => "pink",
            TabColor::Purple => "purple",
            TabColor::Cyan => "cyan",
            TabColor::Orange => "orange",
            TabColor::Grey => "grey",
        }
    }
}

impl fmt::Display for TabColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chooses the color of each new tab group
pub trait ColorPicker: Send {
    fn pick(&mut self) -> TabColor;
}

/// Uniform pick from [`PALETTE`] driven by any RNG
pub struct RandomColors<R> {
    rng: R,
}

impl<R: Rng + Send> RandomColors<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomColors<StdRng> {
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible sequence, for tests and dry runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> ColorPicker for RandomColors<R> {
    fn pick(&mut self) -> TabColor {
        PALETTE[self.rng.random_range(0..PALETTE.len())]
    }
}
