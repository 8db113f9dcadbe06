#[derive(Clone, Copy, Debug)]
pub struct Hyperparams {
    pub learning_rate: f64,
    pub noise_dimension: u32,
}

impl Default for Hyperparams {
    fn default() -> Self {
        Self {
            learning_rate: 0.0002,
            noise_dimension: 100,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dataset {
    Digits,
    Fashion,
}

impl Dataset {
    pub fn label(self) -> &'static str {
        match self {
            Dataset::Digits => "Handwritten digits",
            Dataset::Fashion => "Fashion items",
        }
    }

    pub fn glyphs(self) -> &'static [&'static str; 10] {
        match self {
            Dataset::Digits => &[
                "0\u{fe0f}\u{20e3}",
                "1\u{fe0f}\u{20e3}",
                "2\u{fe0f}\u{20e3}",
                "3\u{fe0f}\u{20e3}",
                "4\u{fe0f}\u{20e3}",
                "5\u{fe0f}\u{20e3}",
                "6\u{fe0f}\u{20e3}",
                "7\u{fe0f}\u{20e3}",
                "8\u{fe0f}\u{20e3}",
                "9\u{fe0f}\u{20e3}",
            ],
            Dataset::Fashion => &[
                "\u{1f455}",
                "\u{1f456}",
                "\u{1f457}",
                "\u{1f454}",
                "\u{1f45e}",
                "\u{1f460}",
                "\u{1f45c}",
                "\u{1f9e5}",
                "\u{1f97e}",
                "\u{1f45f}",
            ],
        }
    }
}

// `Complete` is terminal until a reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Ready,
    Training,
    Paused,
    Complete,
}

impl RunStatus {
    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Ready => "Ready",
            RunStatus::Training => "Training",
            RunStatus::Paused => "Paused",
            RunStatus::Complete => "Complete",
        }
    }
}
