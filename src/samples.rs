use std::collections::VecDeque;

use crate::simulation::UniformSource;
use crate::types::Dataset;

/// Cap on the visible strip; the oldest glyph leaves first.
pub const MAX_VISIBLE: usize = 8;

const LOW_QUALITY_GLYPH: &str = "\u{2753}";
const MEDIUM_QUALITY_GLYPH: &str = "\u{1f504}";

/// FIFO strip of "generated" sample glyphs. Appending never touches the
/// training run.
#[derive(Clone, Debug, Default)]
pub struct SampleStrip {
    glyphs: VecDeque<&'static str>,
}

impl SampleStrip {
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.glyphs.iter().copied()
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
    }

    /// Appends one glyph for the quality band, evicting from the front first
    /// so the strip never holds more than [`MAX_VISIBLE`].
    pub fn generate(&mut self, dataset: Dataset, quality: f64, source: &mut impl UniformSource) {
        let glyph = if quality < 0.3 {
            LOW_QUALITY_GLYPH
        } else if quality < 0.6 {
            MEDIUM_QUALITY_GLYPH
        } else {
            let set = dataset.glyphs();
            set[(source.next_uniform() * set.len() as f64) as usize % set.len()]
        };

        while self.glyphs.len() >= MAX_VISIBLE {
            self.glyphs.pop_front();
        }
        self.glyphs.push_back(glyph);
    }
}
