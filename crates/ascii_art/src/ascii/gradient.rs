/// Characters ordered from visually densest to sparsest.
const DETAILED: &[u8] = b"$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// The glyph ramp used to encode luminance. Index 0 maps the darkest pixels.
pub const GLYPH_RAMP: GlyphRamp = GlyphRamp::new(DETAILED);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRamp {
    chars: &'static [u8],
}

impl GlyphRamp {
    /// Ramps are ASCII only and need at least two levels.
    pub const fn new(chars: &'static [u8]) -> Self {
        assert!(chars.len() >= 2, "glyph ramp must contain at least two characters");
        Self { chars }
    }

    pub(crate) const fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn darkest(&self) -> char {
        self.char_at(0)
    }

    pub fn lightest(&self) -> char {
        self.char_at(self.len() - 1)
    }

    /// Index for an 8-bit brightness, `floor(b / 255 * (len - 1))`.
    pub fn index_for(&self, brightness: u8) -> usize {
        usize::from(brightness) * (self.len() - 1) / 255
    }

    pub fn char_at(&self, index: usize) -> char {
        char::from(self.chars[index.min(self.len() - 1)])
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied().map(char::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_runs_dense_to_blank() {
        assert_eq!(GLYPH_RAMP.darkest(), '$');
        assert_eq!(GLYPH_RAMP.lightest(), ' ');
        assert_eq!(GLYPH_RAMP.len(), 70);
        assert!(GLYPH_RAMP.chars().all(|ch| ch.is_ascii()));
    }

    #[test]
    fn index_covers_full_range() {
        assert_eq!(GLYPH_RAMP.index_for(0), 0);
        assert_eq!(GLYPH_RAMP.index_for(255), GLYPH_RAMP.len() - 1);
        assert_eq!(GLYPH_RAMP.index_for(128), 34);
        assert_eq!(GLYPH_RAMP.char_at(34), 'n');
    }

    #[test]
    fn index_is_monotonic() {
        let indices: Vec<usize> = (0..=255u8).map(|b| GLYPH_RAMP.index_for(b)).collect();
        assert!(indices.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
