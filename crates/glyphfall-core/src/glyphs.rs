//! Glyph pool sampled by the rain.

use rand::Rng;

/// Default glyph pool: half-width katakana, digits, a hidden word and a few
/// symbols. Every glyph occupies a single terminal cell.
pub const DEFAULT_GLYPHS: &str =
    "ﾊﾐﾋｰｳｼﾅﾓﾆｻﾜﾂｵﾘｱﾎﾃﾏｹﾒｴｶｷﾑﾕﾗｾﾈｽﾀﾇﾍｦｲｸｺｿﾁﾄﾉﾌﾔﾖﾙﾚﾛﾝ012345789ZTHEMATRIX:.\"=*+-<>¦|╌ç";

/// A fixed, non-empty, ordered pool of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet(Vec<char>);

impl GlyphSet {
    /// Build a pool from `glyphs`. Returns `None` if the pool would be empty
    /// or contains a control character.
    pub fn new(glyphs: impl IntoIterator<Item = char>) -> Option<Self> {
        let glyphs: Vec<char> = glyphs.into_iter().collect();
        if glyphs.is_empty() || glyphs.iter().any(|c| c.is_control()) {
            return None;
        }
        Some(Self(glyphs))
    }

    /// Build a pool from the characters of `s`, in order.
    pub fn parse(s: &str) -> Option<Self> {
        Self::new(s.chars())
    }

    /// Sample one glyph uniformly.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.0[rng.random_range(0..self.0.len())]
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self(DEFAULT_GLYPHS.chars().collect())
    }
}

impl std::fmt::Display for GlyphSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
