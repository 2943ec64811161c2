use std::fmt;

/// Number of distinct concepts in the alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// A single glyph shown in a circle.
///
/// Only ASCII letters are valid. The letter's *concept* is its uppercase form,
/// so `a` and `A` are the same concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Letter(char);

impl Letter {
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_alphabetic().then_some(Self(c))
    }

    pub fn upper(concept: char) -> Self {
        Self(concept.to_ascii_uppercase())
    }

    pub fn lower(concept: char) -> Self {
        Self(concept.to_ascii_lowercase())
    }

    pub fn glyph(&self) -> char {
        self.0
    }

    pub fn concept(&self) -> char {
        self.0.to_ascii_uppercase()
    }

    pub fn is_lowercase(&self) -> bool {
        self.0.is_ascii_lowercase()
    }

    /// Case-insensitive comparison against a concept.
    pub fn matches(&self, concept: char) -> bool {
        self.concept() == concept.to_ascii_uppercase()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All 26 uppercase concepts, `A` through `Z`.
pub fn concepts() -> impl Iterator<Item = char> {
    'A'..='Z'
}

/// The set of glyphs a tier draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterPool {
    letters: Vec<Letter>,
}

impl LetterPool {
    pub fn new(use_lowercase_variants: bool) -> Self {
        let mut letters: Vec<Letter> = concepts().map(Letter::upper).collect();
        if use_lowercase_variants {
            letters.extend(concepts().map(Letter::lower));
        }
        Self { letters }
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn into_letters(self) -> Vec<Letter> {
        self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}
