//! The nucleotide alphabet and one-hot encoding of DNA sequences.

use ndarray::Array2;
use std::fmt;

use crate::error::HistoneError;

/// Number of symbols in the alphabet, i.e. the one-hot encoding width.
pub const ALPHABET_SIZE: usize = 5;

/// A nucleotide symbol. `N` is an unknown base.
///
/// The discriminant is the symbol's one-hot column: `A:0, C:1, T:2, G:3, N:4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Nucleotide {
    A = 0,
    C = 1,
    T = 2,
    G = 3,
    N = 4,
}

impl Nucleotide {
    /// All symbols, in one-hot column order.
    pub const ALL: [Nucleotide; ALPHABET_SIZE] = [
        Nucleotide::A,
        Nucleotide::C,
        Nucleotide::T,
        Nucleotide::G,
        Nucleotide::N,
    ];

    /// Parse an uppercase nucleotide character. Lowercase (soft-masked)
    /// bases are not accepted.
    pub fn from_char(character: char) -> Option<Self> {
        match character {
            'A' => Some(Nucleotide::A),
            'C' => Some(Nucleotide::C),
            'T' => Some(Nucleotide::T),
            'G' => Some(Nucleotide::G),
            'N' => Some(Nucleotide::N),
            _ => None,
        }
    }

    /// The one-hot column of this symbol.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::T => 'T',
            Nucleotide::G => 'G',
            Nucleotide::N => 'N',
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One-hot encode a DNA sequence into an `[L, 5]` matrix.
///
/// Each row has a single `1.0`, in the column given by [`Nucleotide::index`].
///
/// # Errors
/// Returns [`HistoneError::InvalidNucleotide`] with the character's position
/// for anything outside `{A, C, T, G, N}`.
pub fn onehot_encode(sequence: &str) -> Result<Array2<f64>, HistoneError> {
    let length = sequence.chars().count();
    let mut matrix = Array2::zeros((length, ALPHABET_SIZE));
    for (position, character) in sequence.chars().enumerate() {
        let nucleotide = Nucleotide::from_char(character)
            .ok_or(HistoneError::InvalidNucleotide {
                character,
                position,
            })?;
        matrix[[position, nucleotide.index()]] = 1.0;
    }
    Ok(matrix)
}
