use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

/// The side a player (and each of their pieces) is on.
///
/// White always moves first, so [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// Both colors, White first.
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// An iterator over both colors, starting with White.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::all().into_iter()
    }

    /// Returns the other side.
    ///
    /// # Example
    /// ```
    /// # use rookery_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// The direction pawns of this color travel along the ranks.
    ///
    /// # Example
    /// ```
    /// # use rookery_types::Color;
    /// assert_eq!(Color::White.forward(), 1);
    /// assert_eq!(Color::Black.forward(), -1);
    /// ```
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// `0` for White, `1` for Black. Useful for indexing into lists.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    pub const fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// Parses a [`Color`] from `w` or `b` (case-insensitive).
    ///
    /// # Example
    /// ```
    /// # use rookery_types::Color;
    /// assert_eq!(Color::from_uci('b').unwrap(), Color::Black);
    /// assert!(Color::from_uci('x').is_err());
    /// ```
    pub fn from_uci(color: char) -> Result<Self> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Color must be either 'w' or 'b' (case-insensitive). Found {color:?}"),
        }
    }

    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Human-readable name, such as `"white"`.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

/// The kind of a chess piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// The kinds a Pawn may be promoted to, weakest first.
    pub const fn promotions() -> [Self; 4] {
        use PieceKind::*;
        [Knight, Bishop, Rook, Queen]
    }

    /// Returns `true` if a Pawn may become this kind on reaching the last rank.
    ///
    /// # Example
    /// ```
    /// # use rookery_types::PieceKind;
    /// assert!(PieceKind::Queen.is_promotion_choice());
    /// assert!(!PieceKind::King.is_promotion_choice());
    /// assert!(!PieceKind::Pawn.is_promotion_choice());
    /// ```
    pub const fn is_promotion_choice(&self) -> bool {
        !matches!(self, Self::Pawn | Self::King)
    }

    /// Returns `true` for the kinds that move along rays (Bishop, Rook, Queen).
    pub const fn is_slider(&self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }

    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Parses a [`PieceKind`] from its UCI letter, ignoring case.
    ///
    /// # Example
    /// ```
    /// # use rookery_types::PieceKind;
    /// assert_eq!(PieceKind::from_uci('Q').unwrap(), PieceKind::Queen);
    /// assert!(PieceKind::from_uci('x').is_err());
    /// ```
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }

    /// Always a lowercase letter.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

/// The identity of a chess piece: its [`Color`] and [`PieceKind`].
///
/// This is what a [`Square`](crate::Square) on the board refers to. Mutable per-piece
/// state (location, whether it has moved) is tracked by its owner, not here.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    pub const WHITE_PAWN: Self = Self::new(Color::White, PieceKind::Pawn);
    pub const WHITE_KNIGHT: Self = Self::new(Color::White, PieceKind::Knight);
    pub const WHITE_BISHOP: Self = Self::new(Color::White, PieceKind::Bishop);
    pub const WHITE_ROOK: Self = Self::new(Color::White, PieceKind::Rook);
    pub const WHITE_QUEEN: Self = Self::new(Color::White, PieceKind::Queen);
    pub const WHITE_KING: Self = Self::new(Color::White, PieceKind::King);

    pub const BLACK_PAWN: Self = Self::new(Color::Black, PieceKind::Pawn);
    pub const BLACK_KNIGHT: Self = Self::new(Color::Black, PieceKind::Knight);
    pub const BLACK_BISHOP: Self = Self::new(Color::Black, PieceKind::Bishop);
    pub const BLACK_ROOK: Self = Self::new(Color::Black, PieceKind::Rook);
    pub const BLACK_QUEEN: Self = Self::new(Color::Black, PieceKind::Queen);
    pub const BLACK_KING: Self = Self::new(Color::Black, PieceKind::King);

    /// Creates a new [`Piece`] from the given [`Color`] and [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use rookery_types::{Piece, Color, PieceKind};
    /// let white_knight = Piece::new(Color::White, PieceKind::Knight);
    /// assert_eq!(white_knight.to_string(), "N");
    /// ```
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    pub const fn parts(&self) -> (Color, PieceKind) {
        (self.color, self.kind)
    }

    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns a [`Piece`] of the same color, but of kind `promotion`.
    ///
    /// # Example
    /// ```
    /// # use rookery_types::{Piece, PieceKind};
    /// assert_eq!(Piece::BLACK_PAWN.promoted(PieceKind::Queen), Piece::BLACK_QUEEN);
    /// ```
    pub const fn promoted(self, promotion: PieceKind) -> Self {
        Self::new(self.color, promotion)
    }

    /// Parses a [`Piece`] from its UCI letter, where uppercase is White.
    ///
    /// # Example
    /// ```
    /// # use rookery_types::Piece;
    /// assert_eq!(Piece::from_uci('n').unwrap(), Piece::BLACK_KNIGHT);
    /// ```
    pub fn from_uci(piece: char) -> Result<Self> {
        let kind = PieceKind::from_uci(piece)?;
        let color = if piece.is_ascii_lowercase() {
            Color::Black
        } else {
            Color::White
        };
        Ok(Self::new(color, kind))
    }

    pub const fn to_uci(&self) -> char {
        match self.color {
            Color::White => self.kind.to_uci().to_ascii_uppercase(),
            Color::Black => self.kind.to_uci(),
        }
    }
}

impl<T> Index<Color> for [T; Color::COUNT] {
    type Output = T;
    fn index(&self, index: Color) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Color> for [T; Color::COUNT] {
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

macro_rules! impl_text_traits {
    ($type:ty) => {
        impl FromStr for $type {
            type Err = anyhow::Error;
            /// Same as [`Self::from_uci`], but only if `s` is one character long.
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_uci(c),
                    _ => bail!("Expected a single character, got {s:?}"),
                }
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_uci())
            }
        }

        impl fmt::Debug for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}", self.to_uci())
            }
        }
    };
}

impl_text_traits!(Piece);
impl_text_traits!(PieceKind);
impl_text_traits!(Color);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn promotion_keeps_color() {
        for kind in PieceKind::promotions() {
            let promoted = Piece::WHITE_PAWN.promoted(kind);
            assert_eq!(promoted.color(), Color::White);
            assert_eq!(promoted.kind(), kind);
            assert!(kind.is_promotion_choice());
        }
    }

    #[test]
    fn uci_chars_round_trip_through_case() {
        assert_eq!(Piece::from_uci('K').unwrap(), Piece::WHITE_KING);
        assert_eq!(Piece::from_uci('k').unwrap(), Piece::BLACK_KING);
        assert_eq!(Piece::BLACK_ROOK.to_uci(), 'r');
        assert_eq!("q".parse::<PieceKind>().unwrap(), PieceKind::Queen);
        assert!("qq".parse::<PieceKind>().is_err());
    }

    #[test]
    fn negating_a_color_yields_the_opponent() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }
}
