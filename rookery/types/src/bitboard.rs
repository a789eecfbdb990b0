use std::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not},
};

use super::{File, Rank, Square};

/// A set of [`Square`]s, one bit per square.
///
/// Bit `n` corresponds to the square with index `n`, so `A1` is the least-significant
/// bit and `H8` the most-significant. Move generation yields destinations as a
/// [`Bitboard`], and attack maps are the union of such sets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY_BOARD: Self = Self(0);
    pub const FULL_BOARD: Self = Self(u64::MAX);

    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// A [`Bitboard`] containing only `square`.
    ///
    /// # Example
    /// ```
    /// # use rookery_types::{Bitboard, Square};
    /// assert_eq!(Bitboard::from_square(Square::A1).inner(), 1);
    /// ```
    pub const fn from_square(square: Square) -> Self {
        Self(1u64 << square.index())
    }

    /// Builds a [`Bitboard`] from any collection of squares.
    ///
    /// # Example
    /// ```
    /// # use rookery_types::{Bitboard, Square};
    /// let bb = Bitboard::from_squares([Square::E2, Square::E4]);
    /// assert_eq!(bb.population(), 2);
    /// assert!(bb.get(Square::E4));
    /// ```
    pub fn from_squares(squares: impl IntoIterator<Item = Square>) -> Self {
        squares
            .into_iter()
            .fold(Self::EMPTY_BOARD, |bb, square| bb | square.bitboard())
    }

    pub const fn inner(&self) -> u64 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Number of squares in this set.
    pub const fn population(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn get(&self, square: Square) -> bool {
        self.0 & (1u64 << square.index()) != 0
    }

    pub fn set(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    pub fn clear(&mut self, square: Square) {
        self.0 &= !(1u64 << square.index());
    }

    /// The lowest-indexed square in this set, if any.
    pub const fn lsb(&self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(self.0.trailing_zeros() as usize))
        }
    }

    /// Removes and returns the lowest-indexed square in this set.
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let square = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(square)
    }

    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bitboard: *self }
    }

    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

macro_rules! impl_bitwise_op {
    ($op:ident, $op_assign:ident, $func:ident, $func_assign:ident, $sym:tt) => {
        impl $op for Bitboard {
            type Output = Self;
            fn $func(self, rhs: Self) -> Self::Output {
                Self(self.0 $sym rhs.0)
            }
        }

        impl $op<Square> for Bitboard {
            type Output = Self;
            fn $func(self, rhs: Square) -> Self::Output {
                Self(self.0 $sym rhs.bitboard().0)
            }
        }

        impl $op_assign for Bitboard {
            fn $func_assign(&mut self, rhs: Self) {
                self.0 = self.0 $sym rhs.0;
            }
        }

        impl $op_assign<Square> for Bitboard {
            fn $func_assign(&mut self, rhs: Square) {
                self.0 = self.0 $sym rhs.bitboard().0;
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign, &);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign, |);
impl_bitwise_op!(BitXor, BitXorAssign, bitxor, bitxor_assign, ^);

impl Not for Bitboard {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl From<Square> for Bitboard {
    fn from(value: Square) -> Self {
        value.bitboard()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        Self::from_squares(iter)
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Bitboard {
    /// Prints the set as an 8x8 grid with rank 8 at the top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let c = if self.get(Square::new(file, rank)) {
                    'X'
                } else {
                    '.'
                };
                write!(f, "{c} ")?;
            }
            if rank != Rank::ONE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Yields the [`Square`]s of a [`Bitboard`] from lowest to highest index.
pub struct BitboardIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        self.bitboard.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bitboard.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {}
