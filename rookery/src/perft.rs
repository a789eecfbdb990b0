use std::{
    fmt,
    ops::{Add, AddAssign},
};

use super::{in_check, legal_move_list, legality::status, Move, Position, Status};

/// Tallies from a perft run.
///
/// Every field except `nodes` counts leaf moves with that property.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerftResult {
    /// Number of positions reachable.
    pub nodes: u64,

    pub captures: u64,

    /// Number of en passant captures. Also counted in `captures`.
    pub eps: u64,

    pub castles: u64,

    /// Number of promoting moves. Each choice of piece counts separately.
    pub promotions: u64,

    /// Number of moves that give check, including checkmates.
    pub checks: u64,

    pub checkmates: u64,
}

impl Add for PerftResult {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            nodes: self.nodes + rhs.nodes,
            captures: self.captures + rhs.captures,
            eps: self.eps + rhs.eps,
            castles: self.castles + rhs.castles,
            promotions: self.promotions + rhs.promotions,
            checks: self.checks + rhs.checks,
            checkmates: self.checkmates + rhs.checkmates,
        }
    }
}

impl AddAssign for PerftResult {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl fmt::Display for PerftResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = ["Nodes", "Capt.", "E.p.", "Cast.", "Promo.", "Checks", "Mates"];
        let values = [
            self.nodes,
            self.captures,
            self.eps,
            self.castles,
            self.promotions,
            self.checks,
            self.checkmates,
        ];

        let widths = headers
            .iter()
            .zip(values)
            .map(|(header, value)| header.len().max(value.to_string().len()))
            .collect::<Vec<_>>();

        let mut header_line = String::from("|");
        let mut value_line = String::from("|");
        for ((header, value), width) in headers.iter().zip(values).zip(&widths) {
            header_line += &format!(" {header:>width$} |");
            value_line += &format!(" {value:>width$} |");
        }
        let divider = "-".repeat(header_line.len());

        write!(f, "{header_line}\n{divider}\n{value_line}")
    }
}

/// Counts the positions reachable from `position` in exactly `depth` half-moves.
///
/// # Example
/// ```
/// # use rookery::*;
/// assert_eq!(perft(&Position::new(), 2), 400);
/// ```
pub fn perft(position: &Position, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    let moves = legal_move_list(position);

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mv| perft(&position.clone().with_move_made(mv), depth - 1))
        .sum()
}

/// Like [`perft`], but reports the count below each legal first move.
pub fn splitperft(position: &Position, depth: usize) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    legal_move_list(position)
        .into_iter()
        .map(|mv| {
            let nodes = perft(&position.clone().with_move_made(mv), depth - 1);
            (mv, nodes)
        })
        .collect()
}

/// Perform a perft at the specified depth, collecting data on captures, castling,
/// promotions, and checks along the way.
pub fn perft_full(position: &Position, depth: usize) -> PerftResult {
    let mut res = PerftResult::default();

    if depth == 0 {
        res.nodes = 1;
        return res;
    }

    for mv in legal_move_list(position) {
        let new_pos = position.clone().with_move_made(mv);

        if depth > 1 {
            res += perft_full(&new_pos, depth - 1);
            continue;
        }

        res.nodes += 1;
        res.captures += mv.is_capture() as u64;
        res.eps += mv.is_en_passant() as u64;
        res.castles += mv.is_castle() as u64;
        res.promotions += mv.promotion().is_some() as u64;

        let side = new_pos.side_to_move();
        if in_check(&new_pos, side) {
            res.checks += 1;
            if status(&new_pos, side) == Status::Checkmate {
                res.checkmates += 1;
            }
        }
    }

    res
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn splitperft_sums_to_perft() {
        let pos = Position::new();
        let split = splitperft(&pos, 3);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), 8902);
    }

    #[test]
    fn full_perft_tallies_start_position() {
        let res = perft_full(&Position::new(), 3);
        assert_eq!(res.nodes, 8902);
        assert_eq!(res.captures, 34);
        assert_eq!(res.eps, 0);
        assert_eq!(res.castles, 0);
        assert_eq!(res.checks, 12);
        assert_eq!(res.checkmates, 0);
    }
}
