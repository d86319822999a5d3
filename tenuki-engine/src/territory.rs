use serde::Serialize;

use crate::goban::Goban;
use crate::stone::Stone;

/// Per-point territory classification over a board.
///
/// Returns a flat array in board layout: `1` = Black territory, `-1` =
/// White territory, `0` = neutral (dame). Each maximal empty region is
/// flood-filled once; it belongs to a color iff that color's stones are
/// the only ones on its border. A region bordering no stones at all (the
/// empty board) is neutral.
pub fn ownership(goban: &Goban) -> Vec<i8> {
    let size = goban.size() as usize;
    let mut owners = vec![0i8; size * size];
    let mut visited = vec![false; size * size];

    for row in 0..goban.size() {
        for col in 0..goban.size() {
            let idx = row as usize * size + col as usize;
            if visited[idx] || goban.stone_at((col, row)).is_some() {
                continue;
            }

            let mut region = Vec::new();
            let mut touches_black = false;
            let mut touches_white = false;
            let mut stack = vec![(col, row)];

            while let Some(p) = stack.pop() {
                let pi = p.1 as usize * size + p.0 as usize;
                if visited[pi] {
                    continue;
                }
                visited[pi] = true;
                region.push(pi);

                for n in goban.neighbors(p) {
                    match goban.stone_at(n) {
                        Some(Stone::Black) => touches_black = true,
                        Some(Stone::White) => touches_white = true,
                        None => {
                            if !visited[n.1 as usize * size + n.0 as usize] {
                                stack.push(n);
                            }
                        }
                    }
                }
            }

            let owner = match (touches_black, touches_white) {
                (true, false) => 1i8,
                (false, true) => -1i8,
                _ => 0i8,
            };
            for &pi in &region {
                owners[pi] = owner;
            }
        }
    }

    owners
}

/// One color's side of the final tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub territory: u32,
    pub captures: u32,
}

impl PlayerScore {
    pub fn total(&self) -> u32 {
        self.territory + self.captures
    }
}

/// Final score breakdown for both players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub black: PlayerScore,
    pub white: PlayerScore,
    pub komi: f64,
}

impl Score {
    pub fn black_total(&self) -> f64 {
        self.black.total() as f64
    }

    pub fn white_total(&self) -> f64 {
        self.white.total() as f64 + self.komi
    }

    /// `B+{margin}`, `W+{margin}`, or `Draw`.
    pub fn result(&self) -> String {
        let diff = self.black_total() - self.white_total();
        if diff > 0.0 {
            format!("B+{diff}")
        } else if diff < 0.0 {
            format!("W+{}", -diff)
        } else {
            "Draw".to_string()
        }
    }
}

/// Score a board: territory from region classification, plus each
/// color's capture tally, plus komi for White.
pub fn score(goban: &Goban, komi: f64) -> Score {
    let mut black_territory = 0u32;
    let mut white_territory = 0u32;
    for owner in ownership(goban) {
        match owner {
            1 => black_territory += 1,
            -1 => white_territory += 1,
            _ => {}
        }
    }

    let captures = goban.captures();
    Score {
        black: PlayerScore {
            territory: black_territory,
            captures: captures.get(Stone::Black),
        },
        white: PlayerScore {
            territory: white_territory,
            captures: captures.get(Stone::White),
        },
        komi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test helper: build a goban from an ASCII layout.
    /// 'B' = Black, 'W' = White, '+' = empty.
    fn goban_from_layout(layout: &[&str]) -> Goban {
        let rows: Vec<Vec<i8>> = layout
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'B' => Stone::Black.to_int(),
                        'W' => Stone::White.to_int(),
                        _ => 0,
                    })
                    .collect()
            })
            .collect();
        Goban::from_matrix(rows)
    }

    #[test]
    fn empty_board_is_all_neutral() {
        let goban = Goban::new(9);
        assert!(ownership(&goban).iter().all(|&o| o == 0));

        let s = score(&goban, 6.5);
        assert_eq!(s.black.territory, 0);
        assert_eq!(s.white.territory, 0);
        assert_eq!(s.black_total(), 0.0);
        assert_eq!(s.white_total(), 6.5);
    }

    #[test]
    fn wall_claims_both_sides() {
        // Only Black stones on the board: every empty region borders
        // Black alone, so the full 72 points count for Black.
        let goban = goban_from_layout(&[
            "++++B++++",
            "++++B++++",
            "++++B++++",
            "++++B++++",
            "++++B++++",
            "++++B++++",
            "++++B++++",
            "++++B++++",
            "++++B++++",
        ]);
        let owners = ownership(&goban);
        for (i, &o) in owners.iter().enumerate() {
            let (col, row) = ((i % 9) as u8, (i / 9) as u8);
            if goban.stone_at((col, row)).is_none() {
                assert_eq!(o, 1, "({col},{row}) should be Black territory");
            } else {
                assert_eq!(o, 0, "({col},{row}) holds a stone");
            }
        }
        assert_eq!(score(&goban, 6.5).black.territory, 72);
    }

    #[test]
    fn dame_scores_for_nobody() {
        let goban = goban_from_layout(&["B+W", "B+W", "B+W"]);
        assert!(ownership(&goban).iter().all(|&o| o == 0));

        let s = score(&goban, 6.5);
        assert_eq!(s.black.territory, 0);
        assert_eq!(s.white.territory, 0);
        assert_eq!(s.result(), "W+6.5");
    }

    #[test]
    fn corner_territory_and_neutral_edges() {
        let goban = goban_from_layout(&["++B+", "++B+", "BBBW", "+++W"]);
        let owners = ownership(&goban);

        // Top-left pocket is enclosed by Black alone.
        for idx in [0, 1, 4, 5] {
            assert_eq!(owners[idx], 1, "index {idx} should be Black territory");
        }
        // The right edge and bottom row touch both colors.
        assert_eq!(owners[3], 0);
        assert_eq!(owners[7], 0);
        assert_eq!(owners[12], 0);
        assert_eq!(owners[14], 0);

        let s = score(&goban, 6.5);
        assert_eq!(s.black.territory, 4);
        assert_eq!(s.white.territory, 0);
    }

    #[test]
    fn captures_count_toward_score() {
        let goban = goban_from_layout(&["+B+", "BWB", "+++"]);
        let (goban, captured) = goban.place((1, 2), Stone::Black).unwrap();
        assert_eq!(captured, vec![(1, 1)]);

        let s = score(&goban, 0.0);
        assert_eq!(s.black.territory, 5);
        assert_eq!(s.black.captures, 1);
        assert_eq!(s.black_total(), 6.0);
        assert_eq!(s.white_total(), 0.0);
        assert_eq!(s.result(), "B+6");
    }

    #[test]
    fn komi_breaks_even_boards() {
        let goban = Goban::new(4);
        let s = score(&goban, 6.5);
        assert_eq!(s.result(), "W+6.5");
        assert_eq!(score(&goban, 0.0).result(), "Draw");
    }

    #[test]
    fn result_margins() {
        let s = Score {
            black: PlayerScore { territory: 10, captures: 0 },
            white: PlayerScore { territory: 3, captures: 2 },
            komi: 0.5,
        };
        assert_eq!(s.result(), "B+4.5");

        let s = Score {
            black: PlayerScore { territory: 2, captures: 0 },
            white: PlayerScore { territory: 5, captures: 1 },
            komi: 6.5,
        };
        assert_eq!(s.result(), "W+10.5");
    }
}
