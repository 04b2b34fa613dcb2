//! Unit tests for the evaluation terms.

use super::*;
use shakmaty::Square;

fn board(fen: &str) -> GameBoard {
    GameBoard::from_fen(fen).unwrap()
}

/// Flips the board vertically, swaps piece colours and the side to move.
fn mirror_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let swap_case = |c: char| {
        if c.is_ascii_uppercase() {
            c.to_ascii_lowercase()
        } else {
            c.to_ascii_uppercase()
        }
    };

    let placement = fields[0]
        .split('/')
        .rev()
        .map(|rank| rank.chars().map(swap_case).collect::<String>())
        .collect::<Vec<_>>()
        .join("/");
    let turn = if fields[1] == "w" { "b" } else { "w" };
    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let swapped: String = fields[2].chars().map(swap_case).collect();
        let upper: String = swapped.chars().filter(|c| c.is_ascii_uppercase()).collect();
        let lower: String = swapped.chars().filter(|c| c.is_ascii_lowercase()).collect();
        upper + &lower
    };
    let en_passant = match fields[3] {
        "-" => "-".to_string(),
        ep => {
            let mut chars = ep.chars();
            let file = chars.next().unwrap();
            let rank = chars.next().unwrap();
            format!("{}{}", file, if rank == '3' { '6' } else { '3' })
        }
    };

    format!("{} {} {} {} {} {}", placement, turn, castling, en_passant, fields[4], fields[5])
}

const SYMMETRY_FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "4k3/8/8/8/8/8/4q3/4K3 w - - 0 1",
    "8/8/3k4/8/3K4/8/4P3/8 b - - 0 1",
    "6k1/5ppp/8/8/8/8/5PPP/3R2K1 b - - 0 1",
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
];

#[test]
fn test_mirror_fen_is_an_involution() {
    for fen in SYMMETRY_FENS {
        assert_eq!(mirror_fen(&mirror_fen(fen)), *fen);
    }
}

#[test]
fn test_mirrored_positions_negate_white_relative_score() {
    let weights = EvalWeights::default();
    for fen in SYMMETRY_FENS {
        let original = board(fen);
        let mirrored = board(&mirror_fen(fen));

        let white = evaluate_white(&original, &weights).unwrap();
        let mirrored_white = evaluate_white(&mirrored, &weights).unwrap();
        assert_eq!(white, -mirrored_white, "white-relative asymmetry for {}", fen);
        assert_eq!(
            evaluate(&original, &weights),
            evaluate(&mirrored, &weights),
            "mover-relative asymmetry for {}",
            fen
        );
    }
}

#[test]
fn test_evaluate_starting_position() {
    let pos = GameBoard::default();
    assert_eq!(evaluate(&pos, &EvalWeights::default()), 0);
}

#[test]
fn test_evaluate_white_advantage() {
    let pos = board("4k3/8/8/8/8/8/8/4K2Q w - - 0 1");
    let score = evaluate(&pos, &EvalWeights::default());
    assert!(score > 850);
}

#[test]
fn test_evaluate_black_advantage() {
    let pos = board("4k2q/8/8/8/8/8/8/4K3 w - - 0 1");
    let score = evaluate(&pos, &EvalWeights::default());
    assert!(score < -850);
}

#[test]
fn test_evaluate_black_advantage_black_to_move() {
    let pos = board("4k2q/8/8/8/8/8/8/4K3 b - - 0 1");
    let score = evaluate(&pos, &EvalWeights::default());
    assert!(score > 850);
}

#[test]
fn test_checkmated_side_to_move_scores_mate() {
    let pos = board("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
    assert_eq!(evaluate(&pos, &EvalWeights::default()), -MATE_SCORE);
    assert_eq!(evaluate_white(&pos, &EvalWeights::default()), None);
}

#[test]
fn test_stalemate_is_a_draw() {
    let pos = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert_eq!(evaluate(&pos, &EvalWeights::default()), DRAW_SCORE);
}

#[test]
fn test_insufficient_material_is_a_draw() {
    let pos = board("8/8/4k3/8/8/3K4/8/8 w - - 0 1");
    assert_eq!(evaluate(&pos, &EvalWeights::default()), DRAW_SCORE);
    let pos = board("8/8/4k3/8/8/3KN3/8/8 w - - 0 1");
    assert_eq!(evaluate(&pos, &EvalWeights::default()), DRAW_SCORE);
}

#[test]
fn test_fifty_move_rule_is_a_draw() {
    let pos = board("4k3/8/8/8/8/8/8/4K2Q w - - 100 80");
    assert_eq!(evaluate(&pos, &EvalWeights::default()), DRAW_SCORE);
}

#[test]
fn test_endgame_phase_threshold() {
    let weights = EvalWeights::default();
    assert!(!is_endgame(GameBoard::default().position().board(), &weights));
    // Six minor and major pieces left: still counted as endgame.
    let six = board("r1b1k3/8/8/8/8/8/8/R1B1K1NQ w - - 0 1");
    assert!(is_endgame(six.position().board(), &weights));
    let seven = board("r1b1k1n1/8/8/8/8/8/8/R1B1K1NQ w - - 0 1");
    assert!(!is_endgame(seven.position().board(), &weights));
}

#[test]
fn test_check_penalty_applies_to_side_in_check() {
    let pos = board("4k3/8/8/8/8/8/4q3/4K3 w - - 0 1");
    let with_penalty = EvalWeights::default();
    let without_penalty = EvalWeights {
        check_penalty: 0,
        ..EvalWeights::default()
    };
    assert_eq!(
        evaluate(&pos, &without_penalty) - evaluate(&pos, &with_penalty),
        with_penalty.check_penalty
    );
}

#[test]
fn test_pawn_bonus_counts_extra_pawns() {
    let pos = board("4k3/pp6/8/8/8/8/PPP5/4K3 w - - 0 1");
    let with_bonus = EvalWeights::default();
    let without_bonus = EvalWeights {
        pawn_bonus: 0,
        ..EvalWeights::default()
    };
    let difference =
        evaluate_white(&pos, &with_bonus).unwrap() - evaluate_white(&pos, &without_bonus).unwrap();
    assert_eq!(difference, with_bonus.pawn_bonus);
}

#[test]
fn test_king_activity_only_in_endgame() {
    let weights = EvalWeights::default();
    let no_activity = EvalWeights {
        king_activity_multiplier: 0,
        ..EvalWeights::default()
    };

    let endgame = board("8/8/8/8/8/2k5/8/K6R b - - 0 1");
    let diff = evaluate(&endgame, &weights) - evaluate(&endgame, &no_activity);
    // Black king on c3 against the white king in the a1 corner.
    assert_eq!(diff, king_activity::evaluate(Square::C3, Square::A1, weights.king_activity_multiplier));

    let middlegame = GameBoard::default();
    assert_eq!(evaluate(&middlegame, &weights), evaluate(&middlegame, &no_activity));
}
