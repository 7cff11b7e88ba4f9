//! Full-game integration tests driving the public API only: openings,
//! famous mating attacks, castling, pawn promotion, and forced check
//! responses.

use arbiter_core::{
    KingStatus, MoveClassification, MoveRequest, Piece, PieceKind, Side, Square, Wing,
};
use arbiter_rules::{CastlingRights, Game};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn mv(from: &str, to: &str) -> MoveRequest {
    MoveRequest::standard(sq(from), sq(to))
}

/// Applies a scripted sequence of alternating moves, panicking on the
/// first rejection so a broken script fails loudly.
fn play(game: &mut Game, moves: &[(&str, &str)]) {
    let mut side = game.turn();
    for &(from, to) in moves {
        let classification = game.apply(side, mv(from, to));
        assert!(
            classification.is_allowed(),
            "{from}{to} by {side} was rejected"
        );
        side = side.opposite();
    }
}

#[test]
fn scholars_mate_ends_in_checkmate() {
    // 1.e4 e5 2.Bc4 Nc6 3.Qh5 Nf6?? 4.Qxf7#
    let mut game = Game::new();
    play(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("f1", "c4"),
            ("b8", "c6"),
            ("d1", "h5"),
            ("g8", "f6"),
        ],
    );
    assert_eq!(
        game.apply(Side::White, mv("h5", "f7")),
        MoveClassification::Capture
    );
    assert_eq!(game.score(Side::White), 1);
    assert_eq!(game.king_status(Side::Black), Ok(KingStatus::Checkmate));

    let last = game.history().last().unwrap();
    assert_eq!(last.black_status, Some(KingStatus::Checkmate));
    assert_eq!(last.white_status, Some(KingStatus::Ok));

    // Mated or not, the defender has no move the arbiter will take.
    assert_eq!(
        game.apply(Side::Black, mv("e8", "f7")),
        MoveClassification::NotAllowed
    );
    assert_eq!(
        game.apply(Side::Black, mv("a7", "a6")),
        MoveClassification::NotAllowed
    );
}

#[test]
fn open_game_castles_on_both_sides() {
    // 1.e4 e5 2.Nf3 Nc6 3.Bc4 Nf6 4.O-O Bc5 5.d3 O-O
    let mut game = Game::new();
    play(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
        ],
    );
    assert_eq!(
        game.apply(Side::White, MoveRequest::castle(Wing::KingSide)),
        MoveClassification::Castling
    );
    assert_eq!(game.piece_at(sq("g1")), Some(Piece::new(PieceKind::King, Side::White)));
    assert_eq!(game.piece_at(sq("f1")), Some(Piece::new(PieceKind::Rook, Side::White)));

    play(&mut game, &[("f8", "c5"), ("d2", "d3")]);
    assert_eq!(
        game.apply(Side::Black, MoveRequest::castle(Wing::KingSide)),
        MoveClassification::Castling
    );
    assert_eq!(game.piece_at(sq("g8")), Some(Piece::new(PieceKind::King, Side::Black)));
    assert_eq!(game.piece_at(sq("f8")), Some(Piece::new(PieceKind::Rook, Side::Black)));

    // Both king moves spent every remaining right.
    assert_eq!(game.castling_rights(), CastlingRights::NONE);
    let castles = game
        .history()
        .iter()
        .filter(|played| played.classification == MoveClassification::Castling)
        .count();
    assert_eq!(castles, 2);
}

#[test]
fn pawn_march_promotes_through_a_captured_rook() {
    // 1.e4 d5 2.exd5 c6 3.dxc6 Nf6 4.cxb7 e6 5.bxa8, upgrading to a queen.
    let mut game = Game::new();
    play(
        &mut game,
        &[
            ("e2", "e4"),
            ("d7", "d5"),
            ("e4", "d5"),
            ("c7", "c6"),
            ("d5", "c6"),
            ("g8", "f6"),
            ("c6", "b7"),
            ("e7", "e6"),
        ],
    );
    assert_eq!(game.score(Side::White), 3);

    assert_eq!(
        game.apply(Side::White, mv("b7", "a8")),
        MoveClassification::Promotion
    );
    assert!(game.is_paused());
    // The rook survives until the upgrade names a piece.
    assert_eq!(game.piece_at(sq("a8")), Some(Piece::new(PieceKind::Rook, Side::Black)));
    assert_eq!(
        game.apply(Side::Black, mv("b8", "c6")),
        MoveClassification::NotAllowed
    );

    assert!(game.promote_pending(Side::White, sq("a8"), PieceKind::Queen));
    assert_eq!(game.piece_at(sq("a8")), Some(Piece::new(PieceKind::Queen, Side::White)));
    assert_eq!(game.score(Side::White), 8);
    assert!(!game.is_paused());

    assert_eq!(game.history().len(), 9);
    let captures = game
        .history()
        .iter()
        .filter(|played| played.classification == MoveClassification::Capture)
        .count();
    assert_eq!(captures, 3);
}

#[test]
fn a_check_must_be_answered() {
    // 1.e4 e5 2.Qh5 Nc6 3.Qxf7+ and the king alone can answer.
    let mut game = Game::new();
    play(
        &mut game,
        &[("e2", "e4"), ("e7", "e5"), ("d1", "h5"), ("b8", "c6")],
    );
    assert_eq!(
        game.apply(Side::White, mv("h5", "f7")),
        MoveClassification::Capture
    );
    assert_eq!(game.king_status(Side::Black), Ok(KingStatus::Check));

    // Moves that leave the king attacked are turned away.
    assert_eq!(
        game.apply(Side::Black, mv("a7", "a6")),
        MoveClassification::NotAllowed
    );
    assert_eq!(
        game.apply(Side::Black, mv("g8", "f6")),
        MoveClassification::NotAllowed
    );

    // The undefended queen falls to the king.
    assert_eq!(
        game.apply(Side::Black, mv("e8", "f7")),
        MoveClassification::Capture
    );
    assert_eq!(game.score(Side::Black), 9);
    assert_eq!(game.score(Side::White), 1);
    assert_eq!(game.king_status(Side::Black), Ok(KingStatus::Ok));

    // The king move also spent Black's castling rights.
    assert!(!game.castling_rights().allows(Side::Black, Wing::KingSide));
    assert!(game.castling_rights().allows(Side::White, Wing::KingSide));
}

#[test]
fn en_passant_window_is_exactly_one_move() {
    // 1.e4 h6 2.e5 d5 3.exd6 is available immediately and only then.
    let mut game = Game::new();
    play(
        &mut game,
        &[("e2", "e4"), ("h7", "h6"), ("e4", "e5"), ("d7", "d5")],
    );

    // Probe the window without committing: a sibling game declines it.
    let mut declined = game.clone();
    play(&mut declined, &[("a2", "a3"), ("h6", "h5")]);
    assert_eq!(
        declined.apply(Side::White, mv("e5", "d6")),
        MoveClassification::NotAllowed
    );

    assert_eq!(
        game.apply(Side::White, mv("e5", "d6")),
        MoveClassification::EnPassant
    );
    assert_eq!(game.piece_at(sq("d5")), None);
    assert_eq!(game.piece_at(sq("d6")), Some(Piece::new(PieceKind::Pawn, Side::White)));
    assert_eq!(game.score(Side::White), 1);
}
