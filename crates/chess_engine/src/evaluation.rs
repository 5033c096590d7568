use chess_core::{
    piece::{Color, PieceType},
    Board, ChessResult, Piece, Square,
};

// Material, in centipawns (100 = 1 pawn)
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 300;
const BISHOP_VALUE: i32 = 300;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 10000;

// Pawn structure
const ISOLATED_PAWN: i32 = -20;
const DOUBLED_PAWN: i32 = -20;
const PASSED_PAWN: i32 = 30;

// King safety, indexed by the number of shield pawns (0-3)
const PAWN_SHIELD: [i32; 4] = [-50, -20, 10, 20];
const CENTRAL_KING: i32 = -20;

// Weights of the whole-board differentials
const MOBILITY_WEIGHT: i32 = 10;
const DEVELOPMENT_WEIGHT: i32 = 20;
const CENTER_WEIGHT: i32 = 30;

// Piece-square tables, indexed [rank counted from the owner's back rank][file].
// Row 0 is rank 1 for White and rank 8 for Black; files are never flipped.

const PAWN_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const CENTER_SQUARES: [(u8, u8); 4] = [(3, 3), (3, 4), (4, 3), (4, 4)];

/// Static score of `board` in centipawns; positive favours `perspective`.
///
/// Every piece contributes material, a piece-square bonus (pawns and knights),
/// pawn-structure terms (pawns) and king-safety terms (kings). On top of that
/// come the mobility, development and centre-occupancy differences between
/// the two sides.
pub fn evaluate_position(board: &Board, perspective: Color) -> ChessResult<i32> {
    let mut score = 0;

    for piece in board.all_pieces() {
        let mut value = get_piece_value(piece.piece_type) + get_position_bonus(piece);
        match piece.piece_type {
            PieceType::Pawn => value += pawn_structure(board, piece),
            PieceType::King => value += king_safety(board, piece),
            _ => {}
        }

        if piece.color == perspective {
            score += value;
        } else {
            score -= value;
        }
    }

    let opponent = perspective.opponent();
    score += MOBILITY_WEIGHT * (mobility(board, perspective)? - mobility(board, opponent)?);
    score += DEVELOPMENT_WEIGHT * (development(board, perspective) - development(board, opponent));
    score += CENTER_WEIGHT * (center_control(board, perspective) - center_control(board, opponent));

    Ok(score)
}

/// Returns the base material value of a piece
pub fn get_piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

/// Piece-square bonus. Only pawns and knights have tables.
pub fn get_position_bonus(piece: &Piece) -> i32 {
    let row = match piece.color {
        Color::White => piece.square.rank() as usize,
        Color::Black => 7 - piece.square.rank() as usize,
    };
    let col = piece.square.file() as usize;

    match piece.piece_type {
        PieceType::Pawn => PAWN_TABLE[row][col],
        PieceType::Knight => KNIGHT_TABLE[row][col],
        _ => 0,
    }
}

fn is_own_pawn(board: &Board, file: i8, rank: i8, color: Color) -> bool {
    if file < 0 || rank < 0 {
        return false;
    }
    Square::new(file as u8, rank as u8)
        .and_then(|sq| board.piece_at(sq))
        .map_or(false, |p| p.piece_type == PieceType::Pawn && p.color == color)
}

fn is_enemy_pawn(board: &Board, file: i8, rank: i8, color: Color) -> bool {
    is_own_pawn(board, file, rank, color.opponent())
}

pub fn is_isolated_pawn(board: &Board, pawn: &Piece) -> bool {
    let file = pawn.square.file() as i8;
    ![file - 1, file + 1]
        .into_iter()
        .any(|f| (0..8).any(|rank| is_own_pawn(board, f, rank, pawn.color)))
}

pub fn is_doubled_pawn(board: &Board, pawn: &Piece) -> bool {
    let file = pawn.square.file() as i8;
    (0..8).filter(|&rank| is_own_pawn(board, file, rank, pawn.color)).count() > 1
}

/// No enemy pawn ahead of it on its own or either neighbouring file.
pub fn is_passed_pawn(board: &Board, pawn: &Piece) -> bool {
    let file = pawn.square.file() as i8;
    let dir = pawn.color.forward();
    let mut rank = pawn.square.rank() as i8 + dir;
    while (0..8).contains(&rank) {
        if (file - 1..=file + 1).any(|f| is_enemy_pawn(board, f, rank, pawn.color)) {
            return false;
        }
        rank += dir;
    }
    true
}

/// Isolated, doubled and passed adjustments for one pawn. Each applies on its own.
pub fn pawn_structure(board: &Board, pawn: &Piece) -> i32 {
    let mut bonus = 0;
    if is_isolated_pawn(board, pawn) {
        bonus += ISOLATED_PAWN;
    }
    if is_doubled_pawn(board, pawn) {
        bonus += DOUBLED_PAWN;
    }
    if is_passed_pawn(board, pawn) {
        bonus += PASSED_PAWN;
    }
    bonus
}

/// Own pawns on the three squares directly in front of the king.
pub fn pawn_shield(board: &Board, king: &Piece) -> usize {
    let file = king.square.file() as i8;
    let rank = king.square.rank() as i8 + king.color.forward();
    (file - 1..=file + 1)
        .filter(|&f| is_own_pawn(board, f, rank, king.color))
        .count()
}

pub fn king_safety(board: &Board, king: &Piece) -> i32 {
    let mut bonus = PAWN_SHIELD[pawn_shield(board, king)];

    let (file, rank) = (king.square.file(), king.square.rank());
    if (2..=5).contains(&file) && (2..=5).contains(&rank) {
        bonus += CENTRAL_KING;
    }
    bonus
}

/// Total number of legal moves available to `color`'s pieces, whoever is to move.
pub fn mobility(board: &Board, color: Color) -> ChessResult<i32> {
    Ok(board.legal_moves(color)?.len() as i32)
}

/// Knights and bishops that have left their back rank.
pub fn development(board: &Board, color: Color) -> i32 {
    board
        .pieces(color)
        .filter(|p| p.piece_type.is_minor() && p.square.rank() != color.home_rank())
        .count() as i32
}

/// Pieces of `color` standing on d4, d5, e4 or e5.
pub fn center_control(board: &Board, color: Color) -> i32 {
    board
        .pieces(color)
        .filter(|p| CENTER_SQUARES.contains(&(p.square.file(), p.square.rank())))
        .count() as i32
}
