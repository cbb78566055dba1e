//! Abalone Core - Rules engine and AI
//!
//! This crate provides the core game logic for Abalone:
//! - Board geometry (61-cell hex grid with axial coordinates)
//! - Selection, line detection and move legality (inline, broadside, sumito)
//! - Move execution with make/unmake and win detection
//! - Legal move enumeration
//! - Position evaluation and CPU-based alpha-beta AI

pub mod board;
pub mod error;
pub mod game;
pub mod layout;
pub mod movegen;
pub mod eval;
pub mod ai;

// Re-exports for convenient access
pub use board::{Board, Hex, Occupancy, BOARD_CELLS, BOARD_RADIUS, DIRECTIONS};
pub use error::{LayoutError, MoveError};
pub use game::{line_direction, lead_marble, GameState, Move, MoveKind, Player, Selection, Undo, WIN_SCORE};
pub use layout::Layout;
pub use movegen::{generate_moves, mobility, perft};
pub use eval::{evaluate_position, Weights, WIN_VALUE};
pub use ai::{play_game, search, AiConfig, AlphaBetaAI, Difficulty, SearchResult};
