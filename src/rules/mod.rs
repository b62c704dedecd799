//! Win and draw detection for the 4D board.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{check_win, check_win_exhaustive, winning_line};
