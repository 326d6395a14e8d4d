//! Use cases: the application's entry points.

pub mod answer_reader;
pub mod play_game;
pub mod select_category;
