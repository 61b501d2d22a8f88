//! Searchable graphs: the blocks world and a grid test double.

pub mod blocks;
pub mod grid;
