mod board;
mod moves;

#[cfg(test)]
mod tests;

pub use board::*;
pub use moves::*;
