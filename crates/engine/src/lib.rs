pub mod memory;
pub mod seam;

pub use memory::*;
pub use seam::*;
