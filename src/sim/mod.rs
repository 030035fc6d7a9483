mod clock;
mod controls;
mod movement;

pub use clock::FrameClock;
pub use controls::Controls;
pub use movement::{MoveOutcome, integrate};
