pub mod gesture;
pub mod slideshow;
pub mod stacking;

pub use gesture::{GestureEngine, GestureHost, GesturePhase};
pub use slideshow::{Slideshow, SlideshowAction};
pub use stacking::StackOrder;
