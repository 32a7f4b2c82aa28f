mod app;
pub use app::*;

pub mod pointer;

mod window_resizing;
