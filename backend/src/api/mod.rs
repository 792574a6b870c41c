pub mod export;
pub mod form;

pub use export::*;
