pub mod element;
pub mod results;
pub mod tags;

pub use element::*;
pub use results::*;
pub use tags::*;
