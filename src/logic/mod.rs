pub mod normalize;
pub mod parse;
pub mod query;
pub mod resolve;
pub mod supervisor;

pub use normalize::*;
pub use parse::*;
pub use query::*;
pub use resolve::Resolver;
pub use supervisor::*;
