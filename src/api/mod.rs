pub mod handlers;
pub mod routes;
pub mod session_extractor;

pub use handlers::*;
pub use routes::*;
pub use session_extractor::*;
