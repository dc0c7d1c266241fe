mod gateway;
mod session;
mod types;

pub use gateway::*;
pub use session::*;
pub use types::*;
