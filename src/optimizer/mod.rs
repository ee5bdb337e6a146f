pub mod constraints;
pub mod error;
pub mod model;
pub mod objective;
pub mod solution;
pub mod types;
pub mod variables;

pub use error::*;
pub use model::*;
pub use solution::*;
pub use types::*;
pub use variables::*;
