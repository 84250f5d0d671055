pub mod error;
pub mod model;
pub mod normalise;
pub mod objective;
pub mod shaper;
pub mod solver;
pub mod types;

pub use error::*;
pub use model::*;
pub use normalise::*;
pub use objective::*;
pub use shaper::*;
pub use solver::*;
pub use types::*;
