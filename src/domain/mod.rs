pub mod battery;
pub mod plan;
pub mod series;

pub use battery::*;
pub use plan::*;
pub use series::*;
