pub mod battery;
pub mod costs;
pub mod market;
pub mod prices;
pub mod schedule;
pub mod timegrid;

pub use battery::*;
pub use costs::*;
pub use market::*;
pub use prices::*;
pub use schedule::*;
pub use timegrid::*;
