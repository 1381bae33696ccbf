pub mod aggregate;
pub mod error;
pub mod rule;
pub mod series;

pub use aggregate::{finite, mean_across, moving_average, total};
pub use error::{Result, SimError};
pub use rule::{ColumnRule, Comparison};
pub use series::{Channel, Series};
