//! Channel tables and the transformations applied to them before decomposition.

pub mod channel_table;
pub mod discretize;
pub mod surrogates;

pub use channel_table::ChannelTable;
pub use discretize::{Discretization, SymbolTable};
pub use surrogates::{SurrogateGenerator, SurrogateMethod, cholesky_lower, correlation_matrix};
