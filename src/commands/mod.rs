/// Command implementations.
pub mod generate;

pub use generate::run;
