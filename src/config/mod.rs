/// Provider credentials and pipeline tuning

pub mod settings;

pub use settings::*;
