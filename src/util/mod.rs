pub mod amount;

pub use amount::{coerce_number, resolve_supply_amount, resolve_token_amount};
