pub mod balances;

pub use balances::{compute_intermediate_balances, BalanceKind, IntermediateBalances};
