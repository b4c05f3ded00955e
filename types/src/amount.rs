//! Token amount conventions.
//!
//! Amounts are raw fixed-point integers (u128) to avoid floating-point errors.
//! The staking token has 8 decimals, so `TOKEN_UNIT` raw units make one whole token.

/// Number of decimals advertised by the staking token.
pub const TOKEN_DECIMALS: u8 = 8;

/// Raw units in one whole token.
pub const TOKEN_UNIT: u128 = 10u128.pow(TOKEN_DECIMALS as u32);
