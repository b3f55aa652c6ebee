//! Error types for configuration loading and swap execution

use std::fmt::Display;

use alloy::primitives::B256;

/// Errors raised while loading and validating the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// A `${VAR}` reference names a variable that is not set
    #[error("environment variable {0} not found (check your .env file)")]
    MissingEnvVar(String),
    /// The file is not valid TOML or does not match the expected layout
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field that should hold an address does not
    #[error("invalid address for `{field}`: {value}")]
    InvalidAddress { field: &'static str, value: String },
    /// The private key is not a valid hex secp256k1 key
    #[error("invalid private key")]
    InvalidPrivateKey,
    /// The RPC endpoint is not a valid URL
    #[error("invalid rpc url: {0}")]
    InvalidRpcUrl(String),
    /// An amount could not be converted to base units
    #[error("invalid amount for `{field}`: {reason}")]
    InvalidAmount { field: &'static str, reason: String },
}

/// Errors raised by the swap routine
#[derive(Debug, thiserror::Error)]
pub enum SwapError {
    /// A JSON-RPC call failed
    #[error("{method} failed: {message}")]
    Rpc { method: &'static str, message: String },
    /// The signer could not sign the transaction
    #[error("signing error: {0}")]
    Signing(String),
    /// The node serves a different chain than the one configured
    #[error("rpc serves chain {actual} but config expects chain {expected}")]
    ChainMismatch { expected: u64, actual: u64 },
    /// The transaction was mined but reverted
    #[error("transaction {hash} reverted")]
    Reverted { hash: B256 },
    /// The system clock is before the unix epoch
    #[error("clock error: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

impl SwapError {
    /// Create a new RPC error for the given method
    pub fn rpc<T: Display>(method: &'static str, msg: T) -> Self {
        Self::Rpc { method, message: msg.to_string() }
    }
}

impl From<alloy::signers::Error> for SwapError {
    fn from(e: alloy::signers::Error) -> Self {
        SwapError::Signing(e.to_string())
    }
}
