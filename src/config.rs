use std::fs;

use alloy::{
    primitives::{utils::parse_units, Address, U256},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde::Deserialize;

use crate::error::ConfigError;

/// Raw layout of `config.toml`, before validation.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub private_key: String,
    pub router_address: String,
    pub chain: ChainConfig,
    pub swap: SwapParamsConfig,
}

/// The chain the RPC endpoint serves.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub id: u64,
    pub name: String,
    pub native_currency: NativeCurrency,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SwapParamsConfig {
    pub token_in: String,
    pub token_out: String,
    /// Defaults to the signer's own address
    pub recipient: Option<String>,
    /// Human units, e.g. "0.001"
    pub amount_in: String,
    pub token_in_decimals: u8,
    #[serde(default = "default_min_out")]
    pub amount_out_minimum: String,
    pub token_out_decimals: u8,
}

fn default_min_out() -> String {
    "0".to_string()
}

/// Validated configuration, every field parsed into its typed form.
#[derive(Debug, Clone)]
pub struct SwapConfig {
    pub rpc_url: Url,
    pub signer: PrivateKeySigner,
    pub router_address: Address,
    pub chain: ChainConfig,
    pub token_in: Address,
    pub token_out: Address,
    pub recipient: Address,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        // Simple env var substitution: replace ${VAR} with env value
        let content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&content)?)
    }

    /// Replace each `${VAR}` with its environment value. Inserted values are
    /// not scanned again and comment lines are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(content.len());
        for line in content.split_inclusive('\n') {
            if line.trim_start().starts_with('#') {
                result.push_str(line);
                continue;
            }

            let mut rest = line;
            while let Some(start) = rest.find("${") {
                let Some(end) = rest[start..].find('}') else {
                    break;
                };
                let var_name = &rest[start + 2..start + end];
                let value = std::env::var(var_name)
                    .map_err(|_| ConfigError::MissingEnvVar(var_name.to_string()))?;
                result.push_str(&rest[..start]);
                result.push_str(&value);
                rest = &rest[start + end + 1..];
            }
            result.push_str(rest);
        }
        Ok(result)
    }

    /// Parse every field, failing on the first malformed one.
    pub fn validate(self) -> Result<SwapConfig, ConfigError> {
        let rpc_url = self
            .rpc_url
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidRpcUrl(e.to_string()))?;
        let signer = self
            .private_key
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|_| ConfigError::InvalidPrivateKey)?;

        let recipient = match &self.swap.recipient {
            Some(recipient) => parse_address("swap.recipient", recipient)?,
            None => signer.address(),
        };

        Ok(SwapConfig {
            rpc_url,
            router_address: parse_address("router_address", &self.router_address)?,
            token_in: parse_address("swap.token_in", &self.swap.token_in)?,
            token_out: parse_address("swap.token_out", &self.swap.token_out)?,
            recipient,
            amount_in: parse_amount("swap.amount_in", &self.swap.amount_in, self.swap.token_in_decimals)?,
            amount_out_minimum: parse_amount(
                "swap.amount_out_minimum",
                &self.swap.amount_out_minimum,
                self.swap.token_out_decimals,
            )?,
            signer,
            chain: self.chain,
        })
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

fn parse_amount(field: &'static str, value: &str, decimals: u8) -> Result<U256, ConfigError> {
    let units = parse_units(value.trim(), decimals).map_err(|e| ConfigError::InvalidAmount {
        field,
        reason: e.to_string(),
    })?;
    if units.is_negative() {
        return Err(ConfigError::InvalidAmount {
            field,
            reason: "must not be negative".to_string(),
        });
    }
    Ok(units.get_absolute())
}
