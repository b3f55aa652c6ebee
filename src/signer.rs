use alloy::{
    consensus::{SignableTransaction, TxEnvelope, TxLegacy},
    eips::eip2718::Encodable2718,
    primitives::{Address, Bytes},
    signers::{local::PrivateKeySigner, SignerSync},
};

use crate::error::SwapError;

/// Signing capability for the account that owns the swap.
pub trait Signer: Send + Sync {
    /// Address of the signing account.
    fn address(&self) -> Address;

    /// Sign a fully populated transaction and return it EIP-2718 encoded,
    /// ready for `eth_sendRawTransaction`.
    fn sign_transaction(&self, tx: TxLegacy) -> Result<Bytes, SwapError>;
}

impl Signer for PrivateKeySigner {
    fn address(&self) -> Address {
        alloy::signers::Signer::address(self)
    }

    fn sign_transaction(&self, tx: TxLegacy) -> Result<Bytes, SwapError> {
        let sig = self.sign_hash_sync(&tx.signature_hash())?;
        let envelope = TxEnvelope::Legacy(tx.into_signed(sig));
        Ok(envelope.encoded_2718().into())
    }
}
