use anyhow::{anyhow, Result};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use sha3::{Digest, Keccak256};
use std::fmt;
use zeroize::Zeroizing;

const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Signs messages with a secp256k1 wallet key using Ethereum personal-message
/// signing (EIP-191), the convention the API verifies bearer signatures with.
///
/// The key is owned by the signer and wiped from memory when it is dropped.
#[derive(Clone)]
pub struct WalletSigner {
    signing_key: SigningKey,
}

impl WalletSigner {
    /// Parse a 32-byte hex private key, with or without a `0x` prefix.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let trimmed = private_key.trim();
        let hex_key = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let key_bytes = Zeroizing::new(
            hex::decode(hex_key).map_err(|e| anyhow!("Private key is not valid hex: {}", e))?,
        );
        if key_bytes.len() != 32 {
            return Err(anyhow!(
                "Private key must be 32 bytes, got {}",
                key_bytes.len()
            ));
        }

        let signing_key = SigningKey::from_slice(&key_bytes)
            .map_err(|e| anyhow!("Invalid secp256k1 private key: {}", e))?;

        Ok(Self { signing_key })
    }

    /// Checksummed address of the wallet that owns this key.
    pub fn address(&self) -> String {
        address_of(self.signing_key.verifying_key())
    }

    /// Produce a `0x`-prefixed 65-byte `r || s || v` signature over the
    /// personal-message digest of `message`.
    pub fn sign_message(&self, message: &[u8]) -> Result<String> {
        let digest = personal_message_digest(message);
        let (signature, recovery_id) = self.sign_digest(&digest)?;

        let mut bytes = Vec::with_capacity(65);
        bytes.extend_from_slice(&signature.to_bytes());
        bytes.push(27 + recovery_id.to_byte());
        Ok(format!("0x{}", hex::encode(bytes)))
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> Result<(Signature, RecoveryId)> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| anyhow!("Failed to sign message: {}", e))?;

        // Ethereum verifiers reject high-S signatures.
        Ok(match signature.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (signature, recovery_id),
        })
    }
}

impl fmt::Debug for WalletSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Recover the checksummed address that produced `signature` over `message`.
pub fn recover_address(message: &[u8], signature: &str) -> Result<String> {
    let hex_sig = signature.strip_prefix("0x").unwrap_or(signature);
    let bytes = hex::decode(hex_sig).map_err(|e| anyhow!("Signature is not valid hex: {}", e))?;
    if bytes.len() != 65 {
        return Err(anyhow!("Signature must be 65 bytes, got {}", bytes.len()));
    }

    let signature = Signature::from_slice(&bytes[..64])
        .map_err(|e| anyhow!("Malformed signature: {}", e))?;
    let v = bytes[64];
    let recovery_id = RecoveryId::from_byte(if v >= 27 { v - 27 } else { v })
        .ok_or_else(|| anyhow!("Invalid recovery id: {}", v))?;

    let digest = personal_message_digest(message);
    let verifying_key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
        .map_err(|e| anyhow!("Failed to recover public key: {}", e))?;

    Ok(address_of(&verifying_key))
}

fn personal_message_digest(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX.as_bytes());
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

fn address_of(key: &VerifyingKey) -> String {
    let point = PublicKey::from(key).to_encoded_point(false);
    // Skip the 0x04 uncompressed-point tag.
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    to_checksum_address(&hash[12..])
}

/// EIP-55 mixed-case encoding of a 20-byte address.
fn to_checksum_address(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }
    checksummed
}

#[cfg(test)]
mod tests {
    use super::*;

    // First development account of the Hardhat/Anvil test mnemonic.
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_address_from_known_key() {
        let signer = WalletSigner::from_private_key(DEV_KEY).unwrap();
        assert_eq!(signer.address(), DEV_ADDRESS);

        let unprefixed = WalletSigner::from_private_key(&DEV_KEY[2..]).unwrap();
        assert_eq!(unprefixed.address(), DEV_ADDRESS);
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(WalletSigner::from_private_key("not-hex").is_err());
        assert!(WalletSigner::from_private_key("0x1234").is_err());
        assert!(WalletSigner::from_private_key(&format!("0x{}", "00".repeat(32))).is_err());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = WalletSigner::from_private_key(DEV_KEY).unwrap();
        let body = br#"{"name":"weather-bot"}"#;

        let first = signer.sign_message(body).unwrap();
        let second = signer.sign_message(body).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, signer.sign_message(b"{}").unwrap());
    }

    #[test]
    fn test_signature_shape() {
        let signer = WalletSigner::from_private_key(DEV_KEY).unwrap();
        let signature = signer.sign_message(b"").unwrap();

        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 132);
        let v = u8::from_str_radix(&signature[130..], 16).unwrap();
        assert!(v == 27 || v == 28);
    }

    #[test]
    fn test_signature_recovers_signer() {
        let signer = WalletSigner::from_private_key(DEV_KEY).unwrap();
        let messages: [&[u8]; 3] = [b"", b"hello", br#"{"specification":"a bot"}"#];
        for message in messages {
            let signature = signer.sign_message(message).unwrap();
            assert_eq!(recover_address(message, &signature).unwrap(), DEV_ADDRESS);
        }
    }

    #[test]
    fn test_recovery_detects_tampering() {
        let signer = WalletSigner::from_private_key(DEV_KEY).unwrap();
        let signature = signer.sign_message(b"original").unwrap();

        let recovered = recover_address(b"tampered", &signature);
        assert!(recovered.map(|a| a != DEV_ADDRESS).unwrap_or(true));
        assert!(recover_address(b"original", "0xabc").is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let signer = WalletSigner::from_private_key(DEV_KEY).unwrap();
        let debug = format!("{:?}", signer);
        assert!(debug.contains(DEV_ADDRESS));
        assert!(!debug.contains(&DEV_KEY[2..]));
    }
}
