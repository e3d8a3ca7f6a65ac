//! Cryptographic primitives: SHA-256 block hashing and Bitcoin message
//! signature verification.
//!
//! Ownership of an address is proven with the Bitcoin signed-message scheme:
//! the claimant signs `"\x18Bitcoin Signed Message:\n" || varint(len) || message`
//! (double SHA-256) with the secp256k1 key behind the address. Verification
//! recovers the public key from the compact signature, hashes it the way the
//! address type requires and compares the result with the address payload.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::error::{CoreError, Result};

/// Prefix of every Bitcoin signed message (the leading byte is its length).
pub const MESSAGE_MAGIC: &[u8] = b"\x18Bitcoin Signed Message:\n";

/// Compute SHA-256.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute SHA-256(SHA-256(data)).
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute RIPEMD-160(SHA-256(data)), the Bitcoin HASH160.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

/// Digest that a Bitcoin wallet signs for `message`.
pub fn message_digest(message: &str) -> [u8; 32] {
    let bytes = message.as_bytes();
    let mut buf = Vec::with_capacity(MESSAGE_MAGIC.len() + 9 + bytes.len());
    buf.extend_from_slice(MESSAGE_MAGIC);
    write_varint(&mut buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
    double_sha256(&buf)
}

/// Bitcoin CompactSize encoding.
fn write_varint(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// The address type a signature header commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerKind {
    /// Header 27-30: P2PKH over the uncompressed public key.
    P2pkhUncompressed,
    /// Header 31-34: P2PKH over the compressed public key.
    P2pkhCompressed,
    /// Header 35-38: P2SH-wrapped P2WPKH.
    P2shP2wpkh,
    /// Header 39-42: native segwit (bech32). Recognised, never verified.
    P2wpkh,
}

impl SignerKind {
    /// Split a header byte into signer kind and recovery id.
    fn from_header(header: u8) -> Result<(Self, RecoveryId)> {
        let (kind, base) = match header {
            27..=30 => (Self::P2pkhUncompressed, 27),
            31..=34 => (Self::P2pkhCompressed, 31),
            35..=38 => (Self::P2shP2wpkh, 35),
            39..=42 => (Self::P2wpkh, 39),
            _ => return Err(CoreError::InvalidSignature("unknown header byte")),
        };
        let recovery_id = RecoveryId::from_byte(header - base)
            .ok_or(CoreError::InvalidSignature("invalid recovery id"))?;
        Ok((kind, recovery_id))
    }

    /// Offset added to the recovery id to form the header byte.
    pub const fn header_base(&self) -> u8 {
        match self {
            Self::P2pkhUncompressed => 27,
            Self::P2pkhCompressed => 31,
            Self::P2shP2wpkh => 35,
            Self::P2wpkh => 39,
        }
    }
}

/// A 65-byte compact recoverable signature: `header || r || s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSignature {
    kind: SignerKind,
    recovery_id: RecoveryId,
    signature: Signature,
}

impl MessageSignature {
    /// Parse the base64 form produced by wallets.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| CoreError::InvalidSignature("not base64"))?;
        Self::from_bytes(&bytes)
    }

    /// Parse the raw 65-byte form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 65 {
            return Err(CoreError::InvalidSignature("signature must be 65 bytes"));
        }
        let (kind, recovery_id) = SignerKind::from_header(bytes[0])?;
        let signature = Signature::from_slice(&bytes[1..])
            .map_err(|_| CoreError::InvalidSignature("r or s out of range"))?;
        Ok(Self {
            kind,
            recovery_id,
            signature,
        })
    }

    /// The address type this signature claims.
    pub fn kind(&self) -> SignerKind {
        self.kind
    }

    /// Recover the public key that produced this signature over `digest`.
    pub fn recover(&self, digest: &[u8; 32]) -> Result<VerifyingKey> {
        VerifyingKey::recover_from_prehash(digest, &self.signature, self.recovery_id)
            .map_err(|_| CoreError::InvalidSignature("public key recovery failed"))
    }
}

/// Decode a base58check address into its 20-byte hash payload.
///
/// The version byte is not checked, so mainnet and testnet addresses of the
/// same kind both decode.
pub fn address_payload(address: &str) -> Result<[u8; 20]> {
    let decoded = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|_| CoreError::InvalidSignature("address is not base58check"))?;
    decoded
        .get(1..)
        .and_then(|payload| <[u8; 20]>::try_from(payload).ok())
        .ok_or(CoreError::InvalidSignature("address payload must be 20 bytes"))
}

/// HASH160 that an address of `kind` commits to for `key`.
pub fn signer_hash(kind: SignerKind, key: &VerifyingKey) -> Result<[u8; 20]> {
    match kind {
        SignerKind::P2pkhUncompressed => Ok(hash160(key.to_encoded_point(false).as_bytes())),
        SignerKind::P2pkhCompressed => Ok(hash160(key.to_encoded_point(true).as_bytes())),
        SignerKind::P2shP2wpkh => {
            let mut redeem_script = Vec::with_capacity(22);
            redeem_script.extend_from_slice(&[0x00, 0x14]);
            redeem_script.extend_from_slice(&hash160(key.to_encoded_point(true).as_bytes()));
            Ok(hash160(&redeem_script))
        }
        SignerKind::P2wpkh => Err(CoreError::InvalidSignature("bech32 addresses are not supported")),
    }
}

/// Verify that `signature` (base64) over `message` was produced by the key
/// behind `address`.
pub fn verify_message(address: &str, message: &str, signature: &str) -> Result<()> {
    let signature = MessageSignature::from_base64(signature)?;
    let expected = address_payload(address)?;
    let key = signature.recover(&message_digest(message))?;
    let actual = signer_hash(signature.kind(), &key)?;

    if actual != expected {
        return Err(CoreError::InvalidSignature("signer does not match address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "n1WSqPkDBXWnV3UGsiEkxyuJvxaRXrffLC";
    const MESSAGE: &str = "n1WSqPkDBXWnV3UGsiEkxyuJvxaRXrffLC:1554145343:starRegistry";
    const SIGNATURE: &str =
        "IDw6dVmBEjmXgH7b8FvVlQgPGRLHw6JC2t63BNoQdZNMG4XxjUBN2C+rdROmsdo8L1JPI4yauRxvT/gI/JhEs1E=";

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_varint_boundaries() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 0xfc);
        assert_eq!(buf, vec![0xfc]);

        buf.clear();
        write_varint(&mut buf, 0xfd);
        assert_eq!(buf, vec![0xfd, 0xfd, 0x00]);

        buf.clear();
        write_varint(&mut buf, 0x1_0000);
        assert_eq!(buf, vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_verify_known_signature() {
        verify_message(ADDRESS, MESSAGE, SIGNATURE).expect("known signature should verify");
    }

    #[test]
    fn test_verify_rejects_other_message() {
        let other = "n1WSqPkDBXWnV3UGsiEkxyuJvxaRXrffLC:1554145344:starRegistry";
        assert!(matches!(
            verify_message(ADDRESS, other, SIGNATURE),
            Err(CoreError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_verify_rejects_other_address() {
        let other = "moHNUnnRBCVWVPWdwiyuFifEckbm7GP8cJ";
        assert!(matches!(
            verify_message(other, MESSAGE, SIGNATURE),
            Err(CoreError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(matches!(
            verify_message(ADDRESS, MESSAGE, "foo"),
            Err(CoreError::InvalidSignature(_))
        ));
        assert!(matches!(
            verify_message("not-an-address", MESSAGE, SIGNATURE),
            Err(CoreError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_signature_header_parsing() {
        let mut raw = STANDARD.decode(SIGNATURE).unwrap();
        assert_eq!(MessageSignature::from_bytes(&raw).unwrap().kind(), SignerKind::P2pkhCompressed);

        raw[0] = 26;
        assert!(MessageSignature::from_bytes(&raw).is_err());

        assert!(MessageSignature::from_bytes(&raw[..64]).is_err());
    }

    #[test]
    fn test_address_payload_accepts_both_networks() {
        // Same hash160, mainnet and testnet encodings.
        let payload = address_payload(ADDRESS).unwrap();
        let mut mainnet = vec![0x00];
        mainnet.extend_from_slice(&payload);
        let mainnet = bs58::encode(mainnet).with_check().into_string();
        assert_eq!(address_payload(&mainnet).unwrap(), payload);
    }
}
