//! # Key Material Model
//!
//! Tagged unions over the asymmetric key families the wire format carries:
//! RSA, DSA, the three NIST elliptic curves, and Ed25519.
//!
//! These types own the raw algebraic components only. Nothing here performs
//! cryptography; the surrounding system hands key material in and consumes
//! decoded material back out. Encoding and decoding live in [`codec`] and
//! are exhaustive matches over these unions, so no algorithm can be silently
//! dropped.

pub mod codec;

use num_bigint::BigUint;
use num_traits::One;

/// SSH algorithm identifier for RSA keys.
pub const SSH_RSA: &str = "ssh-rsa";
/// SSH algorithm identifier for DSA keys.
pub const SSH_DSS: &str = "ssh-dss";
/// SSH algorithm identifier for Ed25519 keys.
pub const SSH_ED25519: &str = "ssh-ed25519";
/// Prefix shared by the ECDSA algorithm identifiers.
pub const ECDSA_SHA2_PREFIX: &str = "ecdsa-sha2-";

/// The NIST curves supported by the ECDSA key encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcCurve {
    /// NIST P-256 (secp256r1)
    NistP256,
    /// NIST P-384 (secp384r1)
    NistP384,
    /// NIST P-521 (secp521r1)
    NistP521,
}

impl EcCurve {
    /// Short curve name embedded inside EC key encodings.
    pub fn name(self) -> &'static str {
        match self {
            EcCurve::NistP256 => "nistp256",
            EcCurve::NistP384 => "nistp384",
            EcCurve::NistP521 => "nistp521",
        }
    }

    /// Full algorithm identifier, e.g. `ecdsa-sha2-nistp256`.
    pub fn identifier(self) -> &'static str {
        match self {
            EcCurve::NistP256 => "ecdsa-sha2-nistp256",
            EcCurve::NistP384 => "ecdsa-sha2-nistp384",
            EcCurve::NistP521 => "ecdsa-sha2-nistp521",
        }
    }

    /// Look up a curve by its full algorithm identifier.
    pub fn from_identifier(id: &str) -> Option<Self> {
        match id {
            "ecdsa-sha2-nistp256" => Some(EcCurve::NistP256),
            "ecdsa-sha2-nistp384" => Some(EcCurve::NistP384),
            "ecdsa-sha2-nistp521" => Some(EcCurve::NistP521),
            _ => None,
        }
    }

    /// Look up a curve by its short name, e.g. `nistp256`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nistp256" => Some(EcCurve::NistP256),
            "nistp384" => Some(EcCurve::NistP384),
            "nistp521" => Some(EcCurve::NistP521),
            _ => None,
        }
    }

    /// Field element width in bytes for point coordinates.
    pub fn field_size(self) -> usize {
        match self {
            EcCurve::NistP256 => 32,
            EcCurve::NistP384 => 48,
            EcCurve::NistP521 => 66,
        }
    }
}

/// An elliptic-curve point in affine coordinates.
///
/// The wire carries points in SEC1 uncompressed form: a leading `0x04` tag
/// followed by the X and Y coordinates, each left-padded to the curve's
/// field size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPoint {
    /// Affine X coordinate.
    pub x: BigUint,
    /// Affine Y coordinate.
    pub y: BigUint,
}

impl EcPoint {
    /// Encode in SEC1 uncompressed form for the given curve.
    pub fn encode(&self, curve: EcCurve) -> Vec<u8> {
        let size = curve.field_size();
        let mut out = Vec::with_capacity(1 + 2 * size);
        out.push(0x04);
        out.extend_from_slice(&left_pad(&self.x.to_bytes_be(), size));
        out.extend_from_slice(&left_pad(&self.y.to_bytes_be(), size));
        out
    }

    /// Decode a SEC1 uncompressed point. Compressed forms and odd-length
    /// coordinate data are rejected.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let (&tag, coords) = bytes.split_first()?;
        if tag != 0x04 || coords.is_empty() || coords.len() % 2 != 0 {
            return None;
        }
        let (x, y) = coords.split_at(coords.len() / 2);
        Some(Self {
            x: BigUint::from_bytes_be(x),
            y: BigUint::from_bytes_be(y),
        })
    }
}

fn left_pad(bytes: &[u8], size: usize) -> Vec<u8> {
    if bytes.len() >= size {
        return bytes.to_vec();
    }
    let mut out = vec![0u8; size - bytes.len()];
    out.extend_from_slice(bytes);
    out
}

/// A public key for one of the five supported algorithm families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// RSA public key.
    Rsa {
        /// Public exponent.
        e: BigUint,
        /// Modulus.
        n: BigUint,
    },
    /// DSA public key.
    Dsa {
        /// Prime modulus.
        p: BigUint,
        /// Subprime.
        q: BigUint,
        /// Generator.
        g: BigUint,
        /// Public value.
        y: BigUint,
    },
    /// ECDSA public key on one of the NIST curves.
    Ecdsa {
        /// The curve this key lives on.
        curve: EcCurve,
        /// The public point.
        point: EcPoint,
    },
    /// Ed25519 public key, carried as raw bytes.
    Ed25519 {
        /// The 32-byte public key.
        key: Vec<u8>,
    },
}

impl PublicKey {
    /// The wire algorithm identifier for this key.
    pub fn algorithm(&self) -> &'static str {
        match self {
            PublicKey::Rsa { .. } => SSH_RSA,
            PublicKey::Dsa { .. } => SSH_DSS,
            PublicKey::Ecdsa { curve, .. } => curve.identifier(),
            PublicKey::Ed25519 { .. } => SSH_ED25519,
        }
    }
}

/// A key pair: the public components plus the matching private component.
///
/// Ed25519 is deliberately absent: the generic key-pair encoding does not
/// cover it, only the public-key encoding does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPair {
    /// RSA key pair with CRT acceleration values.
    Rsa {
        /// Public exponent.
        e: BigUint,
        /// Modulus.
        n: BigUint,
        /// Private exponent.
        d: BigUint,
        /// First prime factor.
        p: BigUint,
        /// Second prime factor.
        q: BigUint,
        /// `d mod (p - 1)`.
        dp: BigUint,
        /// `d mod (q - 1)`.
        dq: BigUint,
        /// CRT coefficient `q^-1 mod p`.
        qinv: BigUint,
    },
    /// DSA key pair.
    Dsa {
        /// Prime modulus.
        p: BigUint,
        /// Subprime.
        q: BigUint,
        /// Generator.
        g: BigUint,
        /// Public value.
        y: BigUint,
        /// Private exponent.
        x: BigUint,
    },
    /// ECDSA key pair on one of the NIST curves.
    Ecdsa {
        /// The curve this key lives on.
        curve: EcCurve,
        /// The public point.
        point: EcPoint,
        /// The private scalar.
        scalar: BigUint,
    },
}

impl KeyPair {
    /// Build an RSA pair from its wire components, deriving the two CRT
    /// exponents `dp` and `dq` from the private exponent and the primes.
    pub fn rsa(e: BigUint, n: BigUint, d: BigUint, p: BigUint, q: BigUint, qinv: BigUint) -> Self {
        let dp = &d % (&p - BigUint::one());
        let dq = &d % (&q - BigUint::one());
        KeyPair::Rsa {
            e,
            n,
            d,
            p,
            q,
            dp,
            dq,
            qinv,
        }
    }

    /// The wire algorithm identifier for this pair.
    pub fn algorithm(&self) -> &'static str {
        match self {
            KeyPair::Rsa { .. } => SSH_RSA,
            KeyPair::Dsa { .. } => SSH_DSS,
            KeyPair::Ecdsa { curve, .. } => curve.identifier(),
        }
    }

    /// Project out the public half of this pair.
    pub fn public_key(&self) -> PublicKey {
        match self {
            KeyPair::Rsa { e, n, .. } => PublicKey::Rsa {
                e: e.clone(),
                n: n.clone(),
            },
            KeyPair::Dsa { p, q, g, y, .. } => PublicKey::Dsa {
                p: p.clone(),
                q: q.clone(),
                g: g.clone(),
                y: y.clone(),
            },
            KeyPair::Ecdsa { curve, point, .. } => PublicKey::Ecdsa {
                curve: *curve,
                point: point.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_curve_identifier_roundtrip() {
        for curve in [EcCurve::NistP256, EcCurve::NistP384, EcCurve::NistP521] {
            assert_eq!(EcCurve::from_identifier(curve.identifier()), Some(curve));
            assert_eq!(EcCurve::from_name(curve.name()), Some(curve));
            assert!(curve.identifier().ends_with(curve.name()));
        }
        assert_eq!(EcCurve::from_identifier("ecdsa-sha2-nistp999"), None);
    }

    #[test]
    fn test_ec_point_roundtrip_pads_coordinates() {
        let point = EcPoint {
            x: BigUint::from(0x1234u32),
            y: BigUint::from(0x05u32),
        };
        let encoded = point.encode(EcCurve::NistP256);
        assert_eq!(encoded.len(), 1 + 2 * 32);
        assert_eq!(encoded[0], 0x04);
        assert_eq!(EcPoint::decode(&encoded).unwrap(), point);
    }

    #[test]
    fn test_ec_point_rejects_compressed_and_empty() {
        assert!(EcPoint::decode(&[]).is_none());
        assert!(EcPoint::decode(&[0x02, 0x01, 0x02]).is_none());
        assert!(EcPoint::decode(&[0x04]).is_none());
        assert!(EcPoint::decode(&[0x04, 0x01, 0x02, 0x03]).is_none());
    }

    #[test]
    fn test_rsa_pair_derives_crt_exponents() {
        // Toy values: p = 11, q = 13, n = 143, e = 7, d = 103 (mod 120).
        let pair = KeyPair::rsa(
            BigUint::from(7u32),
            BigUint::from(143u32),
            BigUint::from(103u32),
            BigUint::from(11u32),
            BigUint::from(13u32),
            BigUint::from(6u32),
        );
        match pair {
            KeyPair::Rsa { dp, dq, .. } => {
                assert_eq!(dp, BigUint::from(103u32 % 10));
                assert_eq!(dq, BigUint::from(103u32 % 12));
            }
            other => panic!("expected RSA pair, got {other:?}"),
        }
    }

    #[test]
    fn test_public_key_projection() {
        let pair = KeyPair::Dsa {
            p: BigUint::from(23u32),
            q: BigUint::from(11u32),
            g: BigUint::from(4u32),
            y: BigUint::from(8u32),
            x: BigUint::from(7u32),
        };
        assert_eq!(pair.algorithm(), SSH_DSS);
        assert_eq!(
            pair.public_key(),
            PublicKey::Dsa {
                p: BigUint::from(23u32),
                q: BigUint::from(11u32),
                g: BigUint::from(4u32),
                y: BigUint::from(8u32),
            }
        );
    }
}
