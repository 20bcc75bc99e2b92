//! # Key Codec
//!
//! Encodes and decodes [`PublicKey`] and [`KeyPair`] values to and from the
//! wire format, on top of the buffer's primitive codec.
//!
//! Every key encoding begins with an algorithm-identifier string that
//! determines which fields follow. Decoding dispatches on that string and
//! fails hard on anything unrecognized; there are no fallback defaults.
//!
//! ## Wire Layouts
//! | Algorithm | Public fields | Private fields (pairs) |
//! |---|---|---|
//! | `ssh-rsa` | e, n (mpint) | d, qinv, q, p (mpint) |
//! | `ssh-dss` | p, q, g, y (mpint) | x (mpint) |
//! | `ecdsa-sha2-*` | curve name, SEC1 point | scalar (mpint) |
//! | `ssh-ed25519` | raw key bytes | not covered |
//!
//! For RSA pairs the two CRT exponents (`dp`, `dq`) are never on the wire;
//! they are derived on decode from the private exponent and the primes.

use num_bigint::BigUint;
use tracing::trace;

use crate::core::Buffer;
use crate::error::{Result, WireError};
use crate::keys::{EcCurve, EcPoint, KeyPair, PublicKey, SSH_DSS, SSH_ED25519, SSH_RSA};

fn put_uint(buf: &mut Buffer, v: &BigUint) {
    buf.put_mpint_bytes(&v.to_bytes_be());
}

fn get_uint(buf: &mut Buffer) -> Result<BigUint> {
    let v = buf.get_mpint()?;
    v.to_biguint()
        .ok_or_else(|| WireError::MalformedKey(format!("negative mpint in key field: {v}")))
}

fn get_ec_curve(buf: &mut Buffer, expected: EcCurve) -> Result<()> {
    let curve_name = buf.get_string()?;
    if curve_name != expected.name() {
        return Err(WireError::CurveMismatch {
            expected: expected.name(),
            actual: curve_name,
        });
    }
    Ok(())
}

fn get_ec_point(buf: &mut Buffer) -> Result<EcPoint> {
    let encoded = buf.get_bytes()?;
    EcPoint::decode(&encoded)
        .ok_or_else(|| WireError::MalformedKey("invalid SEC1 point encoding".into()))
}

impl Buffer {
    /// Encode a public key inline: identifier string, then the fields for
    /// its algorithm.
    pub fn put_raw_public_key(&mut self, key: &PublicKey) {
        self.put_string(key.algorithm());
        match key {
            PublicKey::Rsa { e, n } => {
                put_uint(self, e);
                put_uint(self, n);
            }
            PublicKey::Dsa { p, q, g, y } => {
                put_uint(self, p);
                put_uint(self, q);
                put_uint(self, g);
                put_uint(self, y);
            }
            PublicKey::Ecdsa { curve, point } => {
                self.put_string(curve.name());
                self.put_bytes(&point.encode(*curve));
            }
            PublicKey::Ed25519 { key } => {
                self.put_bytes(key);
            }
        }
    }

    /// Encode a public key as an opaque length-prefixed blob, so the whole
    /// key can be skipped or extracted without decoding it. A 4-byte length
    /// slot is reserved up front and patched afterwards by rewinding the
    /// write cursor, leaving the payload bytes untouched.
    pub fn put_public_key(&mut self, key: &PublicKey) {
        let slot = self.wpos();
        self.put_u32(0);
        let start = self.wpos();
        self.put_raw_public_key(key);
        let end = self.wpos();
        self.set_wpos(slot);
        self.put_u32((end - start) as u32);
        self.set_wpos(end);
    }

    /// Decode an inline public key, dispatching on the identifier string.
    pub fn get_raw_public_key(&mut self) -> Result<PublicKey> {
        let algorithm = self.get_string()?;
        trace!(algorithm = %algorithm, "decoding public key");
        match algorithm.as_str() {
            SSH_RSA => {
                let e = get_uint(self)?;
                let n = get_uint(self)?;
                Ok(PublicKey::Rsa { e, n })
            }
            SSH_DSS => {
                let p = get_uint(self)?;
                let q = get_uint(self)?;
                let g = get_uint(self)?;
                let y = get_uint(self)?;
                Ok(PublicKey::Dsa { p, q, g, y })
            }
            SSH_ED25519 => {
                let key = self.get_bytes()?;
                Ok(PublicKey::Ed25519 { key })
            }
            other => match EcCurve::from_identifier(other) {
                Some(curve) => {
                    get_ec_curve(self, curve)?;
                    let point = get_ec_point(self)?;
                    Ok(PublicKey::Ecdsa { curve, point })
                }
                None => Err(WireError::UnsupportedAlgorithm(algorithm)),
            },
        }
    }

    /// Decode a public key that was embedded as an opaque length-prefixed
    /// blob. The buffer's effective end is clamped to the declared length
    /// for the duration of the inner decode (and restored on every exit
    /// path), so a malformed inner key cannot read into trailing data.
    pub fn get_public_key(&mut self) -> Result<PublicKey> {
        let len = self.get_u32()?;
        if len & 0x8000_0000 != 0 {
            return Err(WireError::MalformedLength(len));
        }
        self.with_clamped_end(len as usize, Buffer::get_raw_public_key)
    }

    /// Encode a key pair: the public fields followed by the private ones.
    ///
    /// RSA writes e, n, d, qinv, q, p; the CRT exponents are omitted since
    /// the reader re-derives them.
    pub fn put_key_pair(&mut self, pair: &KeyPair) {
        self.put_string(pair.algorithm());
        match pair {
            KeyPair::Rsa {
                e, n, d, p, q, qinv, ..
            } => {
                put_uint(self, e);
                put_uint(self, n);
                put_uint(self, d);
                put_uint(self, qinv);
                put_uint(self, q);
                put_uint(self, p);
            }
            KeyPair::Dsa { p, q, g, y, x } => {
                put_uint(self, p);
                put_uint(self, q);
                put_uint(self, g);
                put_uint(self, y);
                put_uint(self, x);
            }
            KeyPair::Ecdsa {
                curve,
                point,
                scalar,
            } => {
                self.put_string(curve.name());
                self.put_bytes(&point.encode(*curve));
                put_uint(self, scalar);
            }
        }
    }

    /// Decode a key pair, mirroring [`Buffer::put_key_pair`]. For RSA the
    /// CRT exponents `dp` and `dq` are derived as `d mod (p-1)` and
    /// `d mod (q-1)` rather than read from the wire.
    pub fn get_key_pair(&mut self) -> Result<KeyPair> {
        let algorithm = self.get_string()?;
        trace!(algorithm = %algorithm, "decoding key pair");
        match algorithm.as_str() {
            SSH_RSA => {
                let e = get_uint(self)?;
                let n = get_uint(self)?;
                let d = get_uint(self)?;
                let qinv = get_uint(self)?;
                let q = get_uint(self)?;
                let p = get_uint(self)?;
                Ok(KeyPair::rsa(e, n, d, p, q, qinv))
            }
            SSH_DSS => {
                let p = get_uint(self)?;
                let q = get_uint(self)?;
                let g = get_uint(self)?;
                let y = get_uint(self)?;
                let x = get_uint(self)?;
                Ok(KeyPair::Dsa { p, q, g, y, x })
            }
            other => match EcCurve::from_identifier(other) {
                Some(curve) => {
                    // Fields are consumed before the name check so the cursor
                    // always lands past the full encoding.
                    let curve_name = self.get_string()?;
                    let encoded_point = self.get_bytes()?;
                    let scalar = get_uint(self)?;
                    if curve_name != curve.name() {
                        return Err(WireError::CurveMismatch {
                            expected: curve.name(),
                            actual: curve_name,
                        });
                    }
                    let point = EcPoint::decode(&encoded_point).ok_or_else(|| {
                        WireError::MalformedKey("invalid SEC1 point encoding".into())
                    })?;
                    Ok(KeyPair::Ecdsa {
                        curve,
                        point,
                        scalar,
                    })
                }
                None => Err(WireError::UnsupportedAlgorithm(algorithm)),
            },
        }
    }
}
