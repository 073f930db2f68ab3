//! Share-code derivation.
//!
//! Share codes are derived from invitation ids by a keyed permutation of the
//! 64-bit id space, so distinct ids always produce distinct codes and no
//! storage round-trip is needed to check for collisions. The output is the
//! URL-safe, unpadded base64 rendering of the permuted value and is always
//! [`HASH_CODE_LEN`] characters long.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

use super::{HashCode, InvitationId};

/// Length of every derived share code.
pub const HASH_CODE_LEN: usize = 11;

/// Salt used when configuration does not supply one.
pub const DEFAULT_HASH_SALT: &str = "invitation-share-code";

const ROUNDS: u8 = 4;

/// Derives the public share code for a freshly created invitation.
///
/// Implementations must be deterministic and injective over invitation ids.
pub trait HashAssigner: Send + Sync {
    /// Derive the share code for `id`.
    fn assign(&self, id: InvitationId) -> HashCode;
}

/// Keyed four-round Feistel permutation over the invitation id space.
///
/// # Examples
/// ```
/// use invitation_backend::domain::{FeistelHashAssigner, HashAssigner, InvitationId};
///
/// let assigner = FeistelHashAssigner::new("salt");
/// let code = assigner.assign(InvitationId::new(42));
/// assert_eq!(code.as_str().len(), 11);
/// assert_eq!(assigner.reveal(&code), Some(InvitationId::new(42)));
/// ```
#[derive(Clone)]
pub struct FeistelHashAssigner {
    salt: Vec<u8>,
}

impl FeistelHashAssigner {
    /// Build an assigner keyed by `salt`.
    pub fn new(salt: impl AsRef<[u8]>) -> Self {
        Self {
            salt: salt.as_ref().to_vec(),
        }
    }

    /// Recover the invitation id a share code was derived from.
    ///
    /// Returns `None` when the code is not a well-formed share code.
    pub fn reveal(&self, code: &HashCode) -> Option<InvitationId> {
        let decoded = URL_SAFE_NO_PAD.decode(code.as_str()).ok()?;
        let bytes: [u8; 8] = decoded.try_into().ok()?;
        #[expect(clippy::big_endian_bytes, reason = "share codes use a fixed byte order")]
        let permuted = u64::from_be_bytes(bytes);
        #[expect(clippy::cast_possible_wrap, reason = "inverse of the id-to-u64 reinterpretation")]
        let raw = self.invert(permuted) as i64;
        Some(InvitationId::new(raw))
    }

    fn round(&self, round: u8, half: u32) -> u32 {
        let mut hasher = Sha256::new();
        hasher.update(&self.salt);
        hasher.update([round]);
        #[expect(clippy::big_endian_bytes, reason = "round input uses a fixed byte order")]
        hasher.update(half.to_be_bytes());
        let digest = hasher.finalize();
        #[expect(clippy::big_endian_bytes, reason = "round output uses a fixed byte order")]
        let output = digest
            .as_slice()
            .first_chunk::<4>()
            .map_or(0, |chunk| u32::from_be_bytes(*chunk));
        output
    }

    fn permute(&self, value: u64) -> u64 {
        let (mut left, mut right) = split(value);
        for round in 0..ROUNDS {
            let next = left ^ self.round(round, right);
            left = right;
            right = next;
        }
        join(left, right)
    }

    fn invert(&self, value: u64) -> u64 {
        let (mut left, mut right) = split(value);
        for round in (0..ROUNDS).rev() {
            let previous = right ^ self.round(round, left);
            right = left;
            left = previous;
        }
        join(left, right)
    }
}

impl Default for FeistelHashAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_SALT)
    }
}

impl std::fmt::Debug for FeistelHashAssigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeistelHashAssigner").finish_non_exhaustive()
    }
}

impl HashAssigner for FeistelHashAssigner {
    fn assign(&self, id: InvitationId) -> HashCode {
        #[expect(clippy::cast_sign_loss, reason = "ids are reinterpreted bitwise")]
        let permuted = self.permute(id.get() as u64);
        #[expect(clippy::big_endian_bytes, reason = "share codes use a fixed byte order")]
        let bytes = permuted.to_be_bytes();
        HashCode::new(URL_SAFE_NO_PAD.encode(bytes))
    }
}

#[expect(clippy::cast_possible_truncation, reason = "halves are masked to 32 bits")]
const fn split(value: u64) -> (u32, u32) {
    ((value >> 32) as u32, (value & 0xFFFF_FFFF) as u32)
}

const fn join(left: u32, right: u32) -> u64 {
    ((left as u64) << 32) | right as u64
}
