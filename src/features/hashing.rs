use blake2::{Blake2b512, Blake2s256};
use blake3::Hasher as Blake3Hasher;
use md5::Md5;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Keccak256, Sha3_256, Sha3_512};
use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::encoders::algorithms::errors::ConfigError;

/// Computes and checks the digest carried in a frame's checksum segment.
///
/// Implementations must be deterministic and produce exactly
/// [`digest_len`](IntegrityGuard::digest_len) bytes for every input.
pub trait IntegrityGuard: Send + Sync {
    /// Digest of `data`.
    fn digest(&self, data: &[u8]) -> Vec<u8>;

    /// Fixed size of every digest, in bytes.
    fn digest_len(&self) -> usize;

    /// Human-readable algorithm name.
    fn name(&self) -> &str;

    /// Whether `digest` matches the digest of `data`.
    fn verify(&self, data: &[u8], digest: &[u8]) -> bool {
        self.digest(data) == digest
    }
}

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    Md5,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_512,
    Keccak256,
    Blake2b,
    Blake2s,
    Blake3,
    // Non-cryptographic, for tight character budgets
    Crc32,
    XxHash64,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 13] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_512,
        HashAlgorithm::Keccak256,
        HashAlgorithm::Blake2b,
        HashAlgorithm::Blake2s,
        HashAlgorithm::Blake3,
        HashAlgorithm::Crc32,
        HashAlgorithm::XxHash64,
    ];

    /// Parse hash algorithm from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha224" | "sha-224" => Ok(HashAlgorithm::Sha224),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha384" | "sha-384" => Ok(HashAlgorithm::Sha384),
            "sha512" | "sha-512" => Ok(HashAlgorithm::Sha512),
            "sha3-256" | "sha3_256" => Ok(HashAlgorithm::Sha3_256),
            "sha3-512" | "sha3_512" => Ok(HashAlgorithm::Sha3_512),
            "keccak256" | "keccak-256" => Ok(HashAlgorithm::Keccak256),
            "blake2b" | "blake2b-512" => Ok(HashAlgorithm::Blake2b),
            "blake2s" | "blake2s-256" => Ok(HashAlgorithm::Blake2s),
            "blake3" => Ok(HashAlgorithm::Blake3),
            "crc32" => Ok(HashAlgorithm::Crc32),
            "xxhash64" | "xxh64" => Ok(HashAlgorithm::XxHash64),
            _ => Err(ConfigError::UnknownHash(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha3_512 => "sha3-512",
            HashAlgorithm::Keccak256 => "keccak256",
            HashAlgorithm::Blake2b => "blake2b",
            HashAlgorithm::Blake2s => "blake2s",
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::Crc32 => "crc32",
            HashAlgorithm::XxHash64 => "xxhash64",
        }
    }

    /// Get the output size in bytes for this algorithm.
    pub fn output_size(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha224 => 28,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
            HashAlgorithm::Sha3_256 => 32,
            HashAlgorithm::Sha3_512 => 64,
            HashAlgorithm::Keccak256 => 32,
            HashAlgorithm::Blake2b => 64,
            HashAlgorithm::Blake2s => 32,
            HashAlgorithm::Blake3 => 32,
            HashAlgorithm::Crc32 => 4,
            HashAlgorithm::XxHash64 => 8,
        }
    }

    /// Whether the algorithm resists deliberate collisions, not just line noise.
    pub fn is_cryptographic(&self) -> bool {
        !matches!(
            self,
            HashAlgorithm::Md5 | HashAlgorithm::Crc32 | HashAlgorithm::XxHash64
        )
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IntegrityGuard for HashAlgorithm {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        hash(data, *self)
    }

    fn digest_len(&self) -> usize {
        self.output_size()
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Compute hash of data using the specified algorithm.
pub fn hash(data: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
        HashAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        HashAlgorithm::Sha3_256 => Sha3_256::digest(data).to_vec(),
        HashAlgorithm::Sha3_512 => Sha3_512::digest(data).to_vec(),
        HashAlgorithm::Keccak256 => Keccak256::digest(data).to_vec(),
        HashAlgorithm::Blake2b => Blake2b512::digest(data).to_vec(),
        HashAlgorithm::Blake2s => Blake2s256::digest(data).to_vec(),
        HashAlgorithm::Blake3 => {
            let mut hasher = Blake3Hasher::new();
            hasher.update(data);
            hasher.finalize().as_bytes().to_vec()
        }
        HashAlgorithm::Crc32 => {
            let crc = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);
            crc.checksum(data).to_be_bytes().to_vec()
        }
        HashAlgorithm::XxHash64 => {
            let mut hasher = XxHash64::with_seed(0);
            hasher.write(data);
            hasher.finish().to_be_bytes().to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let data = b"hello world";
        let hash = hash(data, HashAlgorithm::Sha256);
        assert_eq!(hash.len(), 32);
        assert_eq!(
            hex::encode(&hash),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_md5() {
        let hash = hash(b"hello world", HashAlgorithm::Md5);
        assert_eq!(hex::encode(&hash), "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn test_empty_input() {
        let hash = hash(b"", HashAlgorithm::Sha256);
        assert_eq!(
            hex::encode(&hash),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_output_sizes_match_digests() {
        for algo in HashAlgorithm::ALL {
            assert_eq!(
                hash(b"size check", algo).len(),
                algo.output_size(),
                "{}",
                algo
            );
        }
    }

    #[test]
    fn test_from_str_roundtrip() {
        for algo in HashAlgorithm::ALL {
            assert_eq!(HashAlgorithm::from_str(algo.as_str()).unwrap(), algo);
        }
        assert_eq!(
            HashAlgorithm::from_str("SHA-256").unwrap(),
            HashAlgorithm::Sha256
        );
        assert_eq!(
            HashAlgorithm::from_str("xxh64").unwrap(),
            HashAlgorithm::XxHash64
        );
    }

    #[test]
    fn test_from_str_unknown() {
        let err = HashAlgorithm::from_str("sha1024").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownHash(name) if name == "sha1024"));
    }

    #[test]
    fn test_guard_verify() {
        let guard = HashAlgorithm::default();
        assert_eq!(guard.name(), "sha256");
        assert_eq!(guard.digest_len(), 32);

        let digest = guard.digest(b"payload");
        assert!(guard.verify(b"payload", &digest));
        assert!(!guard.verify(b"payloae", &digest));
    }

    #[test]
    fn test_guard_is_object_safe() {
        let guards: Vec<Box<dyn IntegrityGuard>> = vec![
            Box::new(HashAlgorithm::Blake3),
            Box::new(HashAlgorithm::Crc32),
        ];
        let lens: Vec<usize> = guards.iter().map(|g| g.digest(b"x").len()).collect();
        assert_eq!(lens, vec![32, 4]);
    }

    #[test]
    fn test_crc32_deterministic() {
        assert_eq!(
            hash(b"hello world", HashAlgorithm::Crc32),
            hash(b"hello world", HashAlgorithm::Crc32)
        );
        assert!(!HashAlgorithm::Crc32.is_cryptographic());
        assert!(HashAlgorithm::Sha256.is_cryptographic());
    }
}
