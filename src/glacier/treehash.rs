//! SHA-256 tree hashing, as required by Glacier for archive bodies.
//!
//! The body is hashed in 1 MiB chunks, and adjacent digests are then
//! hashed together level by level until a single root digest remains.
use sha2::{Digest, Sha256};

/// Size of the leaf chunks of the tree.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Computes the tree hash of a body as a lowercase hex string.
pub fn tree_hash(body: &[u8]) -> String {
    if body.is_empty() {
        return hex::encode(Sha256::digest(body));
    }

    let mut level: Vec<Vec<u8>> = body
        .chunks(CHUNK_SIZE)
        .map(|chunk| Sha256::digest(chunk).to_vec())
        .collect();

    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => {
                    let mut hasher = Sha256::new();
                    hasher.update(left);
                    hasher.update(right);
                    hasher.finalize().to_vec()
                }
                // odd digests move up a level untouched
                [single] => single.clone(),
                _ => unreachable!(),
            })
            .collect();
    }

    hex::encode(&level[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha256(data: &[u8]) -> Vec<u8> {
        Sha256::digest(data).to_vec()
    }

    fn join(left: &[u8], right: &[u8]) -> Vec<u8> {
        sha256(&[left, right].concat())
    }

    #[test]
    fn hashing_empty_bodies() {
        assert_eq!(
            tree_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hashing_single_chunks() {
        // a single chunk is just a plain digest
        assert_eq!(
            tree_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );

        let full = vec![7_u8; CHUNK_SIZE];
        assert_eq!(tree_hash(&full), hex::encode(sha256(&full)));
    }

    #[test]
    fn hashing_two_chunks() {
        let mut body = vec![1_u8; CHUNK_SIZE];
        body.extend_from_slice(b"tail");

        let expected = join(&sha256(&body[..CHUNK_SIZE]), &sha256(b"tail"));

        assert_eq!(tree_hash(&body), hex::encode(expected));
    }

    #[test]
    fn hashing_odd_chunk_counts() {
        let body: Vec<u8> = (0..3 * CHUNK_SIZE).map(|i| (i / CHUNK_SIZE) as u8).collect();

        let a = sha256(&body[..CHUNK_SIZE]);
        let b = sha256(&body[CHUNK_SIZE..2 * CHUNK_SIZE]);
        let c = sha256(&body[2 * CHUNK_SIZE..]);

        // the third digest is promoted, then joined at the root
        let expected = join(&join(&a, &b), &c);

        assert_eq!(tree_hash(&body), hex::encode(expected));
    }
}
