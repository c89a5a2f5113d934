//! # Binary Merkle Tree
//!
//! Aggregates an ordered list of 32-byte leaf digests into a single root:
//! adjacent nodes are paired left-to-right and hashed as
//! `SHA256(left || right)`; a level with an odd count duplicates its last
//! node as its own pair partner; the process repeats until one node remains.
//!
//! The empty leaf set has a defined root — `SHA256` of the empty byte
//! string — so the root is never absent.
//!
//! Leaf ordering is the caller's contract: the inventory builder passes
//! digests in sorted-path order, which is what makes the root reproducible
//! independent of filesystem enumeration order.

use sha2::{Digest, Sha256};

/// Compute the Merkle root of an ordered list of 32-byte leaf digests.
pub fn merkle_root(leaves: &[[u8; 32]]) -> [u8; 32] {
    if leaves.is_empty() {
        return Sha256::digest(b"").into();
    }

    let mut level: Vec<[u8; 32]> = leaves.to_vec();
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            let left = &pair[0];
            // Odd count: the last node pairs with itself.
            let right = pair.get(1).unwrap_or(&pair[0]);
            let mut hasher = Sha256::new();
            hasher.update(left);
            hasher.update(right);
            next.push(hasher.finalize().into());
        }
        level = next;
    }
    level[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use seal_core::sha256_bytes;

    /// Leaf fixtures: `SHA256("leaf-{i}")`.
    fn leaf(i: usize) -> [u8; 32] {
        sha256_bytes(format!("leaf-{i}").as_bytes())
    }

    fn hex(bytes: &[u8; 32]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn empty_set_has_defined_root() {
        assert_eq!(
            hex(&merkle_root(&[])),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        let l0 = leaf(0);
        assert_eq!(merkle_root(&[l0]), l0);
        assert_eq!(
            hex(&l0),
            "d2dbf006f96dd05044a8f63d8f118f23925ba4cc5750f8b6c8e287fd506c8188"
        );
    }

    #[test]
    fn two_leaves_hash_concatenated() {
        let root = merkle_root(&[leaf(0), leaf(1)]);
        assert_eq!(
            hex(&root),
            "8b0f563106070048a1057926820c7118dec20b8a73715544f4528487c16dc0d7"
        );
    }

    #[test]
    fn three_leaves_duplicate_the_odd_node() {
        // root = H(H(l0 || l1) || H(l2 || l2))
        let root = merkle_root(&[leaf(0), leaf(1), leaf(2)]);
        assert_eq!(
            hex(&root),
            "39313694557e76d28b720ad7f4481cb144c24c8341f8a68fc4a8363fcd1a04bb"
        );
    }

    #[test]
    fn four_leaves_balanced_tree() {
        let root = merkle_root(&[leaf(0), leaf(1), leaf(2), leaf(3)]);
        assert_eq!(
            hex(&root),
            "476c4a255bbaa3fa397182c77cb1bc85be71aa10349349f67e5c2bdd0453bfa0"
        );
    }

    #[test]
    fn root_is_reproducible() {
        let leaves: Vec<[u8; 32]> = (0..9).map(leaf).collect();
        assert_eq!(merkle_root(&leaves), merkle_root(&leaves));
    }

    #[test]
    fn changing_one_leaf_changes_the_root() {
        let mut leaves: Vec<[u8; 32]> = (0..5).map(leaf).collect();
        let before = merkle_root(&leaves);
        leaves[3][0] ^= 0x01;
        assert_ne!(merkle_root(&leaves), before);
    }

    #[test]
    fn leaf_order_matters() {
        let forward = merkle_root(&[leaf(0), leaf(1)]);
        let reversed = merkle_root(&[leaf(1), leaf(0)]);
        assert_ne!(forward, reversed);
    }
}
