// Seeded permutation table shared read-only by every sample of a run
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; 512], // 256 shuffled entries, duplicated
}

impl PermutationTable {
    pub fn from_seed(seed: u64) -> Self {
        // build a pseudorandom permutation table of size 256, duplicated into 512
        let mut p: Vec<u8> = (0..=255u8).collect();
        // xorshift64 keeps the shuffle identical on every platform
        let mut x = seed ^ 0xDEADBEEFCAFEBABE_u64;
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            // Bitmasking the lowest 8 bits
            (x & 0xFF) as u8
        };
        // Fisher–Yates shuffle p[0..256]
        for i in (1..256).rev() {
            // mod (i + 1) to constrain it to [0..i]
            let j = (rng() as usize) % (i + 1);
            p.swap(i, j);
        }
        // Duplicate into 512 entries so perm[a + b] never needs a modulo
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }

        Self { perm }
    }

    #[inline]
    pub fn get(&self, i: usize) -> u8 {
        self.perm[i]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.perm
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("head", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::PermutationTable;

    #[test]
    fn every_value_appears_twice() {
        for seed in [0, 1, 42, u64::MAX] {
            let table = PermutationTable::from_seed(seed);
            let mut counts = [0u32; 256];
            for &v in table.as_slice() {
                counts[v as usize] += 1;
            }
            assert!(counts.iter().all(|&c| c == 2), "seed {seed}");
        }
    }

    #[test]
    fn halves_are_identical() {
        let table = PermutationTable::from_seed(2025);
        let s = table.as_slice();
        assert_eq!(s.len(), 512);
        assert_eq!(&s[..256], &s[256..]);
    }

    #[test]
    fn seed_changes_the_shuffle() {
        let a = PermutationTable::from_seed(1);
        let b = PermutationTable::from_seed(2);
        assert_ne!(a, b);
        assert_eq!(a, PermutationTable::from_seed(1));
    }

    #[test]
    fn seed_42_head_is_stable() {
        let table = PermutationTable::from_seed(42);
        assert_eq!(
            &table.as_slice()[..16],
            &[130, 127, 119, 149, 120, 20, 15, 78, 202, 147, 95, 87, 162, 165, 199, 118]
        );
        assert_eq!(&table.as_slice()[256..272], &table.as_slice()[..16]);
    }

    #[test]
    fn table_is_shuffled() {
        let table = PermutationTable::from_seed(7);
        let identity: Vec<u8> = (0..=255u8).collect();
        assert_ne!(&table.as_slice()[..256], identity.as_slice());
    }
}
