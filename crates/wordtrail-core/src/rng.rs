// Copyright 2025 The wordtrail authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A minimal, zero-dependency, completely insecure PRNG for shuffling
/// options, letters, and word pools. Seedable so tests can assert exact
/// question sets.
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    // Generate random number in range [0, max).
    pub fn generate(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// A random index into a non-empty slice of the given length.
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.generate(len as u32) as usize
    }

    /// Sample `count` distinct indices in `[0, len)`, never returning
    /// `exclude`. Returns fewer than `count` indices when the range is
    /// too small to satisfy the request.
    pub fn sample_distinct(&mut self, len: usize, count: usize, exclude: usize) -> Vec<usize> {
        let available = if exclude < len { len - 1 } else { len };
        let count = count.min(available);
        let mut picked: Vec<usize> = Vec::with_capacity(count);
        while picked.len() < count {
            let candidate = self.pick_index(len);
            if candidate != exclude && !picked.contains(&candidate) {
                picked.push(candidate);
            }
        }
        picked
    }
}

pub fn shuffle<T>(v: Vec<T>, rng: &mut TinyRng) -> Vec<T> {
    let mut v = v;
    let len = v.len() as u32;
    for i in 0..len {
        let j = rng.generate(len);
        v.swap(i as usize, j as usize);
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_seed() {
        let mut a = TinyRng::from_seed(42);
        let mut b = TinyRng::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_generate_in_range() {
        let mut rng = TinyRng::from_seed(7);
        for _ in 0..1000 {
            assert!(rng.generate(10) < 10);
        }
    }

    #[test]
    fn test_sample_distinct() {
        let mut rng = TinyRng::from_seed(99);
        let picked = rng.sample_distinct(20, 3, 5);
        assert_eq!(picked.len(), 3);
        assert!(!picked.contains(&5));
        let mut sorted = picked.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn test_sample_distinct_small_pool() {
        let mut rng = TinyRng::from_seed(1);
        // Only indices 0 and 2 are available.
        let mut picked = rng.sample_distinct(3, 5, 1);
        picked.sort();
        assert_eq!(picked, vec![0, 2]);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = TinyRng::from_seed(3);
        let v: Vec<u32> = (0..50).collect();
        let mut shuffled = shuffle(v, &mut rng);
        shuffled.sort();
        assert_eq!(shuffled, (0..50).collect::<Vec<u32>>());
    }
}
