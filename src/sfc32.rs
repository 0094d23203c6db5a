//! Chris Doty-Humphrey's Sfc32 generator (from PractRand).

/// Three 32-bit state words plus a monotonically incrementing counter.
/// Each step sums two words with the counter, rewires the words through
/// a fixed xor-shift / rotate-add sequence, and returns the pre-update
/// sum. Construction needs three seed words and advances the state twice
/// to mix them in.
///
/// Not cryptographically secure.
pub struct Sfc32 {
    a: u32,
    b: u32,
    c: u32,
    counter: u32,
}

impl Sfc32 {
    #[must_use]
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        let mut rng = Self {
            a,
            b,
            c,
            counter: 1,
        };
        // Get to a well-mixed state before the first caller-visible draw.
        rng.next_u32();
        rng.next_u32();
        rng
    }

    pub fn next_u32(&mut self) -> u32 {
        let result = self.a.wrapping_add(self.b).wrapping_add(self.counter);
        self.counter = self.counter.wrapping_add(1);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = result.wrapping_add(self.c.rotate_left(21));
        result
    }

    pub(crate) fn state(&self) -> (u32, u32, u32, u32) {
        (self.a, self.b, self.c, self.counter)
    }

    pub(crate) fn from_state(a: u32, b: u32, c: u32, counter: u32) -> Self {
        Self { a, b, c, counter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xmur3::Xmur3;

    fn seeded() -> Sfc32 {
        let mut hash = Xmur3::new("test");
        Sfc32::new(hash.next(), hash.next(), hash.next())
    }

    #[test]
    fn test_output() {
        // Frozen from the reference implementation.
        let mut rng = seeded();
        assert_eq!(
            vec![
                1643984303_u32,
                2896362264,
                3847660114,
                65415098,
                59737618,
                3275479099,
            ],
            (0..6).map(|_| rng.next_u32()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn construction_mixes_twice() {
        assert_eq!(seeded().state(), (2307756986, 3631194610, 873575906, 3));
    }

    #[test]
    fn state_round_trip_reproduces_the_stream() {
        let mut rng = seeded();
        rng.next_u32();
        let (a, b, c, counter) = rng.state();
        let mut copy = Sfc32::from_state(a, b, c, counter);
        for _ in 0..100 {
            assert_eq!(rng.next_u32(), copy.next_u32());
        }
    }
}
