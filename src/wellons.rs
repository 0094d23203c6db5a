//! Two generators built on Christopher Wellons' hash-prospector mixers.

/// Two multiply-xor-shift rounds with the constants TheIronBorn found
/// with Wellons' hash prospector (a re-tuned MurmurHash3 finalizer).
/// The post-mix state is the output.
///
/// Not cryptographically secure.
pub struct IronWellons32 {
    state: u32,
}

impl IronWellons32 {
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s = (s ^ (s >> 16)).wrapping_mul(0x21F0_AAAD);
        s = (s ^ (s >> 15)).wrapping_mul(0x735A_2D97);
        s ^= s >> 15;
        self.state = s;
        s
    }

    pub(crate) fn state(&self) -> u32 {
        self.state
    }

    pub(crate) fn from_state(state: u32) -> Self {
        Self { state }
    }
}

/// Wellons' triple32: three multiply-xor-shift rounds. A slightly
/// stronger mix than [IronWellons32] at the cost of one more round.
///
/// Not cryptographically secure.
pub struct WellonsTriple32 {
    state: u32,
}

impl WellonsTriple32 {
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s = (s ^ (s >> 17)).wrapping_mul(0xED5A_D4BB);
        s = (s ^ (s >> 11)).wrapping_mul(0xAC4C_1B51);
        s = (s ^ (s >> 15)).wrapping_mul(0x3184_8BAB);
        s ^= s >> 14;
        self.state = s;
        s
    }

    pub(crate) fn state(&self) -> u32 {
        self.state
    }

    pub(crate) fn from_state(state: u32) -> Self {
        Self { state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xmur3::Xmur3;

    #[test]
    fn iron_wellons_output() {
        // Frozen from the reference implementation.
        let mut rng = IronWellons32::new(42);
        assert_eq!(
            vec![
                671623878_u32,
                603650552,
                4225800475,
                300677195,
                2114619706,
                1767397882,
            ],
            (0..6).map(|_| rng.next_u32()).collect::<Vec<_>>()
        );

        let mut rng = IronWellons32::new(Xmur3::new("test").next());
        assert_eq!(rng.next_u32(), 3063067272);
        assert_eq!(rng.next_u32(), 3969021077);
    }

    #[test]
    fn triple32_output() {
        // Frozen from the reference implementation.
        let mut rng = WellonsTriple32::new(42);
        assert_eq!(
            vec![
                2590465940_u32,
                1165550744,
                3793494088,
                3330203194,
                4108740325,
                2825458552,
            ],
            (0..6).map(|_| rng.next_u32()).collect::<Vec<_>>()
        );

        let mut rng = WellonsTriple32::new(Xmur3::new("test").next());
        assert_eq!(rng.next_u32(), 3300647205);
        assert_eq!(rng.next_u32(), 729721169);
    }

    #[test]
    fn state_round_trips() {
        let mut iron = IronWellons32::new(1);
        iron.next_u32();
        let mut iron_copy = IronWellons32::from_state(iron.state());
        assert_eq!(iron.next_u32(), iron_copy.next_u32());

        let mut triple = WellonsTriple32::new(1);
        triple.next_u32();
        let mut triple_copy = WellonsTriple32::from_state(triple.state());
        assert_eq!(triple.next_u32(), triple_copy.next_u32());
    }
}
