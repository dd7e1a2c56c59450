use crate::common::Int;
use rand::{
    distributions::{DistIter, Uniform},
    Rng,
};

/// Source of die results. `sides` is always at least 1.
pub trait Roller {
    type RollIter<'a>: Iterator<Item = Int> + 'a
    where
        Self: 'a;

    /// One die, uniform in `1..=sides`.
    fn roll(&mut self, sides: Int) -> Int;

    /// `num` independent dice.
    fn roll_iter(&mut self, num: usize, sides: Int) -> Self::RollIter<'_>;
}

type Faces = Uniform<Int>;

impl<R: Rng> Roller for R {
    type RollIter<'a> = std::iter::Take<DistIter<Faces, &'a mut R, Int>>
    where
        R: 'a;

    fn roll(&mut self, sides: Int) -> Int {
        self.gen_range(1..=sides)
    }

    fn roll_iter(&mut self, num: usize, sides: Int) -> Self::RollIter<'_> {
        let faces: Faces = Uniform::new_inclusive(1, sides);
        Rng::sample_iter(self, faces).take(num)
    }
}

#[cfg(test)]
pub(crate) use scripted::ScriptedRoller;


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_rng_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = rng.roll(6);
            assert!((1..=6).contains(&x));
        }
        let rolls: Vec<_> = rng.roll_iter(500, 20).collect();
        assert_eq!(rolls.len(), 500);
        assert!(rolls.iter().all(|x| (1..=20).contains(x)));
    }

    #[test]
    fn test_one_sided() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(rng.roll_iter(10, 1).all(|x| x == 1));
    }

    #[test]
    fn test_scripted() {
        let mut roller = ScriptedRoller::new(vec![3, 1]);
        let rolls: Vec<_> = roller.roll_iter(3, 6).collect();
        assert_eq!(rolls, vec![3, 1, 3]);
    }
}
