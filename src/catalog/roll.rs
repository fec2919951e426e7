use bevy::{platform::collections::HashSet, prelude::*};
use rand::Rng;

/// Uniform id in `1..=size`. A zero size still yields id 1.
pub fn pick_random_id(rng: &mut impl Rng, size: u32) -> u32 {
    rng.random_range(1..=size.max(1))
}

/// Ids that earn the legendary treatment. Built once from config, read-only afterwards.
#[derive(Resource, Debug, Clone, Default)]
pub struct LegendarySet(HashSet<u32>);

impl LegendarySet {
    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u32> for LegendarySet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogPreset;
    use rand::{SeedableRng, rngs::StdRng};

    fn shipped() -> LegendarySet {
        CatalogPreset::LEGENDARY.iter().copied().collect()
    }

    #[test]
    fn mewtwo_is_legendary_bulbasaur_is_not() {
        let set = shipped();
        assert!(set.contains(150));
        assert!(!set.contains(1));
    }

    #[test]
    fn membership_matches_configured_ids() {
        let set = shipped();
        assert_eq!(set.len(), 79);
        for id in 1..=CatalogPreset::SIZE {
            assert_eq!(set.contains(id), CatalogPreset::LEGENDARY.contains(&id), "id {id}");
        }
    }

    #[test]
    fn rolls_stay_in_catalog_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let id = pick_random_id(&mut rng, CatalogPreset::SIZE);
            assert!((1..=CatalogPreset::SIZE).contains(&id));
        }
    }

    #[test]
    fn small_catalog_reaches_both_ends() {
        let mut rng = StdRng::seed_from_u64(42);
        let rolls: HashSet<u32> = (0..500).map(|_| pick_random_id(&mut rng, 3)).collect();
        assert_eq!(rolls.len(), 3);
        assert!(rolls.contains(&1) && rolls.contains(&3));
    }

    #[test]
    fn empty_catalog_rolls_first_id() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pick_random_id(&mut rng, 0), 1);
    }
}
