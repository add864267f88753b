//! Property-based tests for the sampler, the projection and the objective.

use std::sync::Arc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use efg_liap::efg::BehavProfile;
use efg_liap::games::{kuhn_equilibrium, kuhn_poker};
use efg_liap::liap::{liap_value, pick_random_profile, project};

/// Kuhn Poker has 12 infosets with 2 actions each.
const KUHN_DIM: usize = 24;

fn kuhn_start() -> BehavProfile {
    BehavProfile::new(kuhn_poker().unwrap())
}

/// Strategy: a point with every coordinate in [-2, 2].
fn point_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-2.0..2.0f64, KUHN_DIM)
}

proptest! {
    // 1. Sampled profiles are distributions at every infoset
    #[test]
    fn random_profile_is_distribution(seed in any::<u64>()) {
        let mut profile = kuhn_start();
        let mut rng = StdRng::seed_from_u64(seed);
        pick_random_profile(&mut profile, &mut rng);

        let game = Arc::clone(profile.game());
        for (iset, _) in game.infosets() {
            let probs = profile.infoset_probs(iset);
            prop_assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)), "{:?}", probs);
            let sum: f64 = probs.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-12, "sum={sum}");
        }
    }

    // 2. The objective is never negative
    #[test]
    fn objective_non_negative(x in point_strategy()) {
        let mut profile = kuhn_start();
        profile.copy_from_slice(&x);
        prop_assert!(liap_value(&profile) >= 0.0);
    }

    // 3. Any negative probability makes the objective positive
    #[test]
    fn negative_probability_is_penalized(
        x in point_strategy(),
        index in 0..KUHN_DIM,
        negative in 1e-6..2.0f64,
    ) {
        let mut profile = kuhn_start();
        let mut x = x;
        x[index] = -negative;
        profile.copy_from_slice(&x);
        prop_assert!(liap_value(&profile) > 0.0);
    }

    // 4. Every member of the equilibrium family scores zero
    #[test]
    fn equilibrium_family_scores_zero(alpha in 0.0..=(1.0 / 3.0)) {
        let profile = kuhn_equilibrium(kuhn_poker().unwrap(), alpha);
        prop_assert!(liap_value(&profile) < 1e-12);
    }

    // 5. Projected blocks sum to zero
    #[test]
    fn projection_zeroes_block_sums(
        blocks in prop::collection::vec(prop::collection::vec(-10.0..10.0f64, 1..5), 1..6),
    ) {
        let lengths: Vec<usize> = blocks.iter().map(Vec::len).collect();
        let mut v: Vec<f64> = blocks.concat();
        project(&mut v, &lengths);

        let mut start = 0;
        for len in lengths {
            let sum: f64 = v[start..start + len].iter().sum();
            prop_assert!(sum.abs() < 1e-9, "sum={sum}");
            start += len;
        }
    }
}
