//! Randomized seating of a council session.
//!
//! All randomness flows through the caller-provided [`Rng`], so sessions are
//! reproducible under a seeded generator.

use super::archetypes::{self, Archetype};
use super::entities::CouncilAgent;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// Sample a session roster: 5 or 6 distinct archetypes, each with a display
/// name drawn from that archetype's pool.
pub fn select_agents<R: Rng + ?Sized>(rng: &mut R, session_millis: i64) -> Vec<CouncilAgent> {
    let count = rng.random_range(5..=6);

    let mut shuffled: Vec<&Archetype> = archetypes::pool().iter().collect();
    shuffled.shuffle(rng);

    shuffled
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(index, archetype)| CouncilAgent {
            id: format!("agent_{}_{}", session_millis, index),
            name: archetype
                .name_options
                .choose(rng)
                .expect("archetype name pools are non-empty")
                .to_string(),
            archetype: archetype.archetype.to_string(),
            persona: archetype.persona,
            temperature: archetype.temperature,
        })
        .collect()
}

/// Number of deliberation rounds for a session, fixed at session start
pub fn choose_round_count<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(3..=5)
}

/// A fresh speaking order for one round
pub fn speaking_order<R: Rng + ?Sized>(agents: &[CouncilAgent], rng: &mut R) -> Vec<CouncilAgent> {
    let mut order: Vec<CouncilAgent> = agents.to_vec();
    order.shuffle(rng);
    order
}
