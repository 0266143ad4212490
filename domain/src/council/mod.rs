//! Council deliberation domain: the archetype pool, session entities,
//! randomized seating, stream events and prompt/reply handling

pub mod archetypes;
pub mod entities;
pub mod events;
pub mod parsing;
pub mod prompts;
pub mod selection;
