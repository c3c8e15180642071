// lib.rs

//! Synthetic Big Five personality generation for agent simulations.
//!
//! The crate samples a full personality from life-stage-dependent
//! mean/stddev tables: each of the five traits is built from three
//! facets drawn through a truncated-Gaussian sampler, and a weighted
//! categorical draw derives a conflict-resolution style from the
//! resulting trait scores. All randomness flows through the injected
//! [`RandomSource`] capability, so a seeded source reproduces the exact
//! same personality.

pub mod error;
pub mod personality;
pub mod randomness;
pub mod traits;

pub use error::PersonalityError;
pub use personality::{
    BigFiveConflictResolutionConfiguration, BigFiveConflictResolutionStyle, BigFivePersonality,
    BigFiveTraitConfiguration, PriorityLevel,
};
pub use randomness::{random_gaussian, DefaultRandomSource, RandomSource};
pub use traits::{
    BigFiveAgreeableness, BigFiveConscientiousness, BigFiveExtraversion, BigFiveNeuroticism,
    BigFiveOpenness, LifeStage,
};
