// traits.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PersonalityError;
use crate::randomness::{random_gaussian, RandomSource};

/// Lower bound of the valid facet range.
pub const UNIT_RANGE_MIN: f64 = 0.0;
/// Upper bound of the valid facet range.
pub const UNIT_RANGE_MAX: f64 = 1.0;
/// Sampling floor for generated facets: no facet is ever drawn as
/// exactly absent, so random draws are bounded below by a small
/// positive value rather than zero.
pub const FACET_SAMPLE_FLOOR: f64 = 0.01;

/// Life stage selecting which sampling-table rows apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    Child,
    YoungAdult,
    Adult,
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifeStage::Child => write!(f, "child"),
            LifeStage::YoungAdult => write!(f, "young adult"),
            LifeStage::Adult => write!(f, "adult"),
        }
    }
}

fn check_facet(facet: &'static str, value: f64) -> Result<(), PersonalityError> {
    if !(UNIT_RANGE_MIN..=UNIT_RANGE_MAX).contains(&value) || value.is_nan() {
        return Err(PersonalityError::FacetOutOfRange { facet, value });
    }
    Ok(())
}

/// Declares one Big Five trait as an immutable value object with three
/// validated facets and a per-life-stage sampling table of
/// `(mean, stddev)` pairs, one pair per facet in declared order.
macro_rules! big_five_trait {
    (
        $(#[$doc:meta])*
        $name:ident {
            facets: ($f1:ident, $f2:ident, $f3:ident),
            table: {
                Child => $child:expr,
                YoungAdult => $young:expr,
                Adult => $adult:expr $(,)?
            }
        }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $f1: f64,
            $f2: f64,
            $f3: f64,
        }

        impl $name {
            /// Creates the trait from three facet values, each validated
            /// to lie within `0.0..=1.0`.
            pub fn new($f1: f64, $f2: f64, $f3: f64) -> Result<Self, PersonalityError> {
                check_facet(stringify!($f1), $f1)?;
                check_facet(stringify!($f2), $f2)?;
                check_facet(stringify!($f3), $f3)?;
                Ok(Self { $f1, $f2, $f3 })
            }

            /// Samples the trait for a life stage, drawing each facet
            /// sequentially in declared facet order so a seeded source
            /// reproduces the exact same trait.
            pub fn random(
                life_stage: LifeStage,
                rng: &mut dyn RandomSource,
            ) -> Result<Self, PersonalityError> {
                let params = Self::stage_params(life_stage);
                let mut facets = [0.0_f64; 3];
                for (facet, &(mean, stddev)) in facets.iter_mut().zip(params.iter()) {
                    *facet = random_gaussian(
                        mean,
                        stddev,
                        FACET_SAMPLE_FLOOR,
                        UNIT_RANGE_MAX,
                        rng,
                    )?;
                }
                Self::new(facets[0], facets[1], facets[2])
            }

            /// `(mean, stddev)` sampling parameters per facet for a stage.
            fn stage_params(life_stage: LifeStage) -> [(f64, f64); 3] {
                match life_stage {
                    LifeStage::Child => $child,
                    LifeStage::YoungAdult => $young,
                    LifeStage::Adult => $adult,
                }
            }

            pub fn $f1(&self) -> f64 {
                self.$f1
            }

            pub fn $f2(&self) -> f64 {
                self.$f2
            }

            pub fn $f3(&self) -> f64 {
                self.$f3
            }

            /// Trait score: unweighted mean of the three facets.
            pub fn score(&self) -> f64 {
                (self.$f1 + self.$f2 + self.$f3) / 3.0
            }
        }
    };
}

big_five_trait! {
    /// Openness to experience (curiosity, creativity).
    BigFiveOpenness {
        facets: (aesthetic_sensitivity, creative_imagination, intellectual_curiosity),
        table: {
            Child => [(0.80, 0.15), (0.85, 0.15), (0.85, 0.15)],
            YoungAdult => [(0.70, 0.12), (0.75, 0.12), (0.75, 0.12)],
            Adult => [(0.60, 0.10), (0.65, 0.10), (0.65, 0.10)],
        }
    }
}

big_five_trait! {
    /// Conscientiousness (organization, responsibility).
    BigFiveConscientiousness {
        facets: (organization, productiveness, responsibility),
        table: {
            Child => [(0.35, 0.15), (0.40, 0.15), (0.40, 0.15)],
            YoungAdult => [(0.50, 0.12), (0.55, 0.12), (0.55, 0.12)],
            Adult => [(0.65, 0.10), (0.70, 0.10), (0.70, 0.10)],
        }
    }
}

big_five_trait! {
    /// Extraversion (sociability, energy levels).
    BigFiveExtraversion {
        facets: (sociability, assertiveness, energy_level),
        table: {
            Child => [(0.70, 0.15), (0.55, 0.15), (0.75, 0.15)],
            YoungAdult => [(0.65, 0.12), (0.60, 0.12), (0.65, 0.12)],
            Adult => [(0.60, 0.10), (0.60, 0.10), (0.55, 0.10)],
        }
    }
}

big_five_trait! {
    /// Agreeableness (cooperation, trust).
    BigFiveAgreeableness {
        facets: (compassion, respectfulness, trust),
        table: {
            Child => [(0.55, 0.15), (0.50, 0.15), (0.60, 0.15)],
            YoungAdult => [(0.60, 0.12), (0.60, 0.12), (0.60, 0.12)],
            Adult => [(0.70, 0.10), (0.70, 0.10), (0.65, 0.10)],
        }
    }
}

big_five_trait! {
    /// Neuroticism (emotional instability, anxiety).
    BigFiveNeuroticism {
        facets: (anxiety, depression, emotional_volatility),
        table: {
            Child => [(0.55, 0.15), (0.45, 0.15), (0.60, 0.15)],
            YoungAdult => [(0.50, 0.12), (0.45, 0.12), (0.50, 0.12)],
            Adult => [(0.40, 0.10), (0.35, 0.10), (0.40, 0.10)],
        }
    }
}
