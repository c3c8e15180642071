// personality.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PersonalityError;
use crate::randomness::RandomSource;
use crate::traits::{
    BigFiveAgreeableness, BigFiveConscientiousness, BigFiveExtraversion, BigFiveNeuroticism,
    BigFiveOpenness, LifeStage,
};

/// Floor applied to raw conflict-style weights. Raw weights can go
/// negative or zero under extreme trait configurations; flooring at a
/// small positive constant keeps every style reachable, if rare, rather
/// than structurally impossible.
const WEIGHT_FLOOR: f64 = 1e-3;

/// Spread below which floored weights count as carrying no signal and
/// selection falls back to a uniform draw.
const WEIGHT_SPREAD_EPS: f64 = 1e-9;

/// Ordered concern magnitude attached to a conflict-resolution style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Low,
    Moderate,
    High,
}

/// Conflict-resolution style, after Rahim's dual-concern model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BigFiveConflictResolutionStyle {
    Avoiding,
    Obliging,
    Integrating,
    Dominating,
    Compromising,
}

impl BigFiveConflictResolutionStyle {
    /// All styles in fixed enumeration order. Weighted and uniform draws
    /// both partition their interval in this order.
    pub const ALL: [Self; 5] = [
        Self::Avoiding,
        Self::Obliging,
        Self::Integrating,
        Self::Dominating,
        Self::Compromising,
    ];

    /// Fixed style → (concern for self, concern for others) mapping.
    pub const fn priorities(self) -> (PriorityLevel, PriorityLevel) {
        match self {
            Self::Avoiding => (PriorityLevel::Low, PriorityLevel::Low),
            Self::Obliging => (PriorityLevel::Low, PriorityLevel::High),
            Self::Integrating => (PriorityLevel::High, PriorityLevel::High),
            Self::Dominating => (PriorityLevel::High, PriorityLevel::Low),
            Self::Compromising => (PriorityLevel::Moderate, PriorityLevel::Moderate),
        }
    }

    /// Selects a style from trait-derived weights.
    ///
    /// Raw weights are floored at a small positive constant; when the
    /// floored weights are effectively equal (the traits carry no
    /// discriminating signal) the draw degrades to a uniform choice over
    /// the five styles in enumeration order.
    pub fn random(traits: &BigFiveTraitConfiguration, rng: &mut dyn RandomSource) -> Self {
        let floored = style_weights(traits).map(|w| w.max(WEIGHT_FLOOR));

        let mut lowest = f64::INFINITY;
        let mut highest = f64::NEG_INFINITY;
        for &w in &floored {
            lowest = lowest.min(w);
            highest = highest.max(w);
        }

        if highest - lowest < WEIGHT_SPREAD_EPS {
            select_weighted(&[1.0; 5], rng)
        } else {
            select_weighted(&floored, rng)
        }
    }
}

impl fmt::Display for BigFiveConflictResolutionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Avoiding => write!(f, "avoiding"),
            Self::Obliging => write!(f, "obliging"),
            Self::Integrating => write!(f, "integrating"),
            Self::Dominating => write!(f, "dominating"),
            Self::Compromising => write!(f, "compromising"),
        }
    }
}

/// Raw (unfloored) style weights derived from the trait scores.
///
/// Two axes come out of the scores first: concern for self (the
/// assertive, goal-driven traits) and concern for others (the
/// affiliative traits). Each style weight is a fixed linear blend of
/// those axes, with neuroticism feeding the withdrawal-flavored
/// AVOIDING weight. Returned in `BigFiveConflictResolutionStyle::ALL`
/// order.
pub(crate) fn style_weights(traits: &BigFiveTraitConfiguration) -> [f64; 5] {
    let concern_for_self =
        0.5 * (traits.extraversion.score() + traits.conscientiousness.score());
    let concern_for_others =
        0.5 * (traits.agreeableness.score() + traits.openness.score());
    let neuroticism = traits.neuroticism.score();

    [
        // Avoiding: anxious and unassertive.
        neuroticism - 0.5 * concern_for_self,
        // Obliging: others first, self set aside.
        concern_for_others - 0.5 * concern_for_self,
        // Integrating: both concerns pull together.
        concern_for_self + concern_for_others,
        // Dominating: self-concern minus the agreeable pull.
        concern_for_self - 1.5 * traits.agreeableness.score(),
        // Compromising: the balanced middle, fading as discipline rises.
        0.5 * (concern_for_self + concern_for_others) - traits.conscientiousness.score(),
    ]
}

/// Cumulative weighted draw over `[0, total)`, partitioned in
/// enumeration order. Intervals are half-open except the last, which is
/// closed on the right to absorb a draw landing exactly on the total.
fn select_weighted(
    weights: &[f64; 5],
    rng: &mut dyn RandomSource,
) -> BigFiveConflictResolutionStyle {
    let total: f64 = weights.iter().sum();
    let draw = rng.uniform(0.0, total);

    let mut upper = 0.0;
    for (style, weight) in BigFiveConflictResolutionStyle::ALL.iter().zip(weights) {
        upper += weight;
        if draw < upper {
            return *style;
        }
    }
    BigFiveConflictResolutionStyle::Compromising
}

/// The five Big Five trait aggregates for one individual.
///
/// Equality is structural: two configurations are equal iff all five
/// aggregates are equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BigFiveTraitConfiguration {
    pub openness: BigFiveOpenness,
    pub conscientiousness: BigFiveConscientiousness,
    pub extraversion: BigFiveExtraversion,
    pub agreeableness: BigFiveAgreeableness,
    pub neuroticism: BigFiveNeuroticism,
}

impl BigFiveTraitConfiguration {
    /// Samples all five traits for a life stage, consuming the source in
    /// fixed O, C, E, A, N order so a seeded source reproduces the exact
    /// same configuration.
    pub fn random(
        life_stage: LifeStage,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, PersonalityError> {
        Ok(Self {
            openness: BigFiveOpenness::random(life_stage, rng)?,
            conscientiousness: BigFiveConscientiousness::random(life_stage, rng)?,
            extraversion: BigFiveExtraversion::random(life_stage, rng)?,
            agreeableness: BigFiveAgreeableness::random(life_stage, rng)?,
            neuroticism: BigFiveNeuroticism::random(life_stage, rng)?,
        })
    }
}

/// Selected conflict-resolution style with its informational priority
/// pair. The priorities come from the fixed style table, not from the
/// weighting itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigFiveConflictResolutionConfiguration {
    pub conflict_resolution_style: BigFiveConflictResolutionStyle,
    pub concern_for_self: PriorityLevel,
    pub concern_for_others: PriorityLevel,
}

impl BigFiveConflictResolutionConfiguration {
    /// Draws a style from the trait configuration and attaches its
    /// priority pair.
    pub fn random(traits: &BigFiveTraitConfiguration, rng: &mut dyn RandomSource) -> Self {
        let style = BigFiveConflictResolutionStyle::random(traits, rng);
        let (concern_for_self, concern_for_others) = style.priorities();
        Self {
            conflict_resolution_style: style,
            concern_for_self,
            concern_for_others,
        }
    }
}

/// A fully specified synthetic personality: life stage, trait
/// configuration, and derived conflict-resolution configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BigFivePersonality {
    pub life_stage: LifeStage,
    pub trait_configuration: BigFiveTraitConfiguration,
    pub conflict_resolution_configuration: BigFiveConflictResolutionConfiguration,
}

impl BigFivePersonality {
    /// Generates one personality for a life stage.
    ///
    /// Consumes exactly 16 uniform draws: three per trait across the
    /// five traits, plus one for style selection.
    pub fn random(
        life_stage: LifeStage,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, PersonalityError> {
        let trait_configuration = BigFiveTraitConfiguration::random(life_stage, rng)?;
        let conflict_resolution_configuration =
            BigFiveConflictResolutionConfiguration::random(&trait_configuration, rng);
        Ok(Self {
            life_stage,
            trait_configuration,
            conflict_resolution_configuration,
        })
    }

    /// Flattens the personality into a plain mapping of named fields for
    /// downstream consumers: per-trait scores, the fifteen facets, the
    /// style, and the two priority levels.
    pub fn to_mapping(&self) -> serde_json::Map<String, serde_json::Value> {
        use serde_json::json;

        let traits = &self.trait_configuration;
        let conflict = &self.conflict_resolution_configuration;
        let mut mapping = serde_json::Map::new();

        mapping.insert("life_stage".into(), json!(self.life_stage));

        mapping.insert("openness_score".into(), json!(traits.openness.score()));
        mapping.insert(
            "aesthetic_sensitivity".into(),
            json!(traits.openness.aesthetic_sensitivity()),
        );
        mapping.insert(
            "creative_imagination".into(),
            json!(traits.openness.creative_imagination()),
        );
        mapping.insert(
            "intellectual_curiosity".into(),
            json!(traits.openness.intellectual_curiosity()),
        );

        mapping.insert(
            "conscientiousness_score".into(),
            json!(traits.conscientiousness.score()),
        );
        mapping.insert(
            "organization".into(),
            json!(traits.conscientiousness.organization()),
        );
        mapping.insert(
            "productiveness".into(),
            json!(traits.conscientiousness.productiveness()),
        );
        mapping.insert(
            "responsibility".into(),
            json!(traits.conscientiousness.responsibility()),
        );

        mapping.insert(
            "extraversion_score".into(),
            json!(traits.extraversion.score()),
        );
        mapping.insert(
            "sociability".into(),
            json!(traits.extraversion.sociability()),
        );
        mapping.insert(
            "assertiveness".into(),
            json!(traits.extraversion.assertiveness()),
        );
        mapping.insert(
            "energy_level".into(),
            json!(traits.extraversion.energy_level()),
        );

        mapping.insert(
            "agreeableness_score".into(),
            json!(traits.agreeableness.score()),
        );
        mapping.insert(
            "compassion".into(),
            json!(traits.agreeableness.compassion()),
        );
        mapping.insert(
            "respectfulness".into(),
            json!(traits.agreeableness.respectfulness()),
        );
        mapping.insert("trust".into(), json!(traits.agreeableness.trust()));

        mapping.insert(
            "neuroticism_score".into(),
            json!(traits.neuroticism.score()),
        );
        mapping.insert("anxiety".into(), json!(traits.neuroticism.anxiety()));
        mapping.insert("depression".into(), json!(traits.neuroticism.depression()));
        mapping.insert(
            "emotional_volatility".into(),
            json!(traits.neuroticism.emotional_volatility()),
        );

        mapping.insert(
            "conflict_resolution_style".into(),
            json!(conflict.conflict_resolution_style),
        );
        mapping.insert("concern_for_self".into(), json!(conflict.concern_for_self));
        mapping.insert(
            "concern_for_others".into(),
            json!(conflict.concern_for_others),
        );

        mapping
    }

    /// Builds a short human-readable description from the trait scores
    /// and the selected conflict-resolution style.
    pub fn describe(&self) -> String {
        let traits = &self.trait_configuration;
        let mut phrases: Vec<&str> = Vec::new();

        if traits.openness.score() > 0.7 {
            phrases.push("curious and creative");
        } else if traits.openness.score() < 0.3 {
            phrases.push("practical and conventional");
        }

        if traits.conscientiousness.score() > 0.7 {
            phrases.push("organized and disciplined");
        } else if traits.conscientiousness.score() < 0.3 {
            phrases.push("spontaneous and flexible");
        }

        if traits.extraversion.score() > 0.7 {
            phrases.push("outgoing and energetic");
        } else if traits.extraversion.score() < 0.3 {
            phrases.push("reserved and solitary");
        }

        if traits.agreeableness.score() > 0.7 {
            phrases.push("cooperative and trusting");
        } else if traits.agreeableness.score() < 0.3 {
            phrases.push("competitive and skeptical");
        }

        if traits.neuroticism.score() > 0.7 {
            phrases.push("anxious and sensitive");
        } else if traits.neuroticism.score() < 0.3 {
            phrases.push("calm and resilient");
        }

        let sketch = if phrases.is_empty() {
            "a balanced temperament".to_string()
        } else {
            phrases.join(", ")
        };

        format!(
            "A {} with {}, leaning toward a {} conflict style.",
            self.life_stage,
            sketch,
            self.conflict_resolution_configuration.conflict_resolution_style
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomness::DefaultRandomSource;

    /// Replays a scripted sequence of draws, asserting each scripted
    /// value actually falls inside the requested interval.
    struct SequenceRandom {
        values: Vec<f64>,
        next: usize,
    }

    impl SequenceRandom {
        fn new(values: Vec<f64>) -> Self {
            Self { values, next: 0 }
        }
    }

    impl RandomSource for SequenceRandom {
        fn uniform(&mut self, a: f64, b: f64) -> f64 {
            let value = self.values[self.next];
            self.next += 1;
            assert!(
                (a..=b).contains(&value),
                "uniform value {value} not in {a}..{b}"
            );
            value
        }

        fn gauss(&mut self, _mean: f64, _stddev: f64) -> f64 {
            panic!("gauss is not expected in this test");
        }
    }

    /// Midpoint draws, counting how many times the source is consumed.
    struct CountingRandom {
        draws: usize,
    }

    impl RandomSource for CountingRandom {
        fn uniform(&mut self, a: f64, b: f64) -> f64 {
            self.draws += 1;
            (a + b) / 2.0
        }

        fn gauss(&mut self, _mean: f64, _stddev: f64) -> f64 {
            panic!("gauss is not expected in this test");
        }
    }

    fn maxed_traits() -> BigFiveTraitConfiguration {
        BigFiveTraitConfiguration {
            openness: BigFiveOpenness::new(1.0, 1.0, 1.0).unwrap(),
            conscientiousness: BigFiveConscientiousness::new(1.0, 1.0, 1.0).unwrap(),
            extraversion: BigFiveExtraversion::new(1.0, 1.0, 1.0).unwrap(),
            agreeableness: BigFiveAgreeableness::new(1.0, 1.0, 1.0).unwrap(),
            neuroticism: BigFiveNeuroticism::new(1.0, 1.0, 1.0).unwrap(),
        }
    }

    fn zeroed_traits() -> BigFiveTraitConfiguration {
        BigFiveTraitConfiguration {
            openness: BigFiveOpenness::new(0.0, 0.0, 0.0).unwrap(),
            conscientiousness: BigFiveConscientiousness::new(0.0, 0.0, 0.0).unwrap(),
            extraversion: BigFiveExtraversion::new(0.0, 0.0, 0.0).unwrap(),
            agreeableness: BigFiveAgreeableness::new(0.0, 0.0, 0.0).unwrap(),
            neuroticism: BigFiveNeuroticism::new(0.0, 0.0, 0.0).unwrap(),
        }
    }

    #[test]
    fn style_priorities_follow_the_fixed_table() {
        use BigFiveConflictResolutionStyle::*;
        use PriorityLevel::*;

        assert_eq!(Avoiding.priorities(), (Low, Low));
        assert_eq!(Obliging.priorities(), (Low, High));
        assert_eq!(Integrating.priorities(), (High, High));
        assert_eq!(Dominating.priorities(), (High, Low));
        assert_eq!(Compromising.priorities(), (Moderate, Moderate));
    }

    #[test]
    fn maxed_trait_scores_keep_every_style_reachable() {
        use BigFiveConflictResolutionStyle::*;

        let traits = maxed_traits();
        // Floored weights: avoiding 0.5, obliging 0.5, integrating 2.0,
        // dominating and compromising at the 1e-3 floor; total 3.002.
        let mut rng = SequenceRandom::new(vec![0.25, 0.75, 2.0, 3.0005, 3.0015]);
        let drawn: Vec<_> = (0..5)
            .map(|_| BigFiveConflictResolutionStyle::random(&traits, &mut rng))
            .collect();
        assert_eq!(
            drawn,
            vec![Avoiding, Obliging, Integrating, Dominating, Compromising]
        );
    }

    #[test]
    fn zeroed_trait_scores_fall_back_to_a_uniform_draw() {
        use BigFiveConflictResolutionStyle::*;

        let traits = zeroed_traits();
        let mut rng = SequenceRandom::new(vec![0.1, 1.1, 2.1, 3.1, 4.1]);
        let drawn: Vec<_> = (0..5)
            .map(|_| BigFiveConflictResolutionStyle::random(&traits, &mut rng))
            .collect();
        assert_eq!(
            drawn,
            vec![Avoiding, Obliging, Integrating, Dominating, Compromising]
        );
    }

    #[test]
    fn a_draw_landing_on_the_total_selects_the_final_interval() {
        // The uniform fallback total is exactly 5.0, so a draw at the
        // upper bound exercises the closed right end of the last interval.
        let traits = zeroed_traits();
        let mut rng = SequenceRandom::new(vec![5.0]);
        assert_eq!(
            BigFiveConflictResolutionStyle::random(&traits, &mut rng),
            BigFiveConflictResolutionStyle::Compromising
        );
    }

    #[test]
    fn raw_weights_match_the_documented_extremes() {
        let maxed = style_weights(&maxed_traits());
        assert!((maxed[0] - 0.5).abs() < 1e-12); // avoiding
        assert!((maxed[1] - 0.5).abs() < 1e-12); // obliging
        assert!((maxed[2] - 2.0).abs() < 1e-12); // integrating
        assert!(maxed[3] < 0.0); // dominating goes negative
        assert!(maxed[4].abs() < 1e-12); // compromising lands on zero

        for weight in style_weights(&zeroed_traits()) {
            assert_eq!(weight, 0.0);
        }
    }

    #[test]
    fn trait_configuration_is_deterministic_for_a_seed() {
        let mut rng_a = DefaultRandomSource::new(123);
        let mut rng_b = DefaultRandomSource::new(123);

        let traits_a = BigFiveTraitConfiguration::random(LifeStage::Adult, &mut rng_a).unwrap();
        let traits_b = BigFiveTraitConfiguration::random(LifeStage::Adult, &mut rng_b).unwrap();

        assert_eq!(traits_a, traits_b);
    }

    #[test]
    fn personality_random_configuration_is_internally_consistent() {
        let mut rng = DefaultRandomSource::new(7);
        let personality = BigFivePersonality::random(LifeStage::Adult, &mut rng).unwrap();
        let conflict = personality.conflict_resolution_configuration;

        let expected = conflict.conflict_resolution_style.priorities();
        assert_eq!(
            (conflict.concern_for_self, conflict.concern_for_others),
            expected
        );
    }

    #[test]
    fn personality_random_is_reproducible_for_a_seed() {
        let mut rng_a = DefaultRandomSource::new(7);
        let mut rng_b = DefaultRandomSource::new(7);

        let a = BigFivePersonality::random(LifeStage::Adult, &mut rng_a).unwrap();
        let b = BigFivePersonality::random(LifeStage::Adult, &mut rng_b).unwrap();

        assert_eq!(a, b);
        assert_eq!(
            a.conflict_resolution_configuration.conflict_resolution_style,
            b.conflict_resolution_configuration.conflict_resolution_style,
        );
    }

    #[test]
    fn personality_random_consumes_exactly_sixteen_draws() {
        let mut rng = CountingRandom { draws: 0 };
        BigFivePersonality::random(LifeStage::YoungAdult, &mut rng).unwrap();
        assert_eq!(rng.draws, 16);
    }

    #[test]
    fn to_mapping_exposes_every_named_field() {
        let mut rng = DefaultRandomSource::new(11);
        let personality = BigFivePersonality::random(LifeStage::Child, &mut rng).unwrap();
        let mapping = personality.to_mapping();

        for key in [
            "life_stage",
            "openness_score",
            "aesthetic_sensitivity",
            "creative_imagination",
            "intellectual_curiosity",
            "conscientiousness_score",
            "organization",
            "productiveness",
            "responsibility",
            "extraversion_score",
            "sociability",
            "assertiveness",
            "energy_level",
            "agreeableness_score",
            "compassion",
            "respectfulness",
            "trust",
            "neuroticism_score",
            "anxiety",
            "depression",
            "emotional_volatility",
            "conflict_resolution_style",
            "concern_for_self",
            "concern_for_others",
        ] {
            assert!(mapping.contains_key(key), "missing key {key}");
        }
        assert_eq!(mapping.len(), 24);
    }

    #[test]
    fn describe_mentions_the_life_stage_and_style() {
        let mut rng = DefaultRandomSource::new(3);
        let personality = BigFivePersonality::random(LifeStage::Adult, &mut rng).unwrap();
        let text = personality.describe();
        assert!(text.contains("adult"));
        assert!(text.contains(
            &personality
                .conflict_resolution_configuration
                .conflict_resolution_style
                .to_string()
        ));
    }
}
