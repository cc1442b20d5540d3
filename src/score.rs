use crate::window::WINDOW_SIZE;
use serde::Serialize;

/// Typing mood associated with each cadence template, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Energetic,
    Balanced,
    Mindful,
}

/// Rendering parameters consumed by the particle surface on the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleHint {
    pub size: f64,
    pub speed: f64,
    pub color: &'static str,
}

/// Deterministic result of scoring one normalized interval window.
///
/// Purely derived and immutable; serialized to the caller and discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    #[serde(rename = "suggestedTone")]
    pub suggested_tone: Tone,
    #[serde(rename = "particleHint")]
    pub particle_hint: ParticleHint,
}

/// Fixed cadence templates: fast, steady, slow. Row order is the tie-break
/// order (lowest index wins on an exact tie).
const WEIGHTS: [[f64; WINDOW_SIZE]; 3] = [
    [0.3, 0.2, 0.1, 0.1, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05],
    [0.1; WINDOW_SIZE],
    [0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.1, 0.2, 0.2, 0.3],
];

struct Preset {
    tone: Tone,
    size: f64,
    speed: f64,
    color: &'static str,
}

/// Visual presets keyed by winning template index.
const PRESETS: [Preset; 3] = [
    Preset {
        tone: Tone::Energetic,
        size: 4.0,
        speed: 2.5,
        color: "#64b5f6",
    },
    Preset {
        tone: Tone::Balanced,
        size: 3.0,
        speed: 1.5,
        color: "#81c784",
    },
    Preset {
        tone: Tone::Mindful,
        size: 2.0,
        speed: 1.0,
        color: "#ba68c8",
    },
];

fn dot(values: &[f64], weights: &[f64; WINDOW_SIZE]) -> f64 {
    values
        .iter()
        .zip(weights.iter())
        .map(|(value, weight)| value * weight)
        .sum()
}

/// Score a normalized interval window against the fixed templates and map
/// the winner to its visual preset.
///
/// Stateless and fully deterministic: identical input always produces an
/// identical tuple. Exact ties resolve to the lowest-indexed template.
pub fn analyze(normalized: &[f64]) -> ScoreResult {
    let scores: Vec<f64> = WEIGHTS.iter().map(|row| dot(normalized, row)).collect();

    let mut winner = 0;
    for (index, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[winner] {
            winner = index;
        }
    }

    let preset = &PRESETS[winner];
    ScoreResult {
        score: scores[winner],
        suggested_tone: preset.tone,
        particle_hint: ParticleHint {
            size: preset.size,
            speed: preset.speed,
            color: preset.color,
        },
    }
}
