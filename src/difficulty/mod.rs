//! Adaptive difficulty for the exercise engine.
//!
//! This module turns a learner's performance signals (correctness, response
//! time and self-reported confidence) into the next difficulty level on the
//! `[1, 10]` scale, and decides when a micro-skill counts as mastered.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::task::clamp_difficulty;

/// Coarse difficulty band used for operand scaling and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyBand {
    Easy,
    Medium,
    Hard,
}

impl DifficultyBand {
    /// Band of a level: below 4 is easy, below 8 is medium.
    pub fn from_level(level: f64) -> Self {
        let level = clamp_difficulty(level);
        if level < 4.0 {
            DifficultyBand::Easy
        } else if level < 8.0 {
            DifficultyBand::Medium
        } else {
            DifficultyBand::Hard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyBand::Easy => "easy",
            DifficultyBand::Medium => "medium",
            DifficultyBand::Hard => "hard",
        }
    }
}

/// One answered exercise, oldest first in a history slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub difficulty: f64,
    pub is_correct: bool,
    /// Response time in milliseconds.
    pub response_time: f64,
    /// Self-reported or derived confidence in `[0, 1]`.
    pub confidence: f64,
}

impl HistoryEntry {
    pub fn new(difficulty: f64, is_correct: bool, response_time: f64, confidence: f64) -> Self {
        Self {
            difficulty,
            is_correct,
            response_time,
            confidence,
        }
    }
}

/// Tunables of the [`DifficultyController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Number of most recent entries considered by
    /// [`DifficultyController::calculate_optimal_difficulty`].
    pub history_window: usize,
    /// Number of most recent entries that must all be correct for mastery.
    pub mastery_window: usize,
    /// Level returned for an empty history.
    pub default_difficulty: f64,
    /// Minimum mean difficulty of the mastery window.
    pub mastery_min_difficulty: f64,
    /// Minimum mean confidence of the mastery window.
    pub mastery_min_confidence: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            history_window: 5,
            mastery_window: 3,
            default_difficulty: 3.0,
            mastery_min_difficulty: 6.0,
            mastery_min_confidence: 0.8,
        }
    }
}

/// Maps performance signals to the next difficulty level.
#[derive(Debug, Clone, Default)]
pub struct DifficultyController {
    config: ControllerConfig,
}

impl DifficultyController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Next level after a single answer.
    ///
    /// | outcome   | condition                          | delta |
    /// |-----------|------------------------------------|-------|
    /// | correct   | time < 15 s and confidence > 0.9   | +1.5  |
    /// | correct   | time < 30 s and confidence > 0.7   | +1.0  |
    /// | correct   | otherwise                          | +0.5  |
    /// | incorrect | confidence < 0.3                   | -2.0  |
    /// | incorrect | confidence < 0.6                   | -1.0  |
    /// | incorrect | otherwise                          | -0.5  |
    ///
    /// The result is clamped to `[1, 10]` and may land on a half step;
    /// callers that need an integer level should round it.
    pub fn get_next_difficulty(
        &self,
        current_level: f64,
        is_correct: bool,
        response_time_ms: f64,
        confidence: f64,
    ) -> f64 {
        let delta = if is_correct {
            if response_time_ms < 15_000.0 && confidence > 0.9 {
                1.5
            } else if response_time_ms < 30_000.0 && confidence > 0.7 {
                1.0
            } else {
                0.5
            }
        } else if confidence < 0.3 {
            -2.0
        } else if confidence < 0.6 {
            -1.0
        } else {
            -0.5
        };

        let next = clamp_difficulty(clamp_difficulty(current_level) + delta);
        debug!(current_level, is_correct, delta, next, "next difficulty");
        next
    }

    /// Level that fits the recent history best.
    ///
    /// Starts from the most recent difficulty and adjusts it by the success
    /// rate, the mean response time and the mean confidence over the last
    /// `history_window` entries. An empty history yields `default_difficulty`.
    /// Like [`Self::get_next_difficulty`], the level may be a half step.
    pub fn calculate_optimal_difficulty(&self, history: &[HistoryEntry]) -> f64 {
        let recent = self.recent(history, self.config.history_window);
        let Some(last) = recent.last() else {
            return clamp_difficulty(self.config.default_difficulty);
        };

        let n = recent.len() as f64;
        let success_rate = recent.iter().filter(|e| e.is_correct).count() as f64 / n;
        let avg_time = recent.iter().map(|e| e.response_time).sum::<f64>() / n;
        let avg_confidence = recent.iter().map(|e| e.confidence).sum::<f64>() / n;

        let mut level = clamp_difficulty(last.difficulty);

        if success_rate > 0.8 {
            level += 1.0;
        } else if success_rate < 0.4 {
            level -= 1.0;
        }

        if avg_time < 20_000.0 && success_rate > 0.6 {
            level += 0.5;
        } else if avg_time > 60_000.0 {
            level -= 0.5;
        }

        if avg_confidence > 0.8 && success_rate > 0.6 {
            level += 0.5;
        } else if avg_confidence < 0.5 {
            level -= 0.5;
        }

        let level = clamp_difficulty(level);
        debug!(
            entries = recent.len(),
            success_rate, avg_time, avg_confidence, level, "optimal difficulty"
        );
        level
    }

    /// True once the last `mastery_window` answers are all correct at a high
    /// enough mean difficulty and confidence.
    pub fn should_progress_to_next_micro_skill(&self, history: &[HistoryEntry]) -> bool {
        let window = self.config.mastery_window.max(1);
        if history.len() < window {
            return false;
        }

        let recent = self.recent(history, window);
        if !recent.iter().all(|e| e.is_correct) {
            return false;
        }

        let n = recent.len() as f64;
        let avg_difficulty = recent.iter().map(|e| e.difficulty).sum::<f64>() / n;
        let avg_confidence = recent.iter().map(|e| e.confidence).sum::<f64>() / n;

        avg_difficulty >= self.config.mastery_min_difficulty
            && avg_confidence >= self.config.mastery_min_confidence
    }

    fn recent<'a>(&self, history: &'a [HistoryEntry], window: usize) -> &'a [HistoryEntry] {
        &history[history.len().saturating_sub(window)..]
    }
}
