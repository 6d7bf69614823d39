//! math-forge: Procedural math exercise generation and answer equivalence.
//!
//! This library generates Polish-language math exercises with canonical
//! answers and known misconceptions, validates learner answers against
//! them, and adapts the difficulty level to a learner's performance.

// Core modules
pub mod cli;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod generator;
pub mod random;
pub mod task;
pub mod validation;

// Re-export commonly used types
pub use config::EngineConfig;
pub use difficulty::{ControllerConfig, DifficultyBand, DifficultyController, HistoryEntry};
pub use error::{ConfigError, GeneratorError, SelectorKind};
pub use generator::{
    AlgebraTaskGenerator, CalculusTaskGenerator, ExpressionsTaskGenerator, FunctionsTaskGenerator,
    GenerationParams, GenericTaskGenerator, GeometryTaskGenerator, RealNumbersTaskGenerator,
    SelectionPolicy, SelectorPolicy, SequencesTaskGenerator, StatisticsTaskGenerator, TaskEngine,
    TaskGenerator, TrigonometryTaskGenerator,
};
pub use random::{ChaChaSource, RandomSource, SeededRandom};
pub use task::{AnswerKind, Department, Misconception, TaskDefinition};
pub use validation::{AnswerValidator, ValidationResult, ValidatorConfig};
