//! Registry of the department generators.

use tracing::warn;

use super::{
    AlgebraTaskGenerator, CalculusTaskGenerator, ExpressionsTaskGenerator, FunctionsTaskGenerator,
    GenerationParams, GenericTaskGenerator, GeometryTaskGenerator, RealNumbersTaskGenerator,
    Result, SelectorPolicy, SequencesTaskGenerator, StatisticsTaskGenerator, TaskGenerator,
    TrigonometryTaskGenerator,
};
use crate::config::EngineConfig;
use crate::random::RandomSource;
use crate::task::{Department, TaskDefinition};

/// Runs `$body` with `$generator` bound to the generator of `$department`.
macro_rules! dispatch {
    ($engine:expr, $department:expr, |$generator:ident| $body:expr) => {
        match $department {
            Department::RealNumbers => {
                let $generator = &$engine.real_numbers;
                $body
            }
            Department::Algebra => {
                let $generator = &$engine.algebra;
                $body
            }
            Department::AlgebraicExpressions => {
                let $generator = &$engine.expressions;
                $body
            }
            Department::Geometry => {
                let $generator = &$engine.geometry;
                $body
            }
            Department::Trigonometry => {
                let $generator = &$engine.trigonometry;
                $body
            }
            Department::Calculus => {
                let $generator = &$engine.calculus;
                $body
            }
            Department::Functions => {
                let $generator = &$engine.functions;
                $body
            }
            Department::Sequences => {
                let $generator = &$engine.sequences;
                $body
            }
            Department::Statistics => {
                let $generator = &$engine.statistics;
                $body
            }
        }
    };
}

/// One generator per department plus the generic arithmetic fallback.
///
/// The engine holds no random state; every call borrows the caller's
/// [`RandomSource`].
#[derive(Debug, Clone)]
pub struct TaskEngine {
    real_numbers: RealNumbersTaskGenerator,
    algebra: AlgebraTaskGenerator,
    expressions: ExpressionsTaskGenerator,
    geometry: GeometryTaskGenerator,
    trigonometry: TrigonometryTaskGenerator,
    calculus: CalculusTaskGenerator,
    functions: FunctionsTaskGenerator,
    sequences: SequencesTaskGenerator,
    statistics: StatisticsTaskGenerator,
    generic: GenericTaskGenerator,
    selector_policy: SelectorPolicy,
}

impl Default for TaskEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl TaskEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let policy = config.selector_policy;
        Self {
            real_numbers: RealNumbersTaskGenerator::new().with_selector_policy(policy),
            algebra: AlgebraTaskGenerator::new().with_selector_policy(policy),
            expressions: ExpressionsTaskGenerator::new().with_selector_policy(policy),
            geometry: GeometryTaskGenerator::new().with_selector_policy(policy),
            trigonometry: TrigonometryTaskGenerator::new().with_selector_policy(policy),
            calculus: CalculusTaskGenerator::new().with_selector_policy(policy),
            functions: FunctionsTaskGenerator::new().with_selector_policy(policy),
            sequences: SequencesTaskGenerator::new().with_selector_policy(policy),
            statistics: StatisticsTaskGenerator::new().with_selector_policy(policy),
            generic: GenericTaskGenerator::new().with_selector_policy(policy),
            selector_policy: policy,
        }
    }

    pub fn selector_policy(&self) -> SelectorPolicy {
        self.selector_policy
    }

    pub fn generic(&self) -> &GenericTaskGenerator {
        &self.generic
    }

    pub fn generate(
        &self,
        department: Department,
        difficulty: f64,
        micro_skill: Option<&str>,
        rng: &mut dyn RandomSource,
    ) -> Result<TaskDefinition> {
        dispatch!(self, department, |generator| generator
            .generate_task(difficulty, micro_skill, rng))
    }

    pub fn generate_misconception_task(
        &self,
        department: Department,
        misconception: &str,
        rng: &mut dyn RandomSource,
    ) -> Result<TaskDefinition> {
        dispatch!(self, department, |generator| generator
            .generate_misconception_task(misconception, rng))
    }

    pub fn generate_progressive_task(
        &self,
        department: Department,
        current_level: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<TaskDefinition> {
        dispatch!(self, department, |generator| generator
            .generate_progressive_task(current_level, rng))
    }

    pub fn generate_with_seed(
        &self,
        department: Department,
        seed: &str,
        params: &GenerationParams,
    ) -> Result<TaskDefinition> {
        dispatch!(self, department, |generator| generator
            .generate_task_with_seed(seed, params))
    }

    /// Generates a task for a department named by a free-form tag. A tag
    /// that names no department produces a basic arithmetic exercise.
    pub fn generate_for(
        &self,
        department: &str,
        difficulty: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<TaskDefinition> {
        match Department::parse(department) {
            Some(department) => self.generate(department, difficulty, None, rng),
            None => {
                warn!(department, "unknown department, generating basic arithmetic");
                self.generic.generate_task(difficulty, None, rng)
            }
        }
    }

    pub fn micro_skills(&self, department: Department) -> Vec<&'static str> {
        dispatch!(self, department, |generator| generator.micro_skills())
    }

    /// Misconceptions with a hand-authored drill in the department.
    pub fn misconceptions(&self, department: Department) -> &'static [&'static str] {
        dispatch!(self, department, |generator| generator.misconceptions())
    }
}
