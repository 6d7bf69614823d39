//! CLI command definitions for math-forge.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::difficulty::{DifficultyBand, DifficultyController, HistoryEntry};
use crate::generator::TaskEngine;
use crate::random::{ChaChaSource, RandomSource, SeededRandom};
use crate::task::{Department, TaskDefinition};
use crate::validation::AnswerValidator;

/// Procedural math exercise generator and answer checker.
#[derive(Parser)]
#[command(name = "math-forge")]
#[command(about = "Generate math exercises, check answers and adapt difficulty")]
#[command(version)]
#[command(
    long_about = "math-forge generates Polish math exercises with canonical answers and known misconceptions.\n\nExample usage:\n  math-forge generate --department algebra --difficulty 3 --seed seed1\n  math-forge validate --task task.json --answer 10"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// YAML configuration file. Environment variables override its values.
    #[arg(short, long, env = "MATH_FORGE_CONFIG", global = true)]
    pub config: Option<String>,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate one or more exercises as JSON.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Check an answer against a task file.
    Validate(ValidateArgs),

    /// Compare a list of solutions with the expected values, in any order.
    CheckEquation(CheckEquationArgs),

    /// Next difficulty after a single answer.
    NextDifficulty(NextDifficultyArgs),

    /// Optimal difficulty and mastery decision for an answer history.
    OptimalDifficulty(OptimalDifficultyArgs),

    /// List departments with their micro-skills and drills.
    #[command(alias = "ls")]
    ListSkills(ListSkillsArgs),
}

/// Arguments for `math-forge generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Department tag (e.g. algebra, geometry). Unknown tags produce basic arithmetic.
    #[arg(short, long)]
    pub department: String,

    /// Difficulty level from 1 to 10.
    #[arg(short = 'D', long, default_value = "3", allow_negative_numbers = true)]
    pub difficulty: f64,

    /// Micro-skill tag. Picked by the department when omitted.
    #[arg(short, long, conflicts_with = "misconception")]
    pub micro_skill: Option<String>,

    /// Seed for reproducible output. Without it, generation is non-deterministic.
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Generate the hand-authored drill for this misconception.
    #[arg(long)]
    pub misconception: Option<String>,

    /// Number of tasks to generate.
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    /// Raise the level by one for each task.
    #[arg(long, conflicts_with_all = ["micro_skill", "misconception"])]
    pub progressive: bool,
}

/// Arguments for `math-forge validate`.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// JSON file with a generated task.
    #[arg(short, long)]
    pub task: String,

    /// The learner's answer.
    #[arg(short, long, allow_hyphen_values = true)]
    pub answer: String,
}

/// Arguments for `math-forge check-equation`.
#[derive(Parser, Debug)]
pub struct CheckEquationArgs {
    /// The learner's solutions, e.g. "x1 = 2 lub x2 = -3".
    #[arg(short, long, allow_hyphen_values = true)]
    pub answer: String,

    /// Expected solutions.
    #[arg(short, long, num_args = 1.., required = true, allow_negative_numbers = true)]
    pub expected: Vec<String>,
}

/// Arguments for `math-forge next-difficulty`.
#[derive(Parser, Debug)]
pub struct NextDifficultyArgs {
    /// Current difficulty level.
    #[arg(long)]
    pub level: f64,

    /// The answer was correct.
    #[arg(long)]
    pub correct: bool,

    /// Response time in milliseconds.
    #[arg(short, long)]
    pub response_time: f64,

    /// Confidence from 0 to 1.
    #[arg(long)]
    pub confidence: f64,
}

/// Arguments for `math-forge optimal-difficulty`.
#[derive(Parser, Debug)]
pub struct OptimalDifficultyArgs {
    /// JSON file with an array of history entries, oldest first.
    #[arg(long)]
    pub history: String,
}

/// Arguments for `math-forge list-skills`.
#[derive(Parser, Debug)]
pub struct ListSkillsArgs {
    /// Only list this department.
    #[arg(short, long)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct DifficultyOutput {
    next_difficulty: f64,
    band: DifficultyBand,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptimalDifficultyOutput {
    optimal_difficulty: f64,
    band: DifficultyBand,
    should_progress: bool,
    entries: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SkillListing {
    department: Department,
    display_name: &'static str,
    micro_skills: Vec<&'static str>,
    misconceptions: Vec<&'static str>,
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli())
}

/// Run the CLI with the parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => run_generate_command(args, &config),
        Commands::Validate(args) => run_validate_command(args, &config),
        Commands::CheckEquation(args) => run_check_equation_command(args, &config),
        Commands::NextDifficulty(args) => run_next_difficulty_command(args, &config),
        Commands::OptimalDifficulty(args) => run_optimal_difficulty_command(args, &config),
        Commands::ListSkills(args) => run_list_skills_command(args, &config),
    }
}

fn load_config(path: Option<&str>) -> anyhow::Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config file {}", path))?
            .with_env_overrides()?,
        None => EngineConfig::from_env()?,
    };
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ============================================================================
// Command Implementations
// ============================================================================

fn run_generate_command(args: GenerateArgs, config: &EngineConfig) -> anyhow::Result<()> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }

    let mut rng: Box<dyn RandomSource> = match args.seed.as_deref() {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => {
            warn!("No --seed given, generating non-reproducible tasks");
            Box::new(ChaChaSource::non_deterministic())
        }
    };

    let engine = TaskEngine::new(config);
    let tasks = generate_tasks(&engine, &args, rng.as_mut())?;
    info!(
        department = %args.department,
        count = tasks.len(),
        "Generated tasks"
    );

    match tasks.as_slice() {
        [task] => print_json(task),
        _ => print_json(&tasks),
    }
}

fn generate_tasks(
    engine: &TaskEngine,
    args: &GenerateArgs,
    rng: &mut dyn RandomSource,
) -> anyhow::Result<Vec<TaskDefinition>> {
    let department = Department::parse(&args.department);
    if department.is_none() && (args.micro_skill.is_some() || args.misconception.is_some()) {
        bail!(
            "Unknown department '{}'; --micro-skill and --misconception need a known department",
            args.department
        );
    }

    let mut level = args.difficulty;
    let mut tasks = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let task = match department {
            None => engine.generate_for(&args.department, level, rng)?,
            Some(department) => match args.misconception.as_deref() {
                Some(misconception) => {
                    engine.generate_misconception_task(department, misconception, rng)?
                }
                None if args.progressive => {
                    engine.generate_progressive_task(department, level, rng)?
                }
                None => engine.generate(department, level, args.micro_skill.as_deref(), rng)?,
            },
        };
        if args.progressive {
            level = task.difficulty;
        }
        tasks.push(task);
    }
    Ok(tasks)
}

fn run_validate_command(args: ValidateArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let task = load_task(Path::new(&args.task))?;
    let validator = AnswerValidator::new(config.validator.clone());
    let result = validator.validate_answer(&args.answer, &task);
    info!(
        task_id = %task.id,
        correct = result.is_correct,
        "Validated answer"
    );
    print_json(&result)
}

fn load_task(path: &Path) -> anyhow::Result<TaskDefinition> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read task file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse task file {}", path.display()))
}

fn run_check_equation_command(
    args: CheckEquationArgs,
    config: &EngineConfig,
) -> anyhow::Result<()> {
    let validator = AnswerValidator::new(config.validator.clone());
    print_json(&validator.validate_equation_answer(&args.answer, &args.expected))
}

fn run_next_difficulty_command(
    args: NextDifficultyArgs,
    config: &EngineConfig,
) -> anyhow::Result<()> {
    let controller = DifficultyController::new(config.controller.clone());
    let next_difficulty = controller.get_next_difficulty(
        args.level,
        args.correct,
        args.response_time,
        args.confidence,
    );
    print_json(&DifficultyOutput {
        next_difficulty,
        band: DifficultyBand::from_level(next_difficulty),
    })
}

fn run_optimal_difficulty_command(
    args: OptimalDifficultyArgs,
    config: &EngineConfig,
) -> anyhow::Result<()> {
    let history = load_history(Path::new(&args.history))?;
    let controller = DifficultyController::new(config.controller.clone());
    print_json(&optimal_difficulty_report(&controller, &history))
}

fn load_history(path: &Path) -> anyhow::Result<Vec<HistoryEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse history file {}", path.display()))
}

fn optimal_difficulty_report(
    controller: &DifficultyController,
    history: &[HistoryEntry],
) -> OptimalDifficultyOutput {
    let optimal_difficulty = controller.calculate_optimal_difficulty(history);
    OptimalDifficultyOutput {
        optimal_difficulty,
        band: DifficultyBand::from_level(optimal_difficulty),
        should_progress: controller.should_progress_to_next_micro_skill(history),
        entries: history.len(),
    }
}

fn run_list_skills_command(args: ListSkillsArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let departments = match args.department.as_deref() {
        Some(tag) => match Department::parse(tag) {
            Some(department) => vec![department],
            None => bail!("Unknown department '{}'", tag),
        },
        None => Department::all(),
    };
    let engine = TaskEngine::new(config);
    print_json(&skill_listings(&engine, &departments))
}

fn skill_listings(engine: &TaskEngine, departments: &[Department]) -> Vec<SkillListing> {
    departments
        .iter()
        .map(|&department| SkillListing {
            department,
            display_name: department.display_name(),
            micro_skills: engine.micro_skills(department),
            misconceptions: engine.misconceptions(department).to_vec(),
        })
        .collect()
}
