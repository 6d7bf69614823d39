//! Properties that must hold for every department, micro-skill and level.

use math_forge::{
    AnswerKind, AnswerValidator, ChaChaSource, Department, DifficultyController,
    GenerationParams, HistoryEntry, RandomSource, SeededRandom, TaskDefinition, TaskEngine,
};

const SEEDS: &[&str] = &["seed1", "alpha", "beta", "42", ""];

/// Every (department, micro-skill, difficulty, seed) combination.
fn each_seeded_task(engine: &TaskEngine, mut check: impl FnMut(&TaskDefinition)) {
    for department in Department::all() {
        for micro_skill in engine.micro_skills(department) {
            for level in 1..=10 {
                for seed in SEEDS {
                    let params = GenerationParams::new(f64::from(level)).with_micro_skill(micro_skill);
                    let task = engine
                        .generate_with_seed(department, seed, &params)
                        .unwrap_or_else(|e| {
                            panic!("{}/{} at {} with {:?}: {}", department, micro_skill, level, seed, e)
                        });
                    check(&task);
                }
            }
        }
    }
}

#[test]
fn test_seeded_generation_is_deterministic() {
    let engine = TaskEngine::default();
    for department in Department::all() {
        for seed in SEEDS {
            let params = GenerationParams::new(5.0);
            let first = engine
                .generate_with_seed(department, seed, &params)
                .expect("generate");
            let second = engine
                .generate_with_seed(department, seed, &params)
                .expect("generate");
            assert_eq!(first, second, "{} with {:?}", department, seed);
            assert_eq!(
                serde_json::to_string(&first).expect("serialize"),
                serde_json::to_string(&second).expect("serialize")
            );
        }
    }
}

#[test]
fn test_expected_answer_always_validates() {
    let engine = TaskEngine::default();
    let validator = AnswerValidator::default();
    each_seeded_task(&engine, |task| {
        let result = validator.validate_answer(&task.expected_answer, task);
        assert!(
            result.is_correct,
            "{} rejected its own answer {:?}",
            task.micro_skill, task.expected_answer
        );
        assert!((0.0..=1.0).contains(&result.confidence));
    });
}

#[test]
fn test_every_distractor_is_detected_as_its_misconception() {
    let engine = TaskEngine::default();
    let validator = AnswerValidator::default();
    each_seeded_task(&engine, |task| {
        for (wrong_answer, misconception) in &task.misconception_map {
            let result = validator.validate_answer(wrong_answer, task);
            assert!(
                !result.is_correct,
                "{}: distractor {:?} accepted for {:?}",
                task.micro_skill, wrong_answer, task.expected_answer
            );
            assert_eq!(
                result.detected_misconception.as_deref(),
                Some(misconception.kind.as_str()),
                "{}: distractor {:?}",
                task.micro_skill,
                wrong_answer
            );
            assert_eq!(result.feedback.as_deref(), Some(misconception.feedback.as_str()));
            assert_eq!(result.confidence, 0.8);
        }
    });
}

#[test]
fn test_task_invariants() {
    let engine = TaskEngine::default();
    each_seeded_task(&engine, |task| {
        assert!((1.0..=10.0).contains(&task.difficulty));
        assert!(!task.latex.is_empty());
        assert!(!task.expected_answer.is_empty());
        assert!(!task.skill_name.is_empty());
        assert!(uuid::Uuid::parse_str(&task.id).is_ok(), "id {:?}", task.id);
    });
}

#[test]
fn test_set_answers_accept_any_order() {
    let engine = TaskEngine::default();
    let validator = AnswerValidator::default();
    let mut checked = 0;
    each_seeded_task(&engine, |task| {
        if task.answer_kind != AnswerKind::UnorderedSet {
            return;
        }
        let reversed: Vec<&str> = task.expected_answer.rsplit(", ").collect();
        let reversed = reversed.join(", ");
        assert!(
            validator.validate_answer(&reversed, task).is_correct,
            "{}: {:?} vs {:?}",
            task.micro_skill,
            reversed,
            task.expected_answer
        );
        checked += 1;
    });
    assert!(checked > 0, "no set-valued tasks were generated");
}

#[test]
fn test_seed1_linear_equation_scenario() {
    let engine = TaskEngine::default();
    let params = GenerationParams::new(3.0).with_micro_skill("linear_equations");
    let task = engine
        .generate_with_seed(Department::Algebra, "seed1", &params)
        .expect("generate");

    assert!(task.latex.contains("3x + 2 = 32"), "latex: {}", task.latex);
    assert_eq!(task.expected_answer, "10");
    assert_eq!(task.micro_skill, "linear_equations");

    let validator = AnswerValidator::default();
    let result = validator.validate_answer("30", &task);
    assert!(!result.is_correct);
    assert_eq!(
        result.detected_misconception.as_deref(),
        Some("forgot_to_divide_by_coefficient")
    );
    assert!(validator.validate_answer("10.0", &task).is_correct);
    assert!(validator.validate_answer("20/2", &task).is_correct);
}

#[test]
fn test_quadratic_roots_in_any_order() {
    let engine = TaskEngine::default();
    let validator = AnswerValidator::default();
    let params = GenerationParams::new(5.0).with_micro_skill("quadratic_equations");
    for seed in SEEDS {
        let task = engine
            .generate_with_seed(Department::Algebra, seed, &params)
            .expect("generate");
        let roots: Vec<&str> = task.expected_answer.split(", ").collect();
        let labeled = format!("x1 = {} lub x2 = {}", roots[roots.len() - 1], roots[0]);
        assert!(
            validator.validate_answer(&labeled, &task).is_correct,
            "{:?} vs {:?}",
            labeled,
            task.expected_answer
        );
    }
}

#[test]
fn test_drills_cover_their_misconceptions() {
    let engine = TaskEngine::default();
    let validator = AnswerValidator::default();
    let mut rng = SeededRandom::new("drills");
    for department in Department::all() {
        for misconception in engine.misconceptions(department) {
            let task = engine
                .generate_misconception_task(department, misconception, &mut rng)
                .expect("drill");
            let (wrong_answer, _) = task
                .misconception_map
                .iter()
                .find(|(_, m)| m.kind == *misconception)
                .unwrap_or_else(|| panic!("{} drill lacks {}", department, misconception));
            let result = validator.validate_answer(wrong_answer, &task);
            assert_eq!(result.detected_misconception.as_deref(), Some(*misconception));
        }
    }
}

#[test]
fn test_unknown_selectors_are_rejected() {
    let engine = TaskEngine::default();
    let mut rng = SeededRandom::new("strict");
    for department in Department::all() {
        let err = engine
            .generate(department, 5.0, Some("no_such_skill"), &mut rng)
            .expect_err("unknown micro-skill");
        assert!(err.is_unsupported_selector());

        let err = engine
            .generate_misconception_task(department, "no_such_misconception", &mut rng)
            .expect_err("unknown misconception");
        assert!(err.is_unsupported_selector());
    }
}

#[test]
fn test_out_of_range_difficulty_is_clamped() {
    let engine = TaskEngine::default();
    let mut rng = SeededRandom::new("clamp");
    for department in Department::all() {
        for level in [-5.0, 0.0, 10.5, 100.0, f64::NAN] {
            let task = engine
                .generate(department, level, None, &mut rng)
                .expect("generate");
            assert!((1.0..=10.0).contains(&task.difficulty), "{}", task.difficulty);
        }
    }
}

#[test]
fn test_chacha_sources_drive_every_department() {
    let engine = TaskEngine::default();
    let validator = AnswerValidator::default();

    let mut seeded = ChaChaSource::from_seed_str("chacha");
    let mut again = ChaChaSource::from_seed_str("chacha");
    let mut fresh = ChaChaSource::non_deterministic();
    assert!(!fresh.is_deterministic());

    for department in Department::all() {
        let a = engine.generate(department, 6.0, None, &mut seeded).expect("generate");
        let b = engine.generate(department, 6.0, None, &mut again).expect("generate");
        assert_eq!(a, b);

        let task = engine.generate(department, 6.0, None, &mut fresh).expect("generate");
        assert!(validator.validate_answer(&task.expected_answer, &task).is_correct);
    }
}

#[test]
fn test_controller_rewards_correct_answers() {
    let controller = DifficultyController::default();
    for level in 1..=10 {
        let level = f64::from(level);
        for (time, confidence) in [(5_000.0, 0.95), (20_000.0, 0.8), (90_000.0, 0.1)] {
            let up = controller.get_next_difficulty(level, true, time, confidence);
            let down = controller.get_next_difficulty(level, false, time, confidence);
            assert!(up >= down, "level {} time {} confidence {}", level, time, confidence);
            assert!((1.0..=10.0).contains(&up));
            assert!((1.0..=10.0).contains(&down));
        }
    }
}

#[test]
fn test_controller_mastery_gate() {
    let controller = DifficultyController::default();
    let mastered = vec![HistoryEntry::new(7.0, true, 12_000.0, 0.9); 3];
    assert!(controller.should_progress_to_next_micro_skill(&mastered));

    let short = vec![HistoryEntry::new(7.0, true, 12_000.0, 0.9); 2];
    assert!(!controller.should_progress_to_next_micro_skill(&short));

    let mut slipped = mastered.clone();
    slipped.push(HistoryEntry::new(7.0, false, 12_000.0, 0.9));
    assert!(!controller.should_progress_to_next_micro_skill(&slipped));

    assert_eq!(controller.calculate_optimal_difficulty(&[]), 3.0);
}
