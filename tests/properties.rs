use proptest::prelude::*;
use stably::prelude::*;

const TYPES: [&str; 4] = ["start", "middle", "end", "audit"];
const MAX_STEPS: usize = 6;

fn step_id(i: usize) -> String {
    format!("s{}", i)
}

prop_compose! {
    fn contract_strategy()(
        step_types in prop::collection::vec(0..TYPES.len(), 0..MAX_STEPS),
        allowed in prop::option::of(prop::collection::vec(0..TYPES.len(), 0..4)),
        required in prop::option::of(prop::collection::vec(0..MAX_STEPS, 0..3)),
        order in prop::collection::vec((0..MAX_STEPS, 0..MAX_STEPS), 0..3),
        transitions in prop::collection::vec(
            (0..MAX_STEPS, prop::collection::vec(0..MAX_STEPS, 0..3)),
            0..3,
        )
    ) -> Contract {
        let mut contract = Contract::new("generated");
        for (i, t) in step_types.into_iter().enumerate() {
            contract = contract.with_step(ContractStep::new(step_id(i), TYPES[t]));
        }

        let mut structural = StructuralRules::new();
        if let Some(allowed) = allowed {
            structural = structural.with_allowed_action_types(allowed.into_iter().map(|t| TYPES[t]));
        }
        if let Some(required) = required {
            structural = structural.with_required_steps(required.into_iter().map(step_id));
        }
        for (before, after) in order {
            structural = structural.with_order_constraint(step_id(before), step_id(after));
        }
        contract = contract.with_structural(structural);

        for (from, to) in transitions {
            contract = contract.with_transition(TransitionRule::new(
                step_id(from),
                to.into_iter().map(step_id),
            ));
        }
        contract
    }
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop::sample::select(vec!["start", "middle", "end", "audit", "other"])
        .prop_map(|t| Action::new(t))
}

fn pipeline_strategy() -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec(action_strategy(), 0..12)
}

fn missing_required(result: &ValidationResult) -> Vec<&String> {
    result
        .errors
        .iter()
        .filter(|e| e.starts_with("Required step"))
        .collect()
}

proptest! {
    #[test]
    fn validation_is_deterministic(contract in contract_strategy(), pipeline in pipeline_strategy()) {
        let first = validate_pipeline(&pipeline, &contract);
        let second = validate_pipeline(&pipeline, &contract);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.ok, first.errors.is_empty());

        let action_checks: Vec<ValidationResult> =
            pipeline.iter().map(|a| validate_action(a, &contract)).collect();
        let repeated: Vec<ValidationResult> =
            pipeline.iter().map(|a| validate_action(a, &contract)).collect();
        prop_assert_eq!(action_checks, repeated);
    }

    #[test]
    fn validation_never_mutates_inputs(contract in contract_strategy(), pipeline in pipeline_strategy()) {
        let contract_json = contract.to_json_compact().unwrap();
        let pipeline_before = pipeline.clone();

        let validator = create_validator(&contract);
        validate_pipeline(&pipeline, &contract);
        validator.validate_pipeline(&pipeline);
        for action in &pipeline {
            validate_action(action, &contract);
            validator.validate_action(action);
        }

        prop_assert_eq!(contract.to_json_compact().unwrap(), contract_json);
        prop_assert_eq!(pipeline, pipeline_before);
    }

    #[test]
    fn empty_pipeline_is_accepted_without_required_or_allowed(contract in contract_strategy()) {
        let mut relaxed = contract;
        if let Some(structural) = relaxed.structural.as_mut() {
            structural.required_steps = None;
            structural.allowed_action_types = None;
        }
        prop_assert!(validate_pipeline(&[], &relaxed).ok);
    }

    #[test]
    fn repetition_never_adds_missing_steps(
        contract in contract_strategy(),
        pipeline in pipeline_strategy(),
        pick in any::<prop::sample::Index>(),
        copies in 1..5usize
    ) {
        prop_assume!(!pipeline.is_empty());
        let baseline = validate_pipeline(&pipeline, &contract);

        let repeated_action = pick.get(&pipeline).clone();
        let mut extended = pipeline.clone();
        extended.extend(std::iter::repeat(repeated_action).take(copies));
        let after = validate_pipeline(&extended, &contract);

        prop_assert_eq!(missing_required(&baseline), missing_required(&after));
    }

    #[test]
    fn generator_yields_source_in_order(pipeline in pipeline_strategy(), stop in 0..12usize) {
        let mut abandoned = generate(&pipeline);
        for _ in 0..stop {
            abandoned.next();
        }
        drop(abandoned);

        let walked: Vec<Action> = generate(&pipeline).cloned().collect();
        prop_assert_eq!(&walked, &pipeline);
        prop_assert_eq!(generate(&pipeline).len(), pipeline.len());
    }
}
