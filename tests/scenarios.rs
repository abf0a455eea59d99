use otter_bmc::{
    config::EngineConfig,
    driver::{check_each_property, Driver, Outcome, Report},
    engine::{Context, Status, Stop},
    input,
    specification::{Options, Source, Specification},
};

fn context() -> Result<Context, otter_bmc::types::err::EngineError> {
    Ok(Context::from_config(EngineConfig::default()))
}

fn check(source: &Source, options: Options, bound: usize) -> Report {
    let spec = Specification::build(source, options).unwrap();
    Driver::new(&spec, bound).run(context, |_| {}).unwrap()
}

fn both_modes() -> [Options; 2] {
    [
        Options::default(),
        Options {
            incremental: false,
            inertia: true,
        },
    ]
}

fn door() -> Source {
    Source::default()
        .boolean("door_open")
        .init("door_open=false")
        .safety("~door_open")
}

fn lamp() -> Source {
    Source::default()
        .boolean("lamp")
        .init("lamp=false")
        .rule("on", ["~lamp"], ["lamp"])
        .rule("off", ["lamp"], ["~lamp"])
        .safety("~lamp")
}

fn lift() -> Source {
    Source::default()
        .enumerated("floor", ["0", "1", "2"])
        .init("floor=0")
        .rule("up_from_0", ["floor=0"], ["floor=1"])
        .rule("up_from_1", ["floor=1"], ["floor=2"])
        .rule("stay_at_2", ["floor=2"], ["floor=2"])
        .safety("floor=0 | floor=1 | floor=2")
}

mod scenarios {
    use super::*;

    #[test]
    fn a_door_stays_shut() {
        for options in both_modes() {
            let report = check(&door(), options, 4);
            assert_eq!(report.outcome, Outcome::SafeUpTo(4));
            assert_eq!(report.steps.len(), 5);
            assert!(report
                .steps
                .iter()
                .all(|step| step.status == Status::Unsatisfiable));
        }
    }

    #[test]
    fn b_lamp_lit_at_second_step() {
        for options in both_modes() {
            let report = check(&lamp(), options, 3);
            match report.outcome {
                Outcome::Counterexample(trace) => {
                    assert_eq!(trace.step, 1);
                    assert_eq!(trace.value_of(0, "lamp"), Some("false"));
                    assert_eq!(trace.value_of(1, "lamp"), Some("true"));

                    let printed = trace.to_string();
                    let lines: Vec<_> = printed.lines().collect();
                    assert_eq!(lines.len(), 2);
                    assert!(lines[0].starts_with("step 0: lamp=false"));
                    assert!(lines[1].starts_with("step 1: lamp=true"));
                }
                other => panic!("expected a counterexample, found {other:?}"),
            }
            assert_eq!(report.steps[0].status, Status::Unsatisfiable);
            assert_eq!(report.steps[1].status, Status::Satisfiable);
        }
    }

    #[test]
    fn c_floor_within_domain() {
        for options in both_modes() {
            let report = check(&lift(), options, 2);
            assert_eq!(report.outcome, Outcome::SafeUpTo(2));
        }
    }

    #[test]
    fn c_floor_reaches_top() {
        let source = lift().safety("~floor=2");
        let report = check(&source, Options::default(), 4);
        match report.outcome {
            Outcome::Counterexample(trace) => {
                assert_eq!(trace.step, 2);
                assert_eq!(trace.value_of(1, "floor"), Some("1"));
                assert_eq!(trace.value_of(2, "floor"), Some("2"));
            }
            other => panic!("expected a counterexample, found {other:?}"),
        }
    }

    #[test]
    fn d_init_violates_at_bound_zero() {
        let source = Source::default()
            .boolean("door_open")
            .init("door_open")
            .rule("close", ["door_open"], ["~door_open"])
            .safety("~door_open");
        let spec = Specification::build(&source, Options::default()).unwrap();

        let index = otter_bmc::index::Indexer::build(&spec, 0);
        let encoding = otter_bmc::encoding::Encoding::build(&spec, &index).unwrap();
        assert!(encoding.steps().iter().all(|step| step.transition.is_empty()));

        let report = Driver::new(&spec, 0).run(context, |_| {}).unwrap();
        match report.outcome {
            Outcome::Counterexample(trace) => {
                assert_eq!(trace.step, 0);
                assert_eq!(trace.value_of(0, "door_open"), Some("true"));
            }
            other => panic!("expected a counterexample, found {other:?}"),
        }
    }
}

mod semantics {
    use super::*;

    #[test]
    fn inertia_keeps_unaffected_atoms() {
        let source = Source::default()
            .boolean("lamp")
            .boolean("door_open")
            .init("~lamp & ~door_open")
            .rule("on", ["~lamp"], ["lamp"])
            .safety("~door_open");

        let report = check(&source, Options::default(), 3);
        assert_eq!(report.outcome, Outcome::SafeUpTo(3));

        let without_inertia = Options {
            incremental: true,
            inertia: false,
        };
        let report = check(&source, without_inertia, 3);
        match report.outcome {
            Outcome::Counterexample(trace) => assert_eq!(trace.step, 1),
            other => panic!("expected a counterexample, found {other:?}"),
        }
    }

    #[test]
    fn inertia_grows_with_affecting_rules() {
        let source = Source::default()
            .boolean("lamp")
            .boolean("a")
            .boolean("b")
            .boolean("c")
            .boolean("d")
            .rule("on", ["a", "b"], ["lamp"])
            .rule("off", ["c", "d"], ["~lamp"]);
        let spec = Specification::build(&source, Options::default()).unwrap();
        // 2 · 2² for the lamp, and 2 for each of the four unaffected atoms.
        assert_eq!(spec.inertia().len(), 8 + 4 * 2);

        let source = source
            .boolean("e")
            .boolean("f")
            .rule("again", ["e", "f"], ["lamp"]);
        let spec = Specification::build(&source, Options::default()).unwrap();
        assert_eq!(spec.inertia().len(), 16 + 6 * 2);
    }

    #[test]
    fn no_properties_hold_vacuously() {
        let source = Source::default().boolean("lamp").init("~lamp");
        for options in both_modes() {
            let report = check(&source, options, 2);
            assert_eq!(report.outcome, Outcome::SafeUpTo(2));
        }
    }

    #[test]
    fn empty_preconditions_always_enabled() {
        let source = Source::default()
            .enumerated("light", ["red", "green"])
            .init("light=red")
            .rule("go", Vec::<String>::new(), ["light=green"])
            .safety("light=red");

        let report = check(&source, Options::default(), 3);
        match report.outcome {
            Outcome::Counterexample(trace) => {
                assert_eq!(trace.step, 1);
                assert_eq!(trace.value_of(1, "light"), Some("green"));
            }
            other => panic!("expected a counterexample, found {other:?}"),
        }
    }

    #[test]
    fn stopped_run_is_inconclusive() {
        let spec = Specification::build(&door(), Options::default()).unwrap();
        let stop = Stop::default();
        stop.request();

        let report = Driver::new(&spec, 3)
            .with_stop(stop)
            .run(context, |_| {})
            .unwrap();
        assert_eq!(report.outcome, Outcome::Inconclusive(0));
    }

    #[test]
    fn each_property() {
        let source = lamp().safety("lamp | ~lamp");
        let spec = Specification::build(&source, Options::default()).unwrap();

        let reports = check_each_property(&spec, 3, context, &Stop::default()).unwrap();
        assert_eq!(reports.len(), 2);

        assert_eq!(reports[0].0, "~lamp");
        assert!(matches!(reports[0].1.outcome, Outcome::Counterexample(ref trace) if trace.step == 1));

        assert_eq!(reports[1].0, "lamp | ~lamp");
        assert_eq!(reports[1].1.outcome, Outcome::SafeUpTo(3));
    }
}

mod json {
    use super::*;

    #[test]
    fn lift_document() {
        let source = input::source_from_str(
            r#"{
                "states": {
                    "int": { "floor": [0, 1, 2] },
                    "boolean": { "door_open": [] }
                },
                "init": "floor=0, ~door_open",
                "transitions": {
                    "up_from_0": { "preconditions": ["floor=0"], "effects": { "floor": 1 } },
                    "up_from_1": { "preconditions": ["floor=1"], "effects": ["floor=2"] },
                    "open_at_2": { "preconditions": ["floor=2"], "effects": ["door_open"] }
                },
                "safety": ["door_open -> floor=2", "~door_open"]
            }"#,
        )
        .unwrap();

        let report = check(&source, Options::default(), 5);
        match report.outcome {
            Outcome::Counterexample(trace) => {
                assert_eq!(trace.step, 3);
                assert_eq!(trace.value_of(3, "door_open"), Some("true"));
                assert_eq!(trace.value_of(3, "floor"), Some("2"));
            }
            other => panic!("expected a counterexample, found {other:?}"),
        }
    }

    #[test]
    fn unknown_atom_rejected() {
        let source = input::source_from_str(
            r#"{ "states": { "boolean": { "lamp": [] } }, "safety": ["~lamb"] }"#,
        )
        .unwrap();
        assert!(Specification::build(&source, Options::default()).is_err());
    }
}
