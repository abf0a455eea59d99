use std::collections::HashSet;

use otter_bmc::{
    clauses::ClauseBuilder,
    encoding::Encoding,
    index::{Indexer, VarKey},
    specification::{Options, Source, Specification},
    structures::clause::IntLiteral,
};

fn lift() -> Specification {
    let source = Source::default()
        .boolean("door_open")
        .enumerated("floor", ["0", "1", "2"])
        .init("floor=0 & ~door_open")
        .rule("up", ["floor=0"], ["floor=1"])
        .rule("open", ["floor=1"], ["door_open"])
        .safety("door_open -> floor=1");
    Specification::build(&source, Options::default()).unwrap()
}

fn monolithic_lift() -> Specification {
    let source = Source::default()
        .boolean("door_open")
        .enumerated("floor", ["0", "1", "2"])
        .safety("~door_open");
    let options = Options {
        incremental: false,
        inertia: true,
    };
    Specification::build(&source, options).unwrap()
}

mod indexer {
    use super::*;

    #[test]
    fn uniqueness_and_density() {
        let spec = lift();
        let index = Indexer::build(&spec, 4);

        // One activation, one boolean, and three values, per step.
        assert_eq!(index.nvars(), 5 * 5);

        let mut keys = HashSet::new();
        let mut vars = HashSet::new();
        for (var, key) in index.iter() {
            assert!(keys.insert(*key));
            assert!(vars.insert(var));
            assert_eq!(index.lookup(*key), Ok(var));
            assert_eq!(index.decode(var), Ok(*key));
        }
        assert_eq!(vars, (1..=index.nvars() as u32).collect::<HashSet<_>>());
    }

    #[test]
    fn determinism() {
        let spec = lift();
        let first: Vec<_> = Indexer::build(&spec, 3).iter().map(|(v, k)| (v, *k)).collect();
        let second: Vec<_> = Indexer::build(&spec, 3).iter().map(|(v, k)| (v, *k)).collect();
        assert_eq!(first, second);

        let rebuilt = lift();
        let third: Vec<_> = Indexer::build(&rebuilt, 3).iter().map(|(v, k)| (v, *k)).collect();
        assert_eq!(first, third);
    }

    #[test]
    fn prefix_stable_across_bounds() {
        let spec = lift();
        let short = Indexer::build(&spec, 1);
        let long = Indexer::build(&spec, 3);
        for (var, key) in short.iter() {
            assert_eq!(long.lookup(*key), Ok(var));
        }
    }

    #[test]
    fn unallocated() {
        let spec = lift();
        let index = Indexer::build(&spec, 1);
        assert!(index.activation(2).is_err());
        assert!(index.state(1, None, 0).is_err());
        assert!(index.state(0, Some(0), 0).is_err());
        assert!(index.decode(0).is_err());
        assert!(index.decode(index.nvars() as u32 + 1).is_err());
    }

    #[test]
    fn monolithic_has_no_activation() {
        let spec = monolithic_lift();
        let index = Indexer::build(&spec, 2);
        assert_eq!(index.nvars(), 4 * 3);
        assert!(index.activation_map().is_empty());
        assert!(index
            .iter()
            .all(|(_, key)| !matches!(key, VarKey::Activation { .. })));
    }
}

mod clauses {
    use super::*;

    #[test]
    fn round_trip() {
        let spec = lift();
        let index = Indexer::build(&spec, 3);
        let builder = ClauseBuilder::new(&spec, &index);
        let encoding = Encoding::build(&spec, &index).unwrap();

        for clause in encoding.clauses() {
            for literal in clause {
                let (key, polarity) = builder.decode(*literal).unwrap();
                assert_eq!(polarity, *literal > 0);

                match builder.timed(*literal).unwrap() {
                    Some(timed) => {
                        assert_eq!(builder.literal(&timed.literal, timed.step), Ok(*literal));
                        assert_eq!(key.step(), timed.step);
                    }
                    None => assert!(matches!(key, VarKey::Activation { .. })),
                }
            }
        }
    }

    #[test]
    fn guarded_by_own_step() {
        let spec = lift();
        let index = Indexer::build(&spec, 3);
        let encoding = Encoding::build(&spec, &index).unwrap();

        for step in encoding.steps() {
            let guard = -(index.activation(step.step).unwrap() as IntLiteral);
            for clause in step.init.iter().chain(&step.domain).chain(&step.transition) {
                assert_eq!(clause[0], guard);
            }
            for clause in &step.violation {
                assert_eq!(clause[0], guard);
                match step.step < 3 {
                    true => {
                        let frontier = index.activation(step.step + 1).unwrap() as IntLiteral;
                        assert_eq!(clause.last(), Some(&frontier));
                    }
                    false => assert!(clause[1..].iter().all(|l| index.decode(l.unsigned_abs()).unwrap().step() == 3)),
                }
            }
        }
    }

    #[test]
    fn transitions_span_two_steps() {
        let spec = lift();
        let index = Indexer::build(&spec, 2);
        let encoding = Encoding::build(&spec, &index).unwrap();

        assert!(encoding.steps()[0].transition.is_empty());
        for step in 1..=2 {
            for clause in &encoding.steps()[step].transition {
                for literal in &clause[1..] {
                    let at = index.decode(literal.unsigned_abs()).unwrap().step();
                    assert!(at == step || at + 1 == step);
                }
            }
        }
    }

    #[test]
    fn domain_exactly_one() {
        let spec = monolithic_lift();
        let index = Indexer::build(&spec, 0);
        let builder = ClauseBuilder::new(&spec, &index);

        // door_open = 1, floor=0 = 2, floor=1 = 3, floor=2 = 4
        let mut domain = builder.domain_clauses(0).unwrap();
        domain.sort();
        assert_eq!(
            domain,
            vec![vec![-3, -4], vec![-2, -4], vec![-2, -3], vec![2, 3, 4]]
        );
    }

    #[test]
    fn monolithic_violation_only_at_bound() {
        let spec = monolithic_lift();
        let index = Indexer::build(&spec, 2);
        let encoding = Encoding::build(&spec, &index).unwrap();

        assert!(encoding.steps()[0].violation.is_empty());
        assert!(encoding.steps()[1].violation.is_empty());
        // door_open at step 2 is variable 9
        assert_eq!(encoding.steps()[2].violation, vec![vec![9]]);
        assert!(encoding.activations().is_empty());
    }

    #[test]
    fn names_with_digit_suffixes() {
        let source = Source::default()
            .boolean("zone_1")
            .enumerated("zone", ["1", "2"])
            .init("zone_1 & zone=1")
            .safety("zone_1");
        let options = Options {
            incremental: false,
            inertia: true,
        };
        let spec = Specification::build(&source, options).unwrap();
        let index = Indexer::build(&spec, 0);
        let builder = ClauseBuilder::new(&spec, &index);

        // zone_1 = 1, zone=1 = 2, zone=2 = 3
        assert_eq!(builder.translate_text("zone_1", 0).unwrap(), vec![vec![1]]);
        assert_eq!(builder.translate_text("zone=1", 0).unwrap(), vec![vec![2]]);
        assert_eq!(
            builder.translate_text("~zone_1 | zone=2", 0).unwrap(),
            vec![vec![-1, 3]]
        );
        assert!(builder.translate_text("zone", 0).is_err());
        assert!(builder.translate_text("zone_3", 0).is_err());
    }
}

mod artifacts {
    use super::*;

    #[test]
    fn dimacs_header_counts() {
        let spec = lift();
        let index = Indexer::build(&spec, 2);
        let encoding = Encoding::build(&spec, &index).unwrap();

        let mut dimacs = vec![];
        encoding.write_dimacs(&mut dimacs).unwrap();
        let text = String::from_utf8(dimacs).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("c step t assumes activation map entries 0..=t, and the negation of entry t + 1 when t < 2")
        );
        assert_eq!(
            lines.next(),
            Some(format!("p cnf {} {}", index.nvars(), encoding.clause_count()).as_str())
        );
        let clauses: Vec<_> = lines.collect();
        assert_eq!(clauses.len(), encoding.clause_count());
        assert!(clauses.iter().all(|clause| clause.ends_with(" 0") || *clause == "0"));
    }

    #[test]
    fn monolithic_dimacs_has_no_comment() {
        let spec = monolithic_lift();
        let index = Indexer::build(&spec, 2);
        let encoding = Encoding::build(&spec, &index).unwrap();

        let mut dimacs = vec![];
        encoding.write_dimacs(&mut dimacs).unwrap();
        let text = String::from_utf8(dimacs).unwrap();
        assert!(text.starts_with(&format!("p cnf {} {}\n", index.nvars(), encoding.clause_count())));
    }

    #[test]
    fn activation_map() {
        let spec = lift();
        let index = Indexer::build(&spec, 2);
        let encoding = Encoding::build(&spec, &index).unwrap();

        let mut map = vec![];
        encoding.write_activation_map(&mut map).unwrap();
        assert_eq!(String::from_utf8(map).unwrap(), "1,6,11\n");
    }
}
