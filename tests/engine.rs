use otter_bmc::{
    config::EngineConfig,
    engine::{Context, Engine, Session, Status, Stop},
    types::err::EngineError,
};

fn context() -> Context {
    Context::from_config(EngineConfig::default())
}

fn solve(context: &mut Context) -> Status {
    Status::from_code(context.solve(&Stop::default()).unwrap()).unwrap()
}

fn satisfied_by(context: &Context, clauses: &[Vec<i32>]) -> bool {
    clauses.iter().all(|clause| {
        clause
            .iter()
            .any(|literal| context.value_of(*literal) == Some(true))
    })
}

/// Clauses placing `holes + 1` pigeons in `holes` holes, with no two pigeons in the same hole.
fn pigeonhole(holes: i32) -> Vec<Vec<i32>> {
    let var = |pigeon: i32, hole: i32| pigeon * holes + hole + 1;
    let mut clauses = Vec::default();
    for pigeon in 0..=holes {
        clauses.push((0..holes).map(|hole| var(pigeon, hole)).collect());
    }
    for hole in 0..holes {
        for a in 0..=holes {
            for b in (a + 1)..=holes {
                clauses.push(vec![-var(a, hole), -var(b, hole)]);
            }
        }
    }
    clauses
}

mod basic {
    use super::*;

    #[test]
    fn one_literal() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[1]).is_ok());
        assert_eq!(solve(&mut the_context), Status::Satisfiable);
        assert_eq!(the_context.value_of(1), Some(true));
        assert_eq!(the_context.value_of(-1), Some(false));
    }

    #[test]
    fn conflict() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[1, 2]).is_ok());
        assert!(the_context.add_clause(&[-1, -2]).is_ok());
        assert!(the_context.add_clause(&[1, -2]).is_ok());
        assert!(the_context.add_clause(&[-1, 2]).is_ok());
        assert_eq!(solve(&mut the_context), Status::Unsatisfiable);
        assert_eq!(the_context.value_of(1), None);
    }

    #[test]
    fn empty_clause() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[1, 2]).is_ok());
        assert!(the_context.add_clause(&[]).is_ok());
        assert_eq!(solve(&mut the_context), Status::Unsatisfiable);
    }

    #[test]
    fn tautology_and_duplicates() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[1, 2, -1]).is_ok());
        assert!(the_context.add_clause(&[3, 3, 4]).is_ok());
        assert_eq!(the_context.clause_count(), 1);
        assert_eq!(solve(&mut the_context), Status::Satisfiable);
    }

    #[test]
    fn zero_literal() {
        let mut the_context = context();
        assert_eq!(the_context.add_clause(&[1, 0]), Err(EngineError::ZeroLiteral));
        assert_eq!(the_context.assume(0), Err(EngineError::ZeroLiteral));
    }

    #[test]
    fn pigeonhole_unsatisfiable() {
        let mut the_context = context();
        for clause in pigeonhole(4) {
            assert!(the_context.add_clause(&clause).is_ok());
        }
        assert_eq!(solve(&mut the_context), Status::Unsatisfiable);
    }

    #[test]
    fn chain_satisfiable() {
        let mut the_context = context();
        let mut clauses = vec![vec![1]];
        for var in 1..50 {
            clauses.push(vec![-var, var + 1]);
        }
        for clause in &clauses {
            assert!(the_context.add_clause(clause).is_ok());
        }
        assert_eq!(solve(&mut the_context), Status::Satisfiable);
        assert!(satisfied_by(&the_context, &clauses));
        assert_eq!(the_context.value_of(50), Some(true));
    }

    #[test]
    fn random_models_satisfy() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let mut the_context = context();
            let mut clauses = Vec::default();
            for _ in 0..60 {
                let clause: Vec<i32> = (0..3)
                    .map(|_| {
                        let var = rng.gen_range(1..=20);
                        match rng.gen_bool(0.5) {
                            true => var,
                            false => -var,
                        }
                    })
                    .collect();
                assert!(the_context.add_clause(&clause).is_ok());
                clauses.push(clause);
            }

            if solve(&mut the_context) == Status::Satisfiable {
                assert!(satisfied_by(&the_context, &clauses));
            }
        }
    }
}

mod assumptions {
    use super::*;

    #[test]
    fn assumption_respected() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[1, 2]).is_ok());
        assert!(the_context.assume(-1).is_ok());
        assert_eq!(solve(&mut the_context), Status::Satisfiable);
        assert_eq!(the_context.value_of(1), Some(false));
        assert_eq!(the_context.value_of(2), Some(true));
    }

    #[test]
    fn assumptions_cleared_after_solve() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[1]).is_ok());
        assert!(the_context.assume(-1).is_ok());
        assert_eq!(solve(&mut the_context), Status::Unsatisfiable);
        assert_eq!(solve(&mut the_context), Status::Satisfiable);
    }

    #[test]
    fn failed_assumptions() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[-1, 2]).is_ok());
        assert!(the_context.add_clause(&[-2, 3]).is_ok());

        assert!(the_context.assume(4).is_ok());
        assert!(the_context.assume(1).is_ok());
        assert!(the_context.assume(-3).is_ok());
        assert_eq!(solve(&mut the_context), Status::Unsatisfiable);

        assert!(the_context.failed(-3));
        assert!(the_context.failed(1));
        assert!(!the_context.failed(4));
    }

    #[test]
    fn incremental_growth() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[-1, 2]).is_ok());
        assert!(the_context.assume(1).is_ok());
        assert_eq!(solve(&mut the_context), Status::Satisfiable);

        assert!(the_context.add_clause(&[-2, 3]).is_ok());
        assert!(the_context.add_clause(&[-3]).is_ok());
        assert!(the_context.assume(1).is_ok());
        assert_eq!(solve(&mut the_context), Status::Unsatisfiable);

        assert!(the_context.assume(-1).is_ok());
        assert_eq!(solve(&mut the_context), Status::Satisfiable);
        assert_eq!(the_context.value_of(3), Some(false));
    }

    #[test]
    fn guarded_pigeonhole() {
        let mut the_context = context();
        for clause in pigeonhole(3) {
            let mut guarded = vec![-100];
            guarded.extend(clause);
            assert!(the_context.add_clause(&guarded).is_ok());
        }

        assert!(the_context.assume(100).is_ok());
        assert_eq!(solve(&mut the_context), Status::Unsatisfiable);
        assert!(the_context.failed(100));

        assert_eq!(solve(&mut the_context), Status::Satisfiable);
        assert_eq!(the_context.value_of(100), Some(false));
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn stop_gives_unknown() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[1, 2]).is_ok());

        let stop = Stop::default();
        stop.request();
        assert_eq!(the_context.solve(&stop), Ok(Status::Unknown.code()));
        assert_eq!(the_context.value_of(1), None);
    }

    #[test]
    fn stop_during_solve() {
        use std::sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        };

        let mut the_context = context();
        for clause in pigeonhole(11) {
            assert!(the_context.add_clause(&clause).is_ok());
        }

        let flag = Arc::new(AtomicBool::new(false));
        let stop = Stop::from_flag(flag.clone());
        let requester = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(200));
            flag.store(true, Ordering::Relaxed);
        });

        let started = std::time::Instant::now();
        assert_eq!(the_context.solve(&stop), Ok(Status::Unknown.code()));
        assert!(started.elapsed() >= std::time::Duration::from_millis(200));
        requester.join().unwrap();
    }

    #[test]
    fn passed_deadline_gives_unknown() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[1, 2]).is_ok());

        let stop = Stop::with_time_limit(std::time::Duration::from_secs(0));
        assert_eq!(the_context.solve(&stop), Ok(Status::Unknown.code()));
    }

    #[test]
    fn released() {
        let mut the_context = context();
        assert!(the_context.add_clause(&[1, 2]).is_ok());
        the_context.release();
        the_context.release();

        assert_eq!(the_context.add_clause(&[1]), Err(EngineError::Released));
        assert_eq!(the_context.assume(1), Err(EngineError::Released));
        assert_eq!(the_context.solve(&Stop::default()), Err(EngineError::Released));
    }

    #[test]
    fn session() {
        let mut session = Session::acquire(|| Ok(context())).unwrap();
        assert!(session.add_clause(&[1]).is_ok());
        assert_eq!(session.solve(&Stop::default()), Ok(10));
        assert_eq!(session.value_of(1), Some(true));
    }

    #[test]
    fn failed_acquisition() {
        let session: Result<Session<Context>, _> =
            Session::acquire(|| Err(EngineError::Init("no engine".to_string())));
        assert!(matches!(session, Err(EngineError::Init(_))));
    }

    #[test]
    fn status_codes() {
        assert_eq!(Status::from_code(10), Ok(Status::Satisfiable));
        assert_eq!(Status::from_code(20), Ok(Status::Unsatisfiable));
        assert_eq!(Status::from_code(0), Ok(Status::Unknown));
        assert_eq!(Status::from_code(7), Err(EngineError::UnexpectedStatus(7)));
    }
}
