//! Random play never breaks the session invariants.

use async_trait::async_trait;
use proptest::prelude::*;
use strictly_pairs::invariants::check_session;
use strictly_pairs::{
    CardContent, ContentError, ContentSource, GameSession, ManualScheduler, SelectOutcome,
    SessionConfig, Theme,
};

struct Catalog;

#[async_trait]
impl ContentSource for Catalog {
    async fn fetch_content(&self, count: usize, _theme: Theme) -> Result<Vec<CardContent>, ContentError> {
        Ok((0..count)
            .map(|i| CardContent::new(format!("c{i}"), format!("Card {i}"), "img"))
            .collect())
    }
}

#[derive(Debug, Clone)]
enum Step {
    Select(usize),
    Resolve,
    Restart(u32),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (0usize..44).prop_map(Step::Select),
        3 => Just(Step::Resolve),
        1 => (0u32..6).prop_map(Step::Restart),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime builds")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariants_hold_after_every_step(seed in any::<u64>(), level in 1u32..14, steps in proptest::collection::vec(step(), 0..200)) {
        let rt = runtime();
        let scheduler = ManualScheduler::new();
        let config = SessionConfig::default().with_seed(seed).with_level(level);
        let mut session = rt
            .block_on(GameSession::start(config, Catalog, scheduler.clone()))
            .expect("catalog always supplies");
        prop_assert!(check_session(session.state()).is_ok());

        // Tickets from superseded boards are kept around and replayed later.
        let mut stale = Vec::new();

        for step in steps {
            let before = session.state().clone();
            let terminal = before.is_won() || before.is_lost();

            match step {
                Step::Select(index) => {
                    let outcome = session.select_index(index);
                    if terminal {
                        prop_assert!(matches!(outcome, SelectOutcome::Ignored(_)));
                        prop_assert_eq!(session.state(), &before);
                    }
                }
                Step::Resolve => {
                    if let Some(ticket) = scheduler.pop() {
                        prop_assert!(session.resolve_selection(ticket).is_ok());
                    } else if let Some(ticket) = stale.pop() {
                        prop_assert!(session.resolve_selection(ticket).is_err());
                        prop_assert_eq!(session.state(), &before);
                    }
                }
                Step::Restart(level) => {
                    stale.extend(scheduler.drain().into_iter().map(|s| s.ticket));
                    rt.block_on(session.restart(level)).expect("catalog always supplies");
                }
            }

            let state = session.state();
            prop_assert!(check_session(state).is_ok(), "{:?}", check_session(state));
            prop_assert!(state.selected().len() <= 2);
            prop_assert!(state.matches() <= state.pairs_needed());
            prop_assert!(!(state.is_won() && state.is_lost()));
        }
    }
}
