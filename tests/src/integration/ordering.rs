//! # Ordering Guarantees
//!
//! Many workers, one store: commands execute strictly in
//! `(priority, sequence)` order whatever order their threads start in,
//! every worker finishes, and each worker's events follow its lifecycle.

#[cfg(test)]
mod tests {
    use chash_01_record_store::SortedRecordStore;
    use chash_runtime::{CommandOutcome, Dispatcher, RunReport};
    use rand::seq::SliceRandom;
    use rand::Rng;
    use shared_types::{AccessMode, Actor, ChashEvent, Command, EventSink, MemorySink, NoopSink};
    use std::collections::HashMap;
    use std::sync::Arc;

    // =========================================================================
    // FIXTURES
    // =========================================================================

    /// A random batch: `count` commands over `classes` priorities, sequenced
    /// per class and then shuffled so declaration order says nothing.
    fn random_batch(count: usize, classes: u32) -> Vec<Command> {
        let mut rng = rand::thread_rng();
        let mut next_sequence: HashMap<u32, u32> = HashMap::new();
        let mut commands = Vec::with_capacity(count);

        for i in 0..count {
            let priority = rng.gen_range(0..classes);
            let sequence = next_sequence.entry(priority).or_insert(0);
            let name = format!("emp-{}", i % 17);
            let command = match rng.gen_range(0..5) {
                0 => Command::insert(&name, rng.gen_range(1..10_000), priority, *sequence),
                1 => Command::delete(&name, priority, *sequence),
                2 => Command::update(&name, rng.gen_range(1..10_000), priority, *sequence),
                3 => Command::search(&name, priority, *sequence),
                _ => Command::print(priority, *sequence),
            };
            *sequence += 1;
            commands.push(command);
        }

        commands.shuffle(&mut rng);
        commands
    }

    fn run(commands: &[Command], sink: Arc<dyn EventSink>) -> RunReport {
        let store = Arc::new(SortedRecordStore::with_sink(Arc::clone(&sink)));
        Dispatcher::new(store, sink).run(commands).unwrap()
    }

    // =========================================================================
    // TOTAL ORDER
    // =========================================================================

    #[test]
    fn test_random_batches_execute_in_ticket_order() {
        for _ in 0..10 {
            let commands = random_batch(60, 4);
            let report = run(&commands, Arc::new(NoopSink));

            let mut expected: Vec<_> = commands.iter().map(|c| c.ticket).collect();
            expected.sort();
            assert_eq!(report.execution_order(), expected);

            let ticks: Vec<u64> = report.executed.iter().map(|e| e.tick).collect();
            assert_eq!(ticks, (0..commands.len() as u64).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_results_match_sequential_replay() {
        let commands = random_batch(80, 3);
        let report = run(&commands, Arc::new(NoopSink));

        // Replaying the same commands one at a time in ticket order must
        // give the same outcomes and the same final store.
        let mut ordered = commands.clone();
        ordered.sort_by_key(|c| c.ticket);
        let store = SortedRecordStore::new();
        let replayed: Vec<CommandOutcome> = ordered
            .iter()
            .map(|c| chash_runtime::worker::execute(c, &store, &NoopSink))
            .collect();

        let realized: Vec<CommandOutcome> =
            report.executed.iter().map(|e| e.outcome.clone()).collect();
        assert_eq!(realized, replayed);
        assert_eq!(
            report.final_snapshot,
            chash_01_record_store::RecordStoreApi::snapshot(&store, Actor::Driver)
        );
    }

    // =========================================================================
    // LIVENESS
    // =========================================================================

    #[test]
    fn test_every_worker_finishes() {
        let commands: Vec<Command> = (0..200u32)
            .map(|i| Command::insert(&format!("worker-{i}"), i, i % 5, i / 5))
            .collect();

        let report = run(&commands, Arc::new(NoopSink));

        assert_eq!(report.executed.len(), 200);
        assert_eq!(report.final_snapshot.len(), 200);
        assert!(report.final_snapshot.windows(2).all(|w| w[0].key < w[1].key));
    }

    // =========================================================================
    // EVENT ORDER
    // =========================================================================

    #[test]
    fn test_each_worker_follows_its_lifecycle() {
        let commands = random_batch(40, 3);
        let sink = Arc::new(MemorySink::new());
        run(&commands, sink.clone());

        for command in &commands {
            let events = sink.events_for(Actor::Worker(command.ticket));
            let mode = if command.kind.is_mutation() {
                AccessMode::Write
            } else {
                AccessMode::Read
            };

            assert_eq!(events.len(), 6, "events for {}: {events:?}", command.ticket);
            assert!(matches!(events[0], ChashEvent::Waiting { .. }));
            assert!(matches!(events[1], ChashEvent::Awakened { .. }));
            assert!(matches!(events[2], ChashEvent::Operation { kind, .. } if kind == command.kind));
            assert!(matches!(events[3], ChashEvent::AccessRequested { mode: m, .. } if m == mode));
            assert!(matches!(events[4], ChashEvent::AccessAcquired { mode: m, .. } if m == mode));
            assert!(matches!(events[5], ChashEvent::AccessReleased { mode: m, .. } if m == mode));
        }
    }

    #[test]
    fn test_turns_are_granted_in_ticket_order() {
        let commands = random_batch(50, 5);
        let sink = Arc::new(MemorySink::new());
        run(&commands, sink.clone());

        let awakened: Vec<_> = sink
            .events()
            .into_iter()
            .filter_map(|event| match event {
                ChashEvent::Awakened {
                    actor: Actor::Worker(ticket),
                } => Some(ticket),
                _ => None,
            })
            .collect();

        let mut expected: Vec<_> = commands.iter().map(|c| c.ticket).collect();
        expected.sort();
        assert_eq!(awakened, expected);
    }

    #[test]
    fn test_final_dump_happens_after_all_workers() {
        let commands = random_batch(20, 2);
        let sink = Arc::new(MemorySink::new());
        run(&commands, sink.clone());

        let events = sink.events();
        let first_driver = events
            .iter()
            .position(|e| e.actor() == Actor::Driver)
            .unwrap();
        assert!(events[first_driver..]
            .iter()
            .all(|e| e.actor() == Actor::Driver));
        assert_eq!(events.len() - first_driver, 3);
    }
}
