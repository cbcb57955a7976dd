//! # End-to-End Scenarios
//!
//! Command text in, results out: parsing, sequencing, dispatch and the
//! final dump exercised together.

#[cfg(test)]
mod tests {
    use super::super::run_text;
    use chash_runtime::report::write_report;
    use chash_runtime::{CommandOutcome, OutputFormat};
    use shared_types::{hash_key, CommandKind, Record, TurnTicket};

    // =========================================================================
    // STORE SEMANTICS
    // =========================================================================

    #[test]
    fn test_round_trip() {
        let report = run_text(
            "threads,4,0\n\
             insert,A,100,0\n\
             insert,B,200,0\n\
             search,A,0\n\
             delete,B,1\n",
        );

        assert_eq!(report.executed.len(), 4);
        assert_eq!(
            report.executed[2].outcome,
            CommandOutcome::Found {
                record: Record::new(hash_key("A"), "A", 100)
            }
        );
        assert_eq!(
            report.executed[3].outcome,
            CommandOutcome::Deleted {
                name: "B".into(),
                record: Record::new(hash_key("B"), "B", 200)
            }
        );
        assert_eq!(
            report.final_snapshot,
            vec![Record::new(hash_key("A"), "A", 100)]
        );
    }

    #[test]
    fn test_duplicate_insert_keeps_first_salary() {
        let report = run_text("insert,A,100,0\ninsert,A,300,1\n");

        assert_eq!(
            report.executed[1].outcome,
            CommandOutcome::DuplicateInsert {
                key: hash_key("A"),
                name: "A".into()
            }
        );
        assert_eq!(report.final_snapshot[0].salary, 100);
    }

    #[test]
    fn test_update_changes_salary_only() {
        let report = run_text("insert,Richard Stallman,1000,0\nupdate,Richard Stallman,2500,1\n");

        match &report.executed[1].outcome {
            CommandOutcome::Updated { change, .. } => {
                assert_eq!(change.old_salary(), 1000);
                assert_eq!(change.new_salary(), 2500);
                assert_eq!(change.before.key, change.after.key);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(
            report.final_snapshot,
            vec![Record::new(2626138685, "Richard Stallman", 2500)]
        );
    }

    #[test]
    fn test_failures_do_not_stall_the_run() {
        let report = run_text(
            "delete,Ghost,0\n\
             update,Ghost,5,0\n\
             search,Ghost,1\n\
             insert,Real,1,2\n",
        );

        assert_eq!(report.executed.len(), 4);
        assert!(report.executed[..3].iter().all(|e| !e.outcome.is_success()));
        assert!(report.executed[3].outcome.is_success());
        assert_eq!(report.final_snapshot.len(), 1);
    }

    #[test]
    fn test_final_snapshot_is_key_ordered() {
        let report = run_text(
            "insert,Linus Torvalds,10,0\n\
             insert,John,20,0\n\
             insert,Richard Stallman,30,0\n\
             insert,A,40,0\n",
        );

        let keys: Vec<u32> = report.final_snapshot.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![2181104624, 2195727866, 2626138685, 4149286086]);
    }

    // =========================================================================
    // PRIORITY CLASSES
    // =========================================================================

    #[test]
    fn test_empty_priority_classes_are_skipped() {
        let report = run_text("insert,Late,1,7\ninsert,Early,1,0\nprint,7\n");

        assert_eq!(
            report.execution_order(),
            vec![
                TurnTicket::new(0, 0),
                TurnTicket::new(7, 0),
                TurnTicket::new(7, 1),
            ]
        );
        match &report.executed[2].outcome {
            CommandOutcome::Printed { records } => assert_eq!(records.len(), 2),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_lower_priority_sees_earlier_effects() {
        let report = run_text("search,X,1\ninsert,X,9,0\n");

        assert_eq!(report.executed[0].kind, CommandKind::Insert);
        assert!(matches!(
            report.executed[1].outcome,
            CommandOutcome::Found { ref record } if record.salary == 9
        ));
    }

    // =========================================================================
    // INPUT HANDLING
    // =========================================================================

    #[test]
    fn test_malformed_lines_are_discarded() {
        let report = run_text(
            "threads,3,0\n\
             insert,A,abc,0\n\
             frobnicate,A,0\n\
             \n\
             insert,A,100,0\n\
             search,A\n",
        );

        assert_eq!(report.executed.len(), 1);
        assert_eq!(report.final_snapshot.len(), 1);
    }

    #[test]
    fn test_long_names_are_truncated() {
        let long = "N".repeat(80);
        let report = run_text(&format!("insert,{long},5,0\n"));

        let stored = &report.final_snapshot[0];
        assert_eq!(stored.name.len(), 49);
        assert_eq!(stored.key, hash_key(&"N".repeat(49)));
    }

    // =========================================================================
    // REPORT
    // =========================================================================

    #[test]
    fn test_text_report() {
        let report = run_text("insert,A,100,0\nsearch,B,0\nprint,1\n");

        let mut out = Vec::new();
        write_report(&mut out, &report, OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();

        let a = hash_key("A");
        let expected = format!(
            "Inserted {a},A,100\n\
             B not found.\n\
             Current Database:\n\
             {a},A,100\n\
             Current Database:\n\
             {a},A,100\n"
        );
        assert_eq!(text, expected);
    }
}
