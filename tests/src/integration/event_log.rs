//! # Event Log
//!
//! A real run written to `hash.log` and read back.

#[cfg(test)]
mod tests {
    use super::super::run_text_with_sink;
    use chash_runtime::TimestampedLog;
    use shared_types::hash_key;
    use std::sync::Arc;

    fn run_logged(text: &str) -> Vec<String> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hash.log");
        let log = Arc::new(TimestampedLog::create(&path).unwrap());

        run_text_with_sink(text, log.clone());
        log.flush().unwrap();

        std::fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Split `"<micros>: THREAD <id> <text>"` into its parts.
    fn parse(line: &str) -> (i64, i64, &str) {
        let (stamp, rest) = line.split_once(": THREAD ").unwrap();
        let (id, text) = rest.split_once(' ').unwrap();
        (stamp.parse().unwrap(), id.parse().unwrap(), text)
    }

    #[test]
    fn test_single_insert_trace() {
        let lines = run_logged("insert,John,100,0\n");
        let texts: Vec<(i64, &str)> = lines
            .iter()
            .map(|line| {
                let (_, id, text) = parse(line);
                (id, text)
            })
            .collect();

        let operation = format!("INSERT,{},John,100", hash_key("John"));
        assert_eq!(
            texts,
            vec![
                (0, "WAITING FOR MY TURN"),
                (0, "AWAKENED FOR WORK"),
                (0, operation.as_str()),
                (0, "WRITE LOCK ACQUIRE ATTEMPT"),
                (0, "WRITE LOCK ACQUIRED"),
                (0, "WRITE LOCK RELEASED"),
                (-1, "READ LOCK ACQUIRE ATTEMPT"),
                (-1, "READ LOCK ACQUIRED"),
                (-1, "READ LOCK RELEASED"),
            ]
        );
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let lines = run_logged(
            "insert,A,1,0\n\
             insert,B,2,1\n\
             search,A,2\n\
             delete,B,2\n\
             print,3\n",
        );

        let stamps: Vec<i64> = lines.iter().map(|line| parse(line).0).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_operations_appear_in_execution_order() {
        let lines = run_logged("delete,A,2\nsearch,A,1\ninsert,A,5,0\n");
        let a = hash_key("A");

        let operations: Vec<String> = lines
            .iter()
            .map(|line| parse(line).2)
            .filter(|text| !text.contains("LOCK") && !text.contains("TURN") && !text.contains("AWAKENED"))
            .map(str::to_string)
            .collect();

        assert_eq!(
            operations,
            vec![
                format!("INSERT,{a},A,5"),
                format!("SEARCH,{a},A"),
                format!("DELETE,{a},A"),
            ]
        );
    }
}
