use anyhow::Result;
use log::{debug, warn};
use std::io::BufRead;

use crate::model::{LogRecord, Trace};

macro_rules! regex {
    ($pattern:expr) => {{
        use regex::Regex;
        use std::sync::OnceLock;

        static REGEX: OnceLock<Regex> = OnceLock::new();
        REGEX.get_or_init(|| Regex::new($pattern).unwrap())
    }};
}

/// Extract a record from one log line, or `None` if the line does not carry one.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let caps =
        regex!(r"Seq=([0-9]+), Send_ts=([0-9]+(?:\.[0-9]+)?), Latency=([0-9]+(?:\.[0-9]+)?) ms")
            .captures(line)?;

    let sequence = match caps[1].parse::<u64>() {
        Ok(v) => v,
        Err(e) => {
            warn!("sequence number {} out of range: {}", &caps[1], e);
            return None;
        }
    };
    // ASCII-only decimals, always valid f64 syntax.
    let send_timestamp = caps[2].parse::<f64>().ok()?;
    let latency_ms = caps[3].parse::<f64>().ok()?;

    Some(LogRecord {
        sequence,
        send_timestamp,
        latency_ms,
    })
}

/// Build a trace from every matching line. Lines that are not valid UTF-8
/// are decoded lossily and usually just fail to match; only read errors abort.
pub fn parse_trace<R: BufRead>(mut reader: R) -> Result<Trace> {
    let mut trace = Trace::default();
    let mut skipped = 0usize;
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        match parse_line(&line) {
            Some(record) => trace.push(record),
            None => {
                skipped += 1;
                debug!("skip line {}: no packet record", line_no);
            }
        }
    }

    debug!("{} records parsed, {} lines skipped", trace.len(), skipped);
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let line = "[DEBUG] recv Seq=5, Send_ts=12.250, Latency=3.400 ms from 10.0.0.2";
        let record = parse_line(line).unwrap();
        assert_eq!(record.sequence, 5);
        assert_eq!(record.send_timestamp, 12.25);
        assert_eq!(record.latency_ms, 3.4);
    }

    #[test]
    fn test_parse_line_integer_fields() {
        let record = parse_line("Seq=0, Send_ts=1745160695, Latency=2 ms").unwrap();
        assert_eq!(record.sequence, 0);
        assert_eq!(record.send_timestamp, 1745160695.0);
        assert_eq!(record.latency_ms, 2.0);
    }

    #[test]
    fn test_parse_line_rejects_partial() {
        assert_eq!(parse_line("Seq=5, Send_ts=12.250"), None);
        assert_eq!(parse_line("Seq=5, Send_ts=12.250, Latency=3.400"), None);
        assert_eq!(parse_line("server listening on 0.0.0.0:9000"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn test_parse_line_sequence_overflow() {
        assert_eq!(
            parse_line("Seq=99999999999999999999999, Send_ts=1.0, Latency=1.0 ms"),
            None
        );
    }

    #[test]
    fn test_parse_trace_keeps_order_and_duplicates() {
        let log = "\
starting server
Seq=2, Send_ts=10.5, Latency=1.0 ms
Seq=0, Send_ts=10.1, Latency=2.0 ms
garbage Seq=x
Seq=2, Send_ts=10.6, Latency=3.0 ms
";
        let trace = parse_trace(log.as_bytes()).unwrap();
        assert_eq!(trace.sequences(), &[2, 0, 2]);
        assert_eq!(trace.send_timestamps(), &[10.5, 10.1, 10.6]);
        assert_eq!(trace.latencies(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_trace_skips_binary_lines() {
        let log: &[u8] = b"Seq=0, Send_ts=1.0, Latency=1.0 ms\npayload dump \xff\xfe\nSeq=1, Send_ts=2.0, Latency=1.0 ms\n";
        let trace = parse_trace(log).unwrap();
        assert_eq!(trace.sequences(), &[0, 1]);
        assert_eq!(trace.send_timestamps(), &[1.0, 2.0]);
    }

    #[test]
    fn test_parse_trace_last_line_without_newline() {
        let trace = parse_trace("noise\nSeq=9, Send_ts=3.5, Latency=0.5 ms".as_bytes()).unwrap();
        assert_eq!(trace.sequences(), &[9]);
    }

    #[test]
    fn test_parse_line_rejects_non_ascii_digits() {
        assert_eq!(parse_line("Seq=\u{663}, Send_ts=1.0, Latency=1.0 ms"), None);
        assert_eq!(parse_line("Seq=1, Send_ts=\u{661}.0, Latency=1.0 ms"), None);
    }

    #[test]
    fn test_parse_trace_no_matches() {
        let trace = parse_trace("nothing here\nstill nothing\n".as_bytes()).unwrap();
        assert!(trace.is_empty());
    }
}
