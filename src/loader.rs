//! Bulk loading of key/value files into a [`ConcurrentTrie`].
//!
//! Files hold one `key<separator>value` pair per line. Keys and values are
//! raw bytes; only the separator and the line terminator are interpreted.
//! Blank lines are skipped and a trailing `\r` is stripped.

use std::io::{BufRead, Read};
use std::thread;

use tracing::{debug, info};

use crate::config::loader::LoaderConfig;
use crate::data_structures::ConcurrentTrie;
use crate::error::load::LoadError;

/// A key and its value.
pub type Pair = (Vec<u8>, Vec<u8>);

/// Reads every pair from `reader`.
///
/// # Errors
///
/// Fails on the first line without a separator, the first line longer than
/// `config.max_line_bytes`, or a read error.
pub fn parse_pairs<R: BufRead>(
    mut reader: R,
    config: &LoaderConfig,
) -> Result<Vec<Pair>, LoadError> {
    let mut separator = [0u8; 4];
    let separator_bytes = config.separator.encode_utf8(&mut separator).as_bytes();

    // Room for the longest allowed line plus `\r\n`.
    let read_limit = config.max_line_bytes as u64 + 2;

    let mut pairs = Vec::new();
    let mut line = Vec::new();
    let mut line_number = 0;
    loop {
        line.clear();
        if reader.by_ref().take(read_limit).read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_number += 1;

        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.is_empty() {
            continue;
        }
        if line.len() > config.max_line_bytes {
            return Err(LoadError::LineTooLong {
                line: line_number,
                len: line.len(),
                max: config.max_line_bytes,
            });
        }

        let split_at = find_subslice(&line, separator_bytes).ok_or(LoadError::MissingSeparator {
            line: line_number,
            separator: config.separator,
        })?;
        let value = line[split_at + separator_bytes.len()..].to_vec();
        pairs.push((line[..split_at].to_vec(), value));
    }

    debug!(pairs = pairs.len(), "Parsed key/value input");
    Ok(pairs)
}

/// Inserts `pairs` into `trie` from `threads` concurrent writers.
///
/// Pairs are split into contiguous chunks, one per writer. When a key occurs
/// more than once the surviving value depends on scheduling.
///
/// # Returns
///
/// The number of keys that were not in the trie before.
pub fn load_parallel(trie: &ConcurrentTrie, pairs: &[Pair], threads: usize) -> usize {
    if pairs.is_empty() {
        return 0;
    }

    let threads = threads.clamp(1, pairs.len());
    let chunk_size = (pairs.len() + threads - 1) / threads;

    let added: usize = thread::scope(|scope| {
        let handles: Vec<_> = pairs
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .filter(|pair| trie.insert(&pair.0, pair.1.as_slice()))
                        .count()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .sum()
    });

    info!(threads, pairs = pairs.len(), added, "Bulk load finished");
    added
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor};

    fn config() -> LoaderConfig {
        LoaderConfig {
            writer_threads: 4,
            separator: '\t',
            max_line_bytes: 64,
        }
    }

    #[test]
    fn test_parse_pairs_skips_blank_lines_and_strips_cr() {
        let input = "bad\t1\r\n\nbadly\t2\nempty\t\n";
        let pairs = parse_pairs(Cursor::new(input), &config()).unwrap();
        assert_eq!(
            pairs,
            vec![
                (b"bad".to_vec(), b"1".to_vec()),
                (b"badly".to_vec(), b"2".to_vec()),
                (b"empty".to_vec(), Vec::new()),
            ]
        );
    }

    #[test]
    fn test_parse_pairs_splits_on_first_separator() {
        let pairs = parse_pairs(Cursor::new("k\tv\tw"), &config()).unwrap();
        assert_eq!(pairs, vec![(b"k".to_vec(), b"v\tw".to_vec())]);
    }

    #[test]
    fn test_parse_pairs_multibyte_separator() {
        let config = LoaderConfig {
            separator: '→',
            ..config()
        };
        let pairs = parse_pairs(Cursor::new("zip→0012"), &config).unwrap();
        assert_eq!(pairs, vec![(b"zip".to_vec(), b"0012".to_vec())]);
    }

    #[test]
    fn test_parse_pairs_reports_missing_separator() {
        let err = parse_pairs(Cursor::new("a\t1\nnope\n"), &config()).unwrap_err();
        assert!(matches!(err, LoadError::MissingSeparator { line: 2, .. }));
    }

    #[test]
    fn test_parse_pairs_reports_long_line() {
        let line = format!("k\t{}", "v".repeat(100));
        let err = parse_pairs(Cursor::new(line), &config()).unwrap_err();
        assert!(matches!(err, LoadError::LineTooLong { line: 1, max: 64, .. }));
    }

    #[test]
    fn test_parse_pairs_stops_reading_unbounded_line() {
        let endless = BufReader::new(io::repeat(b'x'));
        let err = parse_pairs(endless, &config()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::LineTooLong { line: 1, len: 66, max: 64 }
        ));
    }

    #[test]
    fn test_parse_pairs_accepts_line_at_limit() {
        let line = format!("k\t{}\r\nnext\t1", "v".repeat(62));
        let pairs = parse_pairs(Cursor::new(line), &config()).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].1.len(), 62);
        assert_eq!(pairs[1], (b"next".to_vec(), b"1".to_vec()));
    }

    #[test]
    fn test_load_parallel_counts_new_keys() {
        let trie = ConcurrentTrie::new();
        trie.insert("k0", "old");

        let pairs: Vec<Pair> = (0..100)
            .map(|i| (format!("k{i}").into_bytes(), format!("v{i}").into_bytes()))
            .collect();

        assert_eq!(load_parallel(&trie, &pairs, 8), 99);
        assert_eq!(trie.size(), 101);
        assert_eq!(trie.get("k0"), Some(b"v0".to_vec()));
        assert_eq!(load_parallel(&trie, &[], 8), 0);
    }
}
