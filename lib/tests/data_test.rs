#[macro_use]
extern crate assert_matches;

use rs_wordle_filter::*;

use std::io;
use std::io::BufRead;
use std::io::Cursor;
use std::io::Read;
use std::result::Result;
use std::sync::Arc;

macro_rules! assert_arc_eq {
    ($arc_vec:expr, $non_arc_vec:expr) => {
        assert_eq!(
            $arc_vec as &[Arc<str>],
            $non_arc_vec
                .iter()
                .map(|thing| Arc::from(*thing))
                .collect::<Vec<Arc<str>>>()
        );
    };
}

/// A reader that fails after its first line.
struct BrokenReader {
    first_line_read: bool,
}

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
    }
}

impl BufRead for BrokenReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.first_line_read {
            return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        }
        Ok(&b"worda\n"[..])
    }

    fn consume(&mut self, _amt: usize) {
        self.first_line_read = true;
    }
}

#[test]
fn word_bank_from_reader_succeeds() -> Result<(), WordleError> {
    let mut cursor = Cursor::new(String::from("\n\nworda\n wordb\n"));

    let word_bank = WordBank::from_reader(&mut cursor, 5)?;

    assert_eq!(word_bank.len(), 2);
    assert_arc_eq!(&word_bank, &["worda", "wordb"]);
    Ok(())
}

#[test]
fn word_bank_from_reader_skips_other_lengths() -> Result<(), WordleError> {
    let mut cursor = Cursor::new(String::from("crane\ncranes\nSLATE\ncat\r\nplane\r\n"));

    let word_bank = WordBank::from_reader(&mut cursor, 5)?;

    assert_eq!(word_bank.word_length(), 5);
    assert_arc_eq!(&word_bank, &["crane", "slate", "plane"]);
    Ok(())
}

#[test]
fn word_bank_from_reader_propagates_io_error() {
    let reader = BrokenReader {
        first_line_read: false,
    };

    assert_matches!(
        WordBank::from_reader(reader, 5),
        Err(WordleError::IoError(_))
    );
}

#[test]
fn word_bank_from_iterator_other_length() {
    let word_bank = WordBank::from_iterator(vec!["at", "on", "cat", "dog", "abcd"], 3);

    assert_eq!(word_bank.word_length(), 3);
    assert_arc_eq!(&word_bank, &["cat", "dog"]);
}

#[test]
fn word_bank_from_iterator_empty() {
    let word_bank = WordBank::from_iterator(Vec::<String>::new(), 5);

    assert!(word_bank.is_empty());
    assert_eq!(word_bank.len(), 0);
}

#[test]
fn word_bank_contains_is_exact() {
    let word_bank = WordBank::from_iterator(["Crane", "slate"], 5);

    assert!(word_bank.contains("crane"));
    assert!(word_bank.contains("slate"));
    assert!(!word_bank.contains("CRANE"));
    assert!(!word_bank.contains("plane"));
}

/// A writer that refuses every write.
struct FullDisk;

impl io::Write for FullDisk {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "no space left"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn word_bank_write_to_can_be_reloaded() -> Result<(), WordleError> {
    let mut cursor = Cursor::new(String::from("crane\nbanana\nSLATE\n\nplane\ncrane\n"));
    let word_bank = WordBank::from_reader(&mut cursor, 5)?;
    let mut saved: Vec<u8> = Vec::new();

    word_bank.write_to(&mut saved)?;
    let reloaded = WordBank::from_reader(Cursor::new(saved), 5)?;

    assert_arc_eq!(&reloaded, &["crane", "slate", "plane"]);
    Ok(())
}

#[test]
fn word_bank_write_to_propagates_io_error() {
    let word_bank = WordBank::from_iterator(["crane"], 5);

    assert_matches!(
        word_bank.write_to(FullDisk),
        Err(WordleError::IoError(_))
    );
}
