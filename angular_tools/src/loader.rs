//! Reads the `word x y` vector file format referenced by `SPEC_FULL.md`
//! §6: one whitespace-separated `word x y` record per line, `x`/`y`
//! decimal doubles, trailing newline tolerated.

use angular_geo::Vec2;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Parses every well-formed `word x y` line in `path`. Blank lines and a
/// trailing newline are tolerated; a line that isn't exactly three
/// whitespace-separated fields, or whose `x`/`y` don't parse as `f64`, is
/// skipped with a `log::warn!` rather than aborting the whole load — this
/// is a stricter, not a looser, contract than the C++ source, whose
/// `while (handle.good())` loop can silently emit one spurious all-zero
/// trailing record past end-of-file.
pub fn read_vectors<P: AsRef<Path>>(path: P) -> io::Result<(Vec<String>, Vec<Vec2>)> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut words = Vec::new();
    let mut vectors = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (word, x, y) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(word), Some(x), Some(y), None) => (word, x, y),
            _ => {
                log::warn!("skipping malformed record at line {}: {:?}", lineno + 1, line);
                continue;
            }
        };
        let (x, y) = match (x.parse::<f64>(), y.parse::<f64>()) {
            (Ok(x), Ok(y)) => (x, y),
            _ => {
                log::warn!("skipping unparseable coordinates at line {}: {:?}", lineno + 1, line);
                continue;
            }
        };
        words.push(word.to_string());
        vectors.push(Vec2::new(x, y));
    }

    Ok((words, vectors))
}
