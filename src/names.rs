/*! Name frequency expansion.

Turns a `year,gender,name,count` table into one file per (year, gender) partition,
each name being written once per unit of its (summed) count:

```text
year,gender,name,count          1999_F.txt
1999,F,maria,2          ->      Maria
1999,F,de la rosa,1             Maria
                                De-la-rosa
```

Rows are filtered on target years, then summed by *exact* (year, gender, name):
`maria` and `MARIA` are aggregated separately, even though both end up written as `Maria`.
!*/
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::error::Error;

const REQUIRED_COLUMNS: [&str; 4] = ["year", "gender", "name", "count"];

/// A single row of the frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FrequencyRecord {
    pub year: i32,
    pub gender: String,
    pub name: String,
    pub count: u64,
}

impl FrequencyRecord {
    pub fn new(year: i32, gender: &str, name: &str, count: u64) -> Self {
        Self {
            year,
            gender: gender.to_string(),
            name: name.to_string(),
            count,
        }
    }
}

/// Identifies an output partition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey {
    pub year: i32,
    pub gender: String,
}

impl PartitionKey {
    /// `<year>_<gender>.txt`
    pub fn filename(&self) -> String {
        format!("{}_{}.txt", self.year, self.gender)
    }
}

/// Clean a raw name into a name token.
///
/// Steps are applied in order:
/// bell character, apostrophes and newlines are removed,
/// then the first letter is titlecased and the rest lowercased,
/// then spaces are replaced by hyphens.
pub fn clean_name(raw: &str) -> String {
    let stripped = raw.replace('\x07', "").replace('\'', "").replace('\n', "");
    capitalize(&stripped).replace(' ', "-")
}

/// First letter in titlecase, rest lowercased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized = titlecase(first);
            capitalized.extend(chars.flat_map(char::to_lowercase));
            capitalized
        }
        None => String::new(),
    }
}

/// Titlecase mapping of a single char.
///
/// Digraphs (`ǆ` -> `ǅ`) and Greek letters with iota subscript have a dedicated titlecase form.
/// Otherwise the first char of the uppercase mapping is kept and the rest lowercased (`ß` -> `Ss`).
/// Greek letters whose titlecase spans several chars (eg. `ᾲ`) are approximated this way.
fn titlecase(c: char) -> String {
    let single = match c {
        '\u{1c4}'..='\u{1c6}' => Some('\u{1c5}'),
        '\u{1c7}'..='\u{1c9}' => Some('\u{1c8}'),
        '\u{1ca}'..='\u{1cc}' => Some('\u{1cb}'),
        '\u{1f1}'..='\u{1f3}' => Some('\u{1f2}'),
        '\u{1f80}'..='\u{1faf}' => char::from_u32(c as u32 | 0x8),
        '\u{1fb3}' | '\u{1fbc}' => Some('\u{1fbc}'),
        '\u{1fc3}' | '\u{1fcc}' => Some('\u{1fcc}'),
        '\u{1ff3}' | '\u{1ffc}' => Some('\u{1ffc}'),
        _ => None,
    };
    if let Some(t) = single {
        return t.to_string();
    }

    let mut upper = c.to_uppercase();
    match upper.next() {
        Some(head) => std::iter::once(head)
            .chain(upper.flat_map(char::to_lowercase))
            .collect(),
        None => c.to_string(),
    }
}

/// Aggregated counts, by partition then by raw name.
///
/// Both levels are ordered, so that writing partitions is deterministic.
#[derive(Debug, Default)]
pub struct Partitions {
    years: BTreeSet<i32>,
    inner: BTreeMap<PartitionKey, BTreeMap<String, u64>>,
}

impl Partitions {
    /// Only records whose year is in `years` will be kept.
    pub fn new(years: &BTreeSet<i32>) -> Self {
        Self {
            years: years.clone(),
            inner: BTreeMap::new(),
        }
    }

    /// Add a record, summing its count with previous ones of the same (year, gender, name).
    /// Returns `false` if the record has been filtered out.
    pub fn add(&mut self, record: FrequencyRecord) -> bool {
        if !self.years.contains(&record.year) {
            return false;
        }

        let key = PartitionKey {
            year: record.year,
            gender: record.gender,
        };
        *self
            .inner
            .entry(key)
            .or_default()
            .entry(record.name)
            .or_insert(0) += record.count;
        true
    }

    /// Read and aggregate a csv table.
    ///
    /// Fails with [Error::MissingColumn] before reading any row if a required column is absent.
    pub fn from_reader<R: Read>(rdr: R, years: &BTreeSet<i32>) -> Result<Self, Error> {
        let mut rdr = csv::Reader::from_reader(rdr);
        let headers = rdr.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::MissingColumn(column.to_string()));
            }
        }

        let mut partitions = Self::new(years);
        let (mut kept, mut total) = (0usize, 0usize);
        for record in rdr.deserialize() {
            let record: FrequencyRecord = record?;
            total += 1;
            if partitions.add(record) {
                kept += 1;
            }
        }
        debug!("kept {}/{} rows", kept, total);

        Ok(partitions)
    }

    pub fn get(&self, key: &PartitionKey) -> Option<&BTreeMap<String, u64>> {
        self.inner.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PartitionKey> {
        self.inner.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PartitionKey, &BTreeMap<String, u64>)> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Extend<FrequencyRecord> for Partitions {
    fn extend<T: IntoIterator<Item = FrequencyRecord>>(&mut self, iter: T) {
        for record in iter {
            self.add(record);
        }
    }
}

/// Write each cleaned name `count` times, one per line.
///
/// A zero count writes nothing, a name that is empty once cleaned writes blank lines.
fn write_partition<W: Write>(w: &mut W, names: &BTreeMap<String, u64>) -> Result<u64, Error> {
    let mut nb_lines = 0;
    for (name, count) in names {
        let token = clean_name(name);
        for _ in 0..*count {
            writeln!(w, "{}", token)?;
        }
        nb_lines += count;
    }
    Ok(nb_lines)
}

/// Write every partition into `dst`, overwriting existing files.
pub fn write_partitions(partitions: &Partitions, dst: &Path) -> Result<Vec<PathBuf>, Error> {
    std::fs::create_dir_all(dst)?;
    let mut written = Vec::with_capacity(partitions.len());

    for (key, names) in partitions.iter() {
        let path = dst.join(key.filename());
        let mut w = BufWriter::new(File::create(&path)?);
        let nb_lines = write_partition(&mut w, names)?;
        w.flush()?;

        info!("wrote {} names to {:?}", nb_lines, path);
        written.push(path);
    }

    Ok(written)
}

/// Expand the frequency table at `src` into partition files in `dst`.
pub fn expand(src: &Path, dst: &Path, years: &BTreeSet<i32>) -> Result<Vec<PathBuf>, Error> {
    info!("expanding {:?} (years {:?})", src, years);
    let partitions = Partitions::from_reader(File::open(src)?, years)?;
    write_partitions(&partitions, dst)
}
