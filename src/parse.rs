//! Tab-separated experiment definitions.
//!
//! One record per line, four columns, no header:
//!
//! ```text
//! experiment_name<TAB>ordinal<TAB>url<TAB>tag
//! ```
//!
//! Blank lines are skipped and `\r\n` endings are accepted. Fields are taken
//! literally; there is no quoting.
//!
//! Validation is all-or-nothing: a single bad record fails the whole batch,
//! since routing against a partially valid table is unsafe.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;

use tracing::debug;

use crate::{Error, Experiment, Experiments, Result, Variant};

const FIELDS: usize = 4;

/// Parse and validate an experiment definition.
///
/// ```rust
/// let exps = bandit::parse_experiments("exp\t1\t/a\texp:a\nexp\t2\t/b\texp:b\n").unwrap();
/// let exp = &exps["exp"];
/// assert_eq!(exp.arms(), 2);
/// assert_eq!(exp.variant(2).unwrap().tag, "exp:b");
/// ```
pub fn parse_experiments(source: &str) -> Result<Experiments> {
    // name -> (ordinal, url, tag), in file order
    let mut grouped: BTreeMap<String, Vec<(i64, String, String)>> = BTreeMap::new();
    let mut tags: HashSet<&str> = HashSet::new();

    for (i, line) in source.lines().enumerate() {
        let lineno = i + 1;
        if line.is_empty() {
            continue;
        }

        let record: Vec<&str> = line.split('\t').collect();
        if record.len() != FIELDS {
            return Err(Error::malformed(
                lineno,
                format!("record has {} fields, want {FIELDS}", record.len()),
            ));
        }
        let (name, ordinal, url, tag) = (record[0], record[1], record[2], record[3]);

        let ordinal: i64 = ordinal
            .parse()
            .map_err(|e| Error::malformed(lineno, format!("invalid ordinal '{ordinal}': {e}")))?;

        if !is_single_token(name) {
            return Err(Error::malformed(
                lineno,
                format!("experiment has whitespace: '{name}'"),
            ));
        }
        if !is_single_token(tag) {
            return Err(Error::malformed(lineno, format!("tag has whitespace: '{tag}'")));
        }
        if !tag
            .strip_prefix(name)
            .is_some_and(|rest| rest.starts_with(':'))
        {
            return Err(Error::malformed(
                lineno,
                format!("tag '{tag}' must start with '{name}:'"),
            ));
        }
        if !tags.insert(tag) {
            return Err(Error::malformed(lineno, format!("duplicate tag '{tag}'")));
        }

        grouped
            .entry(name.to_string())
            .or_default()
            .push((ordinal, url.to_string(), tag.to_string()));
    }

    let mut experiments = Experiments::new();
    for (name, mut rows) in grouped {
        rows.sort_by_key(|(ordinal, _, _)| *ordinal);

        // Ordinals must be exactly 1..=n.
        let mut variants = Vec::with_capacity(rows.len());
        for (i, (ordinal, url, tag)) in rows.into_iter().enumerate() {
            let expected = i + 1;
            if ordinal != expected as i64 {
                return Err(Error::NonContiguousOrdinals {
                    experiment: name,
                    ordinal,
                });
            }
            variants.push(Variant {
                ordinal: expected,
                url,
                tag,
            });
        }

        debug!(experiment = %name, arms = variants.len(), "parsed experiment");
        experiments.insert(name.clone(), Experiment { name, variants });
    }

    Ok(experiments)
}

/// Read and validate an experiment definition from `reader`.
pub fn read_experiments<R: Read>(mut reader: R) -> Result<Experiments> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    parse_experiments(&source)
}

/// Exactly one whitespace-delimited word, with nothing around it.
fn is_single_token(s: &str) -> bool {
    let mut words = s.split_whitespace();
    words.next().is_some() && words.next().is_none()
}
