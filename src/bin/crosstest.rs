//! Cross-validation harness.
//!
//! Runs every word of a text corpus as a query against the automaton
//! search and an independent dynamic-programming scan, records the
//! matches to a tab-separated golden file, and verifies later runs
//! against that file byte for byte.

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use levendict::dictionary::Dawg;
use levendict::distance::standard_distance;
use std::collections::{BTreeSet, HashSet};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process;

mod ingest {
    use anyhow::Result;
    use regex::Regex;
    use std::collections::BTreeSet;
    use std::fs::File;
    use std::io::{BufRead, BufReader};
    use std::path::Path;

    const NON_WORD: &str = "[\r\n\t .?!,;:\"'()\\[\\]{}&*#$@_]";

    /// Split a text file into its words.
    pub fn read_dictionary(input: &Path) -> Result<BTreeSet<String>> {
        let non_word = Regex::new(NON_WORD).expect("non-word pattern is valid");
        let mut dictionary = BTreeSet::new();

        let file = File::open(input)?;
        for line in BufReader::new(file).lines() {
            let line = line?;
            for word in non_word.split(&line) {
                if !word.is_empty() {
                    dictionary.insert(word.to_string());
                }
            }
        }

        Ok(dictionary)
    }
}

#[derive(Parser)]
#[command(name = "crosstest")]
#[command(about = "Cross-check automaton search against a reference scan")]
#[command(version)]
struct Cli {
    /// Maximum allowed number of edits
    #[arg(short, long, default_value_t = 1)]
    tolerance: usize,

    /// Golden file: written when absent, verified when present
    #[arg(short, long, default_value = "result.tsv")]
    result: PathBuf,

    /// Keep the tested word in the dictionary instead of rebuilding
    /// without it for every query
    #[arg(short, long)]
    single_dict: bool,

    /// Input text file
    input: PathBuf,
}

/// Run one query in write mode: cross-check against the oracle scan and
/// append the row.
fn check_query<W: Write>(
    query: &str,
    tolerance: usize,
    dictionary: &BTreeSet<String>,
    dawg: &Dawg,
    writer: &mut csv::Writer<W>,
) -> Result<()> {
    let expected: HashSet<String> = dictionary
        .iter()
        .filter(|word| standard_distance(query, word) <= tolerance)
        .cloned()
        .collect();

    let mut row = vec![query.to_string()];
    let mut found = HashSet::new();
    for word in dawg.query(query, tolerance)? {
        row.push(word.clone());
        found.insert(word);
    }

    writer.write_record(&row)?;

    if expected != found {
        bail!("results for {query:?} differ from the reference scan");
    }

    Ok(())
}

/// Run one query in verify mode: the next golden row must reproduce the
/// current output exactly, including order.
fn verify_query<R: Read>(
    query: &str,
    tolerance: usize,
    dawg: &Dawg,
    records: &mut csv::StringRecordsIter<R>,
) -> Result<()> {
    let record = records
        .next()
        .with_context(|| format!("golden file ends before query {query:?}"))??;

    match record.get(0) {
        Some(prev_query) if prev_query == query => {}
        Some(prev_query) => bail!("golden row starts with {prev_query:?}, expected {query:?}"),
        None => bail!("empty golden row at query {query:?}"),
    }

    let mut cell = 1;
    for word in dawg.query(query, tolerance)? {
        match record.get(cell) {
            Some(prev_word) if prev_word == word => {}
            Some(prev_word) => {
                bail!("query {query:?}: golden match {prev_word:?} != {word:?}")
            }
            None => bail!("query {query:?}: golden row is missing {word:?}"),
        }

        cell += 1;
    }

    if record.len() > cell {
        bail!("query {query:?}: golden row has extra matches");
    }

    Ok(())
}

/// Drive every dictionary word through `test` in sorted order, rebuilding
/// the DAWG without the current word unless `single_dict` is set.
fn for_each_query<F>(
    dictionary: &BTreeSet<String>,
    single_dict: bool,
    full_dawg: Dawg,
    mut test: F,
) -> Result<()>
where
    F: FnMut(&str, &BTreeSet<String>, &Dawg) -> Result<()>,
{
    let mut working = dictionary.clone();
    let mut dawg = full_dawg;
    let mut removed: Option<String> = None;

    for query in dictionary {
        log::info!("{query}...");

        if !single_dict {
            working.remove(query);
            if let Some(previous) = removed.take() {
                working.insert(previous);
            }

            dawg = Dawg::from_terms(&working);
            removed = Some(query.clone());
        }

        test(query, &working, &dawg)?;
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let input = std::fs::canonicalize(&cli.input)
        .with_context(|| format!("cannot resolve {}", cli.input.display()))?;
    let input_str = input
        .to_str()
        .with_context(|| format!("non-UTF-8 path {}", input.display()))?
        .to_string();
    let single_flag = u8::from(cli.single_dict).to_string();

    let dictionary = ingest::read_dictionary(&input)
        .with_context(|| format!("cannot read dictionary from {input_str}"))?;
    let dawg = Dawg::from_terms(&dictionary);
    log::info!(
        "{} words, {} nodes, tolerance {}",
        dictionary.len(),
        dawg.node_count(),
        cli.tolerance
    );

    if !cli.result.exists() {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_path(&cli.result)?;

        let tolerance_str = cli.tolerance.to_string();
        writer.write_record([input_str.as_str(), tolerance_str.as_str(), single_flag.as_str()])?;

        let tolerance = cli.tolerance;
        for_each_query(&dictionary, cli.single_dict, dawg, |query, working, dawg| {
            check_query(query, tolerance, working, dawg, &mut writer)
        })?;

        writer.flush()?;
    } else {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_path(&cli.result)?;
        let mut records = reader.records();

        let meta = records.next().context("golden file is empty")??;
        verify_meta(&meta, &input_str, cli.tolerance, &single_flag)?;

        let tolerance = cli.tolerance;
        for_each_query(&dictionary, cli.single_dict, dawg, |query, _working, dawg| {
            verify_query(query, tolerance, dawg, &mut records)
        })?;
    }

    Ok(())
}

fn verify_meta(
    meta: &csv::StringRecord,
    input: &str,
    tolerance: usize,
    single_flag: &str,
) -> Result<()> {
    if meta.len() != 3 {
        bail!("three-column meta row expected");
    }

    if meta.get(0) != Some(input) {
        bail!("golden file was recorded for a different input");
    }

    if meta.get(1) != Some(tolerance.to_string().as_str()) {
        bail!("golden file was recorded at a different tolerance");
    }

    if meta.get(2) != Some(single_flag) {
        bail!("golden file was recorded in a different dictionary mode");
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.tolerance == 0 || cli.tolerance > 15 {
        eprintln!(
            "{}: tolerance must be between 1 and 15",
            "error".red().bold()
        );
        process::exit(1);
    }

    if let Err(err) = run(&cli) {
        eprintln!("{}: {err:#}", "error".red().bold());
        process::exit(1);
    }
}
