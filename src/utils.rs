use crate::commands::KeggArgs;
use anyhow::{bail, Context, Result};
use keggkit::{parse::Diagnostic, KeggClient};
use log::info;
use std::{
    fs::File,
    io::{self, stdout, BufRead, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    time::Duration,
};

const BUFFER_CAPACITY: usize = 64 * 1024;

/// Open an input file, or stdin when no path is given. Compressed input is
/// decompressed transparently.
pub fn input_to_reader(input: &Option<PathBuf>) -> Result<Box<dyn BufRead>> {
    let raw: Box<dyn Read> = match input {
        Some(path) => {
            if path.is_dir() {
                bail!(
                    "Input {} is a directory. Did you mean to include a file in the directory?",
                    path.display()
                );
            }
            Box::new(File::open(path).with_context(|| format!("{}", path.display()))?)
        }
        None => {
            if atty::is(atty::Stream::Stdin) {
                bail!("No stdin detected. Did you mean to include a file argument?");
            }
            Box::new(io::stdin())
        }
    };
    let (reader, _format) = niffler::get_reader(raw)?;
    Ok(Box::new(BufReader::with_capacity(BUFFER_CAPACITY, reader)))
}

pub fn path_to_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    input_to_reader(&Some(path.to_path_buf()))
}

pub fn output_to_writer(output: &Option<PathBuf>) -> Result<BufWriter<Box<dyn Write>>> {
    let inner: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Unable to create output file {}", path.display()))?,
        ),
        None => Box::new(stdout()),
    };
    Ok(BufWriter::with_capacity(BUFFER_CAPACITY, inner))
}

/// Read the whole input as text.
pub fn read_to_string(input: &Option<PathBuf>) -> Result<String> {
    let mut text = String::new();
    input_to_reader(input)?.read_to_string(&mut text)?;
    Ok(text)
}

/// Read one identifier per line, skipping blank lines and `#` comments.
pub fn read_ids(input: &Option<PathBuf>) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for line in input_to_reader(input)?.lines() {
        let line = line?;
        let id = line.trim();
        if id.is_empty() || id.starts_with('#') {
            continue;
        }
        ids.push(id.to_string());
    }
    Ok(ids)
}

pub fn kegg_client(args: &KeggArgs) -> Result<KeggClient> {
    Ok(KeggClient::builder()
        .base_url(args.base_url.as_str())
        .timeout(Duration::from_secs(args.timeout))
        .delay(Duration::from_millis(args.delay_ms))
        .build()?)
}

/// Write the diagnostics gathered during a run to the log file, if one was requested.
pub fn write_log(log: &Option<PathBuf>, diagnostics: &[Diagnostic]) -> Result<()> {
    if !diagnostics.is_empty() {
        info!("{} problem(s) found during the run", diagnostics.len());
    }
    if let Some(path) = log {
        let mut writer = output_to_writer(&Some(path.clone()))?;
        for diagnostic in diagnostics {
            writeln!(writer, "{}", diagnostic)?;
        }
        writer.flush()?;
    }
    Ok(())
}
