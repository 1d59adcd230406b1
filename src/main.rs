use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::Parser;
use term_matrix::{Pipeline, PipelineConfig, PipelineOutput, Table};
use tracing_subscriber::EnvFilter;

/// Build a term-document matrix from a directory of text files or a web page.
#[derive(Debug, Parser)]
#[command(name = "term-matrix", version, about)]
struct Args {
    /// Directory whose files (recursively) are the documents
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// URL whose response body is a document
    #[arg(short, long)]
    url: Option<String>,

    /// Directory the CSV files are written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Expand English contractions ("don't" -> "do not")
    #[arg(long)]
    expand_contractions: bool,

    /// Remove English stop words
    #[arg(long)]
    remove_stopwords: bool,

    /// Comma-separated list of extra words to remove
    #[arg(long, value_name = "WORDS")]
    remove_words: Option<String>,

    /// Replace country codes with country names
    #[arg(long)]
    normalize_terms: bool,

    /// Weight the matrix with TF-IDF
    #[arg(long)]
    tfidf: bool,

    /// Drop terms present in fewer than this fraction of documents
    #[arg(long, value_name = "THRESHOLD")]
    sparse: Option<f64>,

    /// Also write L2-normalized document vectors
    #[arg(long)]
    vectors: bool,

    /// Also write a ranked term frequency list
    #[arg(long)]
    chart: bool,

    /// Smallest total count listed by --chart
    #[arg(long, default_value_t = 1)]
    min_count: u64,

    /// Exit after writing output instead of waiting for commands
    #[arg(long)]
    no_repl: bool,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            expand_contractions: self.expand_contractions,
            remove_stopwords: self.remove_stopwords,
            custom_words: self.remove_words.clone(),
            normalize_terms: self.normalize_terms,
            apply_tfidf: self.tfidf,
            sparse_threshold: self.sparse,
            build_vectors: self.vectors,
            build_frequency_chart: self.chart,
            frequency_min_count: self.min_count,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.directory.is_none() && args.url.is_none() {
        bail!("either a directory (-d) or a url (-u) has to be supplied");
    }
    if !args.output.is_dir() {
        bail!("output directory {} does not exist", args.output.display());
    }

    let pipeline = Pipeline::new(args.pipeline_config()).context("invalid options")?;

    tracing::info!("Processing input files...");
    let mut documents = Vec::new();
    if let Some(dir) = &args.directory {
        documents.extend(read_directory(dir)?);
    }
    if let Some(url) = &args.url {
        documents.push(fetch_url(url)?);
    }

    let output = pipeline.run(documents)?;
    write_output(&output, &args.output)?;

    println!("{}", output.summary());
    if !args.no_repl {
        repl(&output)?;
    }
    Ok(())
}

/// Text of every file under `dir`, in sorted path order
fn read_directory(dir: &Path) -> anyhow::Result<Vec<String>> {
    if !dir.is_dir() {
        bail!("input directory {} does not exist", dir.display());
    }
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort();
    tracing::debug!(files = files.len(), dir = %dir.display(), "input files found");

    files
        .iter()
        .map(|path| {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        })
        .collect()
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn fetch_url(url: &str) -> anyhow::Result<String> {
    tracing::debug!(url, "fetching");
    let body = reqwest::blocking::get(url)
        .and_then(|res| res.error_for_status())
        .and_then(|res| res.text())
        .with_context(|| format!("fetching {url}"))?;
    Ok(body)
}

fn write_output(output: &PipelineOutput, dir: &Path) -> anyhow::Result<()> {
    write_table(&output.matrix.to_table(), &dir.join("matrix.csv"))?;
    if let Some(vectors) = &output.vectors {
        write_table(&vectors.to_table(), &dir.join("vectors.csv"))?;
    }
    if let Some(frequencies) = &output.frequencies {
        let path = dir.join("frequencies.csv");
        let mut wtr = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        wtr.write_record(["Term", "Count"])?;
        for (term, count) in frequencies {
            wtr.write_record([term.as_str(), count.to_string().as_str()])?;
        }
        wtr.flush()?;
        tracing::info!(path = %path.display(), "frequencies written");
    }
    Ok(())
}

fn write_table<N: std::fmt::Display>(table: &Table<N>, path: &Path) -> anyhow::Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for record in table.records() {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    tracing::info!(path = %path.display(), "table written");
    Ok(())
}

const HELP: &str = "\
Commands:
  h, help     show this message
  s, summary  number of documents and terms
  t, terms    list the vocabulary
  e, exit     quit (an empty line also quits)";

fn repl(output: &PipelineOutput) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        match line.trim() {
            "" | "e" | "exit" => return Ok(()),
            "h" | "help" => println!("{HELP}"),
            "s" | "summary" => println!("{}", output.summary()),
            "t" | "terms" => {
                for term in output.vocabulary.iter() {
                    println!("{term}");
                }
            }
            _ => println!("Unrecognized input"),
        }
    }
}
