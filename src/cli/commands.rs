//! Command implementations for the orthocluster CLI.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::{CorpusTokenizer, FrequencyTable};
use crate::distance::{DistanceBackend, EditDistance, Levenshtein, MatchBlockDiff};
use crate::error::Result;
use crate::phonetic::EncoderConfig;
use crate::pipeline::{ClusteringResult, cluster_with_encoder};
use crate::report::{cluster_listing, edit_histogram};

/// Execute a CLI command.
pub fn execute_command(args: OrthoclusterArgs) -> Result<()> {
    match &args.command {
        Command::Clusters(clusters_args) => {
            output_result("Clusters", &list_clusters(clusters_args)?, &args)
        }
        Command::Edits(pipeline_args) => output_result(
            "Edit histogram",
            &histogram(pipeline_args, &Levenshtein)?,
            &args,
        ),
        Command::Diffs(pipeline_args) => output_result(
            "Diff histogram",
            &histogram(pipeline_args, &MatchBlockDiff)?,
            &args,
        ),
        Command::Encode(encode_args) => {
            output_result("Phonetic codes", &encode_words(encode_args)?, &args)
        }
        Command::Distance(distance_args) => {
            output_result("Distance", &compare_words(distance_args)?, &args)
        }
    }
}

/// Count the word-forms of a corpus file, or of standard input.
pub fn read_corpus(tokenizer: &CorpusTokenizer, input: Option<&Path>) -> Result<FrequencyTable> {
    let frequencies = match input {
        Some(path) => {
            info!("Reading corpus from {}", path.display());
            tokenizer.count_path(path)?
        }
        None => {
            info!("Reading corpus from standard input");
            tokenizer.count_reader(io::stdin().lock())?
        }
    };
    if frequencies.is_empty() {
        warn!("Corpus contains no words");
    }
    Ok(frequencies)
}

/// Read the corpus and cluster its vocabulary.
pub fn cluster_corpus(args: &PipelineArgs) -> Result<(FrequencyTable, ClusteringResult)> {
    let config = args.pipeline_config()?;
    let encoder = args.encoder.build_encoder(&config.encoder)?;
    let tokenizer = CorpusTokenizer::new()?;
    let frequencies = read_corpus(&tokenizer, args.input.as_deref())?;

    let result = cluster_with_encoder(&frequencies, &encoder, config.max_distance, config.parallel)?;
    Ok((frequencies, result))
}

/// Build the cluster listing.
pub fn list_clusters(args: &ClustersArgs) -> Result<ClusterListing> {
    let (frequencies, result) = cluster_corpus(&args.pipeline)?;

    let accepted = match &args.accepted {
        Some(path) => {
            info!("Reading accepted words from {}", path.display());
            CorpusTokenizer::new()?.read_word_set(path)?
        }
        None => BTreeSet::new(),
    };

    Ok(ClusterListing {
        words: frequencies.len(),
        clusters: result.cluster_count(),
        rows: cluster_listing(&result, &frequencies, &accepted, &args.report_config()),
    })
}

/// Build an edit histogram with the given backend.
pub fn histogram<E: EditDistance>(args: &PipelineArgs, backend: &E) -> Result<HistogramReport> {
    let (frequencies, result) = cluster_corpus(args)?;
    info!("Aligning cluster heads with the {} backend", backend.name());

    Ok(HistogramReport {
        backend: backend.name().to_string(),
        histogram: edit_histogram(&result, &frequencies, backend)?,
    })
}

/// Encode the words given on the command line.
pub fn encode_words(args: &EncodeArgs) -> Result<EncodingResult> {
    let encoder = args.encoder.build_encoder(&EncoderConfig::default())?;
    Ok(EncodingResult {
        language: encoder.language().to_string(),
        codes: args
            .words
            .iter()
            .map(|word| EncodedWord {
                word: word.clone(),
                code: encoder.encode(word),
            })
            .collect(),
    })
}

/// Distance and alignment of two words.
pub fn compare_words(args: &DistanceArgs) -> Result<DistanceResult> {
    let backend = DistanceBackend::from(args.backend);
    Ok(DistanceResult {
        backend: backend.name().to_string(),
        distance: backend.distance(&args.from, &args.to),
        path: backend.align(&args.from, &args.to)?,
    })
}
