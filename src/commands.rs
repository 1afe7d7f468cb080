use crate::cli::{ExportArgs, InputArgs, ShowArgs};
use anyhow::{Context, Result};
use seqcover::coverage::{highlight, Coverage, LogSink};
use seqcover::io::{features, sequence, SequenceRecord};
use seqcover::palette::ColorTable;
use seqcover::{export, render};
use std::fs::File;
use std::io::{self, BufWriter};

const FALLBACK_WIDTH: usize = 80;

/// Load the inputs and run the greedy selection over them.
fn build(input: &InputArgs) -> Result<(SequenceRecord, Coverage)> {
    let record = sequence::from_path(&input.sequence, input.record.as_deref())
        .with_context(|| format!("Error reading sequence '{}'", input.sequence.display()))?;
    let features = features::from_path(&input.features)
        .with_context(|| format!("Error reading features '{}'", input.features.display()))?;
    let colors = match &input.colors {
        Some(path) => File::open(path)
            .map_err(seqcover::Error::from)
            .and_then(ColorTable::from_csv_reader)
            .with_context(|| format!("Error reading color table '{}'", path.display()))?,
        None => input.palette.table(),
    };

    let mut sink = LogSink::default();
    let coverage = highlight(&features, &record.seq, &colors, input.build_options(), &mut sink);
    eprintln!(
        "{}: {} of {} features painted, {} skipped as overlapping, {} skipped as out of bounds",
        record.id,
        coverage.len(),
        features.len(),
        sink.overlaps,
        sink.out_of_bounds
    );
    Ok((record, coverage))
}

pub fn show(args: ShowArgs) -> Result<()> {
    let (record, coverage) = build(&args.input)?;

    let width = args.width.unwrap_or_else(|| {
        crossterm::terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(FALLBACK_WIDTH)
    });
    let mut lines = vec![record.id.clone().into()];
    lines.extend(render::sequence_lines(&record.seq, &coverage, width));
    if !args.no_legend && !coverage.legend.is_empty() {
        lines.push("".into());
        lines.extend(render::legend_lines(&coverage.legend));
    }

    let mut stdout = BufWriter::new(io::stdout().lock());
    render::print_lines(&mut stdout, &lines)?;
    Ok(())
}

pub fn export(args: ExportArgs) -> Result<()> {
    let (record, coverage) = build(&args.input)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Error creating '{}'", path.display()))?;
            export::write_coverage(BufWriter::new(file), &coverage)?;
            eprintln!("Segments written to {}", path.display());
        }
        None => export::write_coverage(io::stdout().lock(), &coverage)?,
    }

    if let Some(path) = &args.covered {
        let file = File::create(path)
            .with_context(|| format!("Error creating '{}'", path.display()))?;
        export::write_covered_fasta(BufWriter::new(file), &record.id, &coverage)?;
        eprintln!("Covered bases written to {}", path.display());
    }
    Ok(())
}
