//! Console report printed by rank 0.
//!
//! Every section writes into an [`std::io::Write`], so the binaries hand in stdout and tests
//! hand in a `Vec<u8>`.

use std::io::Write;

use config::{RunParams, Value};
use itertools::{izip, Itertools};

use crate::{Bins, HistResult, Histogram, RunOutcome, SliceAssignment};

pub fn write_params<W: Write>(w: &mut W, params: &RunParams) -> HistResult<()> {
    writeln!(w, "Number of values: {}", params.num_values)?;
    writeln!(w, "Number of classes: {}", params.num_classes)?;
    Ok(())
}

pub fn write_input<W: Write>(w: &mut W, dataset: &[Value], bins: &Bins) -> HistResult<()> {
    writeln!(w, "Input data: ")?;
    writeln!(w, "{}", dataset.iter().join(" "))?;
    writeln!(w, "Class range: ")?;
    for (i, bin) in bins.iter().enumerate() {
        writeln!(w, "Class {} Min: {}, Max: {}", i, bin.lo, bin.hi)?;
    }
    Ok(())
}

pub fn write_scatter_params<W: Write>(w: &mut W, slices: &SliceAssignment) -> HistResult<()> {
    writeln!(w, "Data send count for each proc:")?;
    for (rank, len) in slices.lengths().iter().enumerate() {
        writeln!(w, "proc {}: {}", rank, len)?;
    }
    writeln!(w, "Displacement for each proc:")?;
    for (rank, offset) in slices.offsets().iter().enumerate() {
        writeln!(w, "proc {}: {}", rank, offset)?;
    }
    Ok(())
}

pub fn write_received<W: Write>(w: &mut W, received: &[usize]) -> HistResult<()> {
    for (rank, len) in received.iter().enumerate() {
        writeln!(w, "processor rank: {} len: {}", rank, len)?;
    }
    Ok(())
}

pub fn write_histogram<W: Write>(w: &mut W, histogram: &Histogram) -> HistResult<()> {
    writeln!(w, "Final Histogram:")?;
    for (i, count) in histogram.counts().iter().enumerate() {
        writeln!(w, "Number of values in Class {}: {}", i, count)?;
    }
    writeln!(w, "total values in histogram: {}", histogram.total())?;
    Ok(())
}

/// Values listed under the class they were assigned to, in dataset order.
pub fn write_class_members<W: Write>(
    w: &mut W,
    histogram: &Histogram,
    dataset: &[Value],
    classes: &[u64],
) -> HistResult<()> {
    for (class, count) in histogram.counts().iter().enumerate() {
        let members = izip!(dataset, classes)
            .filter(|(_, &c)| c == class as u64)
            .map(|(v, _)| v)
            .join(" ");
        writeln!(
            w,
            "Number of values in Class {}: {} Values are: {}",
            class, count, members
        )?;
    }
    Ok(())
}

pub fn write_elapsed<W: Write>(w: &mut W, elapsed_secs: f64) -> HistResult<()> {
    writeln!(w, "Elapsed time: {:.6} seconds", elapsed_secs)?;
    Ok(())
}

/// The full report, in the order the run produced it.
pub fn write_report<W: Write>(w: &mut W, outcome: &RunOutcome) -> HistResult<()> {
    write_params(w, &outcome.params)?;
    write_input(w, &outcome.dataset, &outcome.bins)?;
    write_scatter_params(w, &outcome.slices)?;
    write_received(w, &outcome.received)?;
    write_histogram(w, &outcome.histogram)?;
    if let Some(classes) = &outcome.classes {
        write_class_members(w, &outcome.histogram, &outcome.dataset, classes)?;
    }
    write_elapsed(w, outcome.elapsed_secs)?;
    Ok(())
}
