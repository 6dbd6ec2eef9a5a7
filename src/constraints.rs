//! Synthesis-constraint validation for encoded sequences.
//!
//! Physical synthesis platforms reject sequences with extreme GC content or
//! long single-nucleotide runs. This pass reports violations so callers can
//! re-encode or flag the output; it never alters encoded data, since any
//! substitution would break the byte mapping.

use serde::Serialize;
use std::fmt;

/// Default maximum homopolymer run length.
pub const MAX_HOMOPOLYMER_LENGTH: usize = 3;

/// Default GC-content target.
pub const TARGET_GC_CONTENT: f32 = 0.5;

/// Default tolerance around the GC-content target.
pub const GC_CONTENT_TOLERANCE: f32 = 0.1;

/// Bounds a sequence must satisfy for synthesis.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintPolicy {
    /// GC-content target ratio.
    pub gc_target: f32,
    /// Accepted deviation from the target.
    pub gc_tolerance: f32,
    /// Longest accepted run of a single nucleotide.
    pub max_homopolymer: usize,
}

impl Default for ConstraintPolicy {
    fn default() -> Self {
        Self {
            gc_target: TARGET_GC_CONTENT,
            gc_tolerance: GC_CONTENT_TOLERANCE,
            max_homopolymer: MAX_HOMOPOLYMER_LENGTH,
        }
    }
}

/// A single constraint violation in one sequence.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintViolation {
    /// Position of the sequence in the encoded collection.
    pub sequence: usize,
    /// What was violated.
    pub kind: ViolationKind,
}

/// The specific constraint that failed.
#[derive(Debug, Clone, Serialize)]
pub enum ViolationKind {
    /// GC content outside the accepted band.
    GcContent {
        observed: f32,
        min: f32,
        max: f32,
    },
    /// A single-nucleotide run longer than the limit.
    Homopolymer {
        base: char,
        run: usize,
        position: usize,
        limit: usize,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::GcContent { observed, min, max } => write!(
                f,
                "GC content {:.2} outside accepted range {:.2}..{:.2}",
                observed, min, max
            ),
            ViolationKind::Homopolymer {
                base,
                run,
                position,
                limit,
            } => write!(
                f,
                "homopolymer run of {} '{}' at position {} exceeds limit {}",
                run, base, position, limit
            ),
        }
    }
}

/// Check one sequence against the policy.
pub fn check_sequence(sequence: &str, policy: &ConstraintPolicy) -> Vec<ViolationKind> {
    let mut violations = Vec::new();

    if !sequence.is_empty() {
        let gc = sequence.chars().filter(|&c| c == 'G' || c == 'C').count() as f32
            / sequence.len() as f32;
        let min = policy.gc_target - policy.gc_tolerance;
        let max = policy.gc_target + policy.gc_tolerance;
        if gc < min || gc > max {
            violations.push(ViolationKind::GcContent {
                observed: gc,
                min,
                max,
            });
        }
    }

    let mut run_start = 0;
    let chars: Vec<char> = sequence.chars().collect();
    for i in 1..=chars.len() {
        if i == chars.len() || chars[i] != chars[run_start] {
            let run = i - run_start;
            if run > policy.max_homopolymer {
                violations.push(ViolationKind::Homopolymer {
                    base: chars[run_start],
                    run,
                    position: run_start,
                    limit: policy.max_homopolymer,
                });
            }
            run_start = i;
        }
    }

    violations
}

/// Check a whole encoded collection, tagging violations by sequence position.
pub fn check_sequences(
    sequences: &[String],
    policy: &ConstraintPolicy,
) -> Vec<ConstraintViolation> {
    sequences
        .iter()
        .enumerate()
        .flat_map(|(position, sequence)| {
            check_sequence(sequence, policy)
                .into_iter()
                .map(move |kind| ConstraintViolation {
                    sequence: position,
                    kind,
                })
        })
        .collect()
}
