//! External matching-engine boundary.
//!
//! The correspondence computation itself (SIFT extraction, descriptor
//! matching, geometric filtering) is not implemented here: tilematch's job
//! ends at having identified the candidate pairs. This module defines the
//! interface an engine plugs into, the tuning-configuration bundle handed
//! through to it, and a driver that feeds it one call per emitted pair.
//!
//! Engine failures are strictly per-pair: a failed pair is recorded and
//! every other pair still runs, since the selection that produced them is
//! already correct.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::TilematchError;
use crate::select::CandidatePair;
use crate::tiles::TileSpec;

/// An engine-level failure for a single pair.
///
/// Opaque by design: the caller surfaces the message but never interprets
/// it.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("matching engine failed: {message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Tuning configuration handed through to the engine.
///
/// `threads` is the engine's degree-of-parallelism option; everything else
/// passes through opaquely as algorithm parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    #[serde(default, flatten)]
    pub params: BTreeMap<String, Value>,
}

impl EngineConfig {
    /// Reads one step's section from a pipeline configuration file.
    ///
    /// The file is a JSON object keyed by step name, each value being that
    /// step's parameter object. A missing section yields the defaults, so a
    /// single shared config file can cover only the steps it cares about.
    pub fn from_section_file(path: &Path, section: &str) -> Result<Self, TilematchError> {
        let file = File::open(path).map_err(TilematchError::Io)?;
        let reader = BufReader::new(file);

        let sections: BTreeMap<String, EngineConfig> = serde_json::from_reader(reader)
            .map_err(|source| TilematchError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(sections.get(section).cloned().unwrap_or_default())
    }
}

/// A single correspondence between two tiles' local coordinates.
///
/// Produced by the engine; uninterpreted here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    pub p1: [f64; 2],
    pub p2: [f64; 2],
}

/// The engine's result for one candidate pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Identity URL of the first tile.
    pub url1: String,
    /// Identity URL of the second tile.
    pub url2: String,
    /// Correspondences found between the two feature sets.
    #[serde(default)]
    pub correspondences: Vec<Correspondence>,
}

/// The external correspondence engine, consumed as a black box.
pub trait MatchEngine {
    /// Computes correspondences between two tiles' feature sets.
    fn match_pair(
        &self,
        left: &TileSpec,
        right: &TileSpec,
        config: &EngineConfig,
    ) -> Result<MatchOutcome, EngineError>;
}

/// Accumulated results of driving an engine over a pair set.
#[derive(Clone, Debug, Default)]
pub struct MatchRun {
    pub outcomes: Vec<(CandidatePair, MatchOutcome)>,
    pub failures: Vec<(CandidatePair, EngineError)>,
}

/// Feeds the engine one call per candidate pair.
///
/// Failures are collected against their pair and never abort the run.
pub fn match_candidates<E: MatchEngine>(
    engine: &E,
    tiles: &[TileSpec],
    pairs: &BTreeSet<CandidatePair>,
    config: &EngineConfig,
) -> MatchRun {
    let mut run = MatchRun::default();

    for &pair in pairs {
        match engine.match_pair(&tiles[pair.a], &tiles[pair.b], config) {
            Ok(outcome) => run.outcomes.push((pair, outcome)),
            Err(error) => {
                tracing::warn!(a = pair.a, b = pair.b, %error, "engine failed for pair");
                run.failures.push((pair, error));
            }
        }
    }

    run
}
