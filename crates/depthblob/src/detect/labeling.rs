//! Three-pass connected-component labeling of a depth raster.
//!
//! Pass 1 scans in row-major order and labels every valid pixel from its
//! causal neighborhood (west, northwest, north, northeast), merging labels
//! through a [`DisjointSet`] whenever several neighborhoods meet. Pass 2
//! canonicalizes the provisional labels and counts pixels per blob. Pass 3
//! filters small blobs, caps the obstacle count, and accumulates centroid
//! and bounding-extent statistics per surviving blob.
//!
//! Every pass is O(width × height); the union-find operations amortize to
//! effectively constant time.

use crate::detect::config::DetectorConfig;
use crate::disjoint_set::DisjointSet;
use crate::frame::DepthFrame;

/// Label value for background / unlabeled pixels.
const BACKGROUND: u16 = 0;

/// Largest usable label; the forest gets one extra slot so label
/// `u16::MAX` itself stays addressable.
pub(crate) const MAX_LABEL: u32 = u16::MAX as u32;

const NO_SLOT: u32 = u32::MAX;

/// Detector-owned scratch buffers, grown on demand and reused across frames.
///
/// Indexed by canonical label; nothing here survives a call as meaningful
/// state, the storage is kept only to avoid reallocation.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
    /// Per-pixel labels; provisional after pass 1, canonical after pass 2.
    labels: Vec<u16>,
    /// Pixels per canonical label.
    pixel_counts: Vec<u32>,
    /// Obstacle slot assigned to a canonical label, or `NO_SLOT`.
    slots: Vec<u32>,
}

impl Scratch {
    fn reset(&mut self, n_pixels: usize) {
        self.labels.clear();
        self.labels.resize(n_pixels, BACKGROUND);
        self.pixel_counts.clear();
        self.pixel_counts.resize(MAX_LABEL as usize + 1, 0);
        self.slots.clear();
        self.slots.resize(MAX_LABEL as usize + 1, NO_SLOT);
    }

    #[cfg(test)]
    pub(crate) fn labels(&self) -> &[u16] {
        &self.labels
    }
}

/// Per-blob accumulators, finalized by the projector into an [`Obstacle`].
///
/// [`Obstacle`]: crate::obstacle::Obstacle
#[derive(Debug, Clone)]
pub(crate) struct BlobStats {
    pub pixel_count: u32,
    pub sum_row: f64,
    pub sum_col: f64,
    pub min_depth: u16,
    pub max_depth: u16,
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl BlobStats {
    fn new(pixel_count: u32) -> Self {
        Self {
            pixel_count,
            sum_row: 0.0,
            sum_col: 0.0,
            min_depth: u16::MAX,
            max_depth: 0,
            min_row: usize::MAX,
            max_row: 0,
            min_col: usize::MAX,
            max_col: 0,
        }
    }

    #[inline]
    fn accumulate(&mut self, row: usize, col: usize, depth: u16) {
        self.sum_row += row as f64;
        self.sum_col += col as f64;
        self.min_depth = self.min_depth.min(depth);
        self.max_depth = self.max_depth.max(depth);
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
    }
}

/// Distance threshold converted to raw depth units for this frame.
///
/// A configured threshold below one depth unit cannot gate anything and is
/// treated as disabled.
fn raw_threshold(config: &DetectorConfig, frame: &DepthFrame) -> Option<u16> {
    config
        .distance_threshold_m
        .map(|meters| (meters / frame.scale_m()) as u16)
        .filter(|&raw| raw > 0)
}

/// Validity gate: non-zero return, and nearer than the threshold if one is set.
#[inline]
fn is_valid(depth: u16, threshold: Option<u16>) -> bool {
    depth != BACKGROUND && threshold.map_or(true, |t| depth < t)
}

/// Similarity gate for two valid neighboring samples.
#[inline]
fn in_tolerance(a: u16, b: u16, tolerance: u16) -> bool {
    a.abs_diff(b) <= tolerance
}

/// Run all three passes over `frame`, returning per-blob statistics in
/// scan-discovery order. The caller owns `scratch` and may reuse it for the
/// next frame.
pub(crate) fn extract_blobs(
    frame: &DepthFrame,
    config: &DetectorConfig,
    scratch: &mut Scratch,
) -> Vec<BlobStats> {
    if frame.is_empty() {
        return Vec::new();
    }

    scratch.reset(frame.data().len());
    let mut forest = DisjointSet::new(MAX_LABEL as usize + 1);

    label_pixels(frame, config, scratch, &mut forest);
    canonicalize(scratch, &mut forest);
    collect_blobs(frame, config, scratch)
}

/// Pass 1: provisional labels from the causal neighborhood.
fn label_pixels(
    frame: &DepthFrame,
    config: &DetectorConfig,
    scratch: &mut Scratch,
    forest: &mut DisjointSet,
) {
    let width = frame.width();
    let data = frame.data();
    let threshold = raw_threshold(config, frame);
    let tolerance = config.depth_tolerance;

    // Next fresh label; saturates at MAX_LABEL, after which new blobs fall
    // back to background and are dropped.
    let mut next_label: u32 = 1;

    for (idx, &depth) in data.iter().enumerate() {
        if !is_valid(depth, threshold) {
            continue; // labels[idx] already BACKGROUND
        }

        let row = idx / width;
        let col = idx % width;

        // Labels of causal neighbors that are valid, depth-similar, and
        // actually labeled. Label 0 never qualifies, so saturated-out or
        // background neighbors cannot leak into a union.
        let mut neighbors = [0u16; 4];
        let mut n = 0;
        let consider = |k: usize, labels: &[u16]| -> Option<u16> {
            let label = labels[k];
            if label != BACKGROUND && in_tolerance(data[k], depth, tolerance) {
                return Some(label);
            }
            None
        };

        if col > 0 {
            if let Some(l) = consider(idx - 1, &scratch.labels) {
                neighbors[n] = l;
                n += 1;
            }
        }
        if row > 0 {
            let north = idx - width;
            if col > 0 {
                if let Some(l) = consider(north - 1, &scratch.labels) {
                    neighbors[n] = l;
                    n += 1;
                }
            }
            if let Some(l) = consider(north, &scratch.labels) {
                neighbors[n] = l;
                n += 1;
            }
            if col + 1 < width {
                if let Some(l) = consider(north + 1, &scratch.labels) {
                    neighbors[n] = l;
                    n += 1;
                }
            }
        }

        if n == 0 {
            scratch.labels[idx] = if next_label <= MAX_LABEL {
                let label = next_label as u16;
                next_label += 1;
                label
            } else {
                BACKGROUND
            };
            continue;
        }

        // The smallest qualifying label wins; union it with the rest so the
        // forest records that all those regions are one blob.
        let mut smallest = neighbors[0];
        for &label in &neighbors[1..n] {
            if label < smallest {
                smallest = label;
            }
        }
        scratch.labels[idx] = smallest;
        for &other in &neighbors[..n] {
            if other != smallest {
                forest.union(u32::from(smallest), u32::from(other));
            }
        }
    }
}

/// Pass 2: replace provisional labels with canonical roots and count pixels.
fn canonicalize(scratch: &mut Scratch, forest: &mut DisjointSet) {
    for label in scratch.labels.iter_mut() {
        if *label != BACKGROUND {
            let canonical = forest.find(u32::from(*label)) as u16;
            *label = canonical;
            scratch.pixel_counts[canonical as usize] += 1;
        }
    }
}

/// Pass 3: filter, cap, and accumulate statistics per surviving blob.
fn collect_blobs(
    frame: &DepthFrame,
    config: &DetectorConfig,
    scratch: &mut Scratch,
) -> Vec<BlobStats> {
    let width = frame.width();
    let data = frame.data();
    let mut blobs: Vec<BlobStats> = Vec::new();

    for (idx, &label) in scratch.labels.iter().enumerate() {
        if label == BACKGROUND {
            continue;
        }
        let count = scratch.pixel_counts[label as usize];
        if (count as usize) < config.min_num_pixels {
            continue;
        }

        let slot = scratch.slots[label as usize];
        let slot = if slot == NO_SLOT {
            if blobs.len() >= config.max_num_obstacles {
                continue;
            }
            let new_slot = blobs.len() as u32;
            scratch.slots[label as usize] = new_slot;
            blobs.push(BlobStats::new(count));
            new_slot
        } else {
            slot
        };

        blobs[slot as usize].accumulate(idx / width, idx % width, data[idx]);
    }

    blobs
}
