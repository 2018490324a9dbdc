use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::consts::{EDGE_DISTANCE_UNDEFINED, RARE_RADIUS_MAX_COUNT};

use super::types::PhotoOutcome;

/// Photos that share one detected radius.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RadiusBucket {
    pub radius: u32,
    pub count: usize,
    /// Listed only for rare radii (likely mis-detections), sorted.
    pub photos: Vec<PathBuf>,
}

/// Dry-run statistics used to tune the next run's parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchStatistics {
    pub photos: usize,
    pub detected: usize,
    pub none_found: usize,
    pub ambiguous: usize,
    pub failed: usize,
    pub cancelled: usize,
    /// Center-to-edge distances of every detected Sun, ascending; `-1` for
    /// centers on the image border.
    pub edge_distances: Vec<i64>,
    /// Radius histogram, ascending by radius.
    pub radii: Vec<RadiusBucket>,
}

impl BatchStatistics {
    /// Radius to photo count.
    pub fn histogram(&self) -> BTreeMap<u32, usize> {
        self.radii.iter().map(|b| (b.radius, b.count)).collect()
    }

    /// Buckets with few enough photos to be listed by path.
    pub fn rare_buckets(&self) -> impl Iterator<Item = &RadiusBucket> {
        self.radii.iter().filter(|b| b.count <= RARE_RADIUS_MAX_COUNT)
    }

    /// True when no photo yielded a usable detection.
    pub fn is_empty(&self) -> bool {
        self.detected == 0
    }
}

/// Builds [`BatchStatistics`] as outcomes arrive.
///
/// Arrival order does not matter: counts live in a map and the distance list
/// is sorted on [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct StatisticsAccumulator {
    stats: BatchStatistics,
    by_radius: BTreeMap<u32, Vec<PathBuf>>,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, photo: PathBuf, outcome: &PhotoOutcome) {
        self.stats.photos += 1;
        match outcome {
            PhotoOutcome::Detected(sun) => {
                self.stats.detected += 1;
                self.stats.edge_distances.push(
                    sun.min_edge_distance
                        .map_or(EDGE_DISTANCE_UNDEFINED, i64::from),
                );
                self.by_radius.entry(sun.radius).or_default().push(photo);
            }
            PhotoOutcome::NoneFound => self.stats.none_found += 1,
            PhotoOutcome::Ambiguous(_) => self.stats.ambiguous += 1,
            // A dry run never writes aligned photos.
            PhotoOutcome::Failed(_) | PhotoOutcome::Written(_) => self.stats.failed += 1,
            PhotoOutcome::Cancelled => self.stats.cancelled += 1,
        }
    }

    pub fn finish(self) -> BatchStatistics {
        let mut stats = self.stats;
        stats.edge_distances.sort_unstable();
        stats.radii = self
            .by_radius
            .into_iter()
            .map(|(radius, mut photos)| {
                let count = photos.len();
                if count <= RARE_RADIUS_MAX_COUNT {
                    photos.sort();
                } else {
                    photos.clear();
                }
                RadiusBucket {
                    radius,
                    count,
                    photos,
                }
            })
            .collect();
        stats
    }
}

/// Counts of an align run's terminal states.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AlignSummary {
    pub photos: usize,
    pub written: usize,
    pub none_found: usize,
    pub ambiguous: usize,
    pub failed: usize,
    pub cancelled: usize,
}

impl AlignSummary {
    pub fn record(&mut self, outcome: &PhotoOutcome) {
        self.photos += 1;
        match outcome {
            PhotoOutcome::Written(_) => self.written += 1,
            PhotoOutcome::NoneFound => self.none_found += 1,
            PhotoOutcome::Ambiguous(_) => self.ambiguous += 1,
            // Detected without a written file means alignment never ran.
            PhotoOutcome::Failed(_) | PhotoOutcome::Detected(_) => self.failed += 1,
            PhotoOutcome::Cancelled => self.cancelled += 1,
        }
    }

    /// Photos skipped for lack of a single Sun.
    pub fn skipped(&self) -> usize {
        self.none_found + self.ambiguous
    }
}
