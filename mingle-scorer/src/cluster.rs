//! Offline display clustering over profile feature vectors.
//!
//! A small Lloyd's iteration partitions the population into a fixed number
//! of groups using `[age, lon, lat, multi-hot hobby flags]` vectors, the same
//! features the scorer reads. Labels are display-only; exact assignments are
//! not part of any contract, so the implementation favours clarity over
//! refinement (no k-means++ seeding, no re-splitting of empty clusters).

use std::collections::BTreeSet;

use mingle_core::{PartitionError, Partitioner, UserProfile};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DEFAULT_MAX_ITERATIONS: usize = 100;
const DEFAULT_SEED: u64 = 42;

/// [`Partitioner`] backed by seeded Lloyd's iteration.
///
/// Two partitioners built from the same seed produce identical labels for
/// identical input, which keeps the display annotation reproducible across
/// restarts.
#[derive(Debug, Clone, Copy)]
pub struct KMeansPartitioner {
    max_iterations: usize,
    seed: u64,
}

impl KMeansPartitioner {
    /// Build a partitioner with an explicit iteration budget and seed.
    #[must_use]
    pub fn new(max_iterations: usize, seed: u64) -> Self {
        Self {
            max_iterations,
            seed,
        }
    }

    /// Build a partitioner with the default iteration budget.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS, seed)
    }
}

impl Default for KMeansPartitioner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS, DEFAULT_SEED)
    }
}

impl Partitioner for KMeansPartitioner {
    fn partition(
        &self,
        profiles: &[UserProfile],
        clusters: usize,
    ) -> Result<Vec<u32>, PartitionError> {
        if clusters == 0 {
            return Err(PartitionError::ZeroClusters);
        }
        if profiles.len() < clusters {
            return Err(PartitionError::NotEnoughProfiles {
                requested: clusters,
                available: profiles.len(),
            });
        }

        let vectors = feature_vectors(profiles);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut centroids: Vec<Vec<f64>> =
            rand::seq::index::sample(&mut rng, vectors.len(), clusters)
                .into_iter()
                .filter_map(|index| vectors.get(index).cloned())
                .collect();

        let mut labels = vec![0_usize; vectors.len()];
        for iteration in 0..self.max_iterations {
            let assigned: Vec<usize> = vectors
                .iter()
                .map(|vector| nearest_centroid(vector, &centroids))
                .collect();
            if assigned == labels && iteration > 0 {
                log::debug!("k-means converged after {iteration} iterations");
                break;
            }
            labels = assigned;
            centroids = recompute_centroids(&vectors, &labels, &centroids);
        }

        Ok(labels
            .into_iter()
            .map(|label| u32::try_from(label).unwrap_or(u32::MAX))
            .collect())
    }
}

/// Encode each profile as `[age, lon, lat, hobby flags]` over the shared
/// hobby vocabulary, mirroring the features the population was generated
/// from. Values are deliberately left unscaled.
fn feature_vectors(profiles: &[UserProfile]) -> Vec<Vec<f64>> {
    let vocabulary: Vec<&String> = profiles
        .iter()
        .flat_map(|profile| profile.hobbies.iter())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    profiles
        .iter()
        .map(|profile| {
            let mut vector = Vec::with_capacity(3 + vocabulary.len());
            vector.push(f64::from(profile.age));
            vector.push(profile.location.x);
            vector.push(profile.location.y);
            vector.extend(vocabulary.iter().map(|hobby| {
                if profile.hobbies.contains(*hobby) {
                    1.0
                } else {
                    0.0
                }
            }));
            vector
        })
        .collect()
}

fn nearest_centroid(vector: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0_usize;
    let mut best_distance = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(vector, centroid);
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}

#[expect(
    clippy::float_arithmetic,
    reason = "centroid assignment needs the squared Euclidean distance"
)]
fn squared_distance(left: &[f64], right: &[f64]) -> f64 {
    left.iter()
        .zip(right)
        .map(|(a, b)| (a - b) * (a - b))
        .sum()
}

/// Mean of each cluster's members; an empty cluster keeps its previous
/// centroid rather than being re-seeded.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "centroid means divide component sums by small member counts"
)]
fn recompute_centroids(
    vectors: &[Vec<f64>],
    labels: &[usize],
    previous: &[Vec<f64>],
) -> Vec<Vec<f64>> {
    previous
        .iter()
        .enumerate()
        .map(|(cluster, old)| {
            let members: Vec<&Vec<f64>> = vectors
                .iter()
                .zip(labels)
                .filter(|&(_, &label)| label == cluster)
                .map(|(vector, _)| vector)
                .collect();
            if members.is_empty() {
                return old.clone();
            }
            let mut mean = vec![0.0_f64; old.len()];
            for member in &members {
                for (slot, value) in mean.iter_mut().zip(member.iter()) {
                    *slot += value;
                }
            }
            let count = members.len() as f64;
            for slot in &mut mean {
                *slot /= count;
            }
            mean
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    fn blob(start_id: u64, age: u32, x: f64, hobby: &str, count: u64) -> Vec<UserProfile> {
        (0..count)
            .map(|offset| {
                UserProfile::new(
                    start_id + offset,
                    format!("user-{}", start_id + offset),
                    age,
                    Coord { x, y: x },
                    [hobby],
                )
                .expect("valid profile")
                .online(true)
            })
            .collect()
    }

    #[rstest]
    fn zero_clusters_are_rejected() {
        let profiles = blob(0, 30, 0.0, "chess", 2);
        let err = KMeansPartitioner::default()
            .partition(&profiles, 0)
            .unwrap_err();
        assert_eq!(err, PartitionError::ZeroClusters);
    }

    #[rstest]
    fn more_clusters_than_profiles_are_rejected() {
        let profiles = blob(0, 30, 0.0, "chess", 2);
        let err = KMeansPartitioner::default()
            .partition(&profiles, 3)
            .unwrap_err();
        assert_eq!(
            err,
            PartitionError::NotEnoughProfiles {
                requested: 3,
                available: 2,
            }
        );
    }

    #[rstest]
    fn every_profile_receives_a_label_in_range() {
        let mut profiles = blob(0, 25, 0.0, "chess", 3);
        profiles.extend(blob(3, 60, 50.0, "hiking", 3));
        let labels = KMeansPartitioner::default()
            .partition(&profiles, 2)
            .expect("partition succeeds");
        assert_eq!(labels.len(), profiles.len());
        assert!(labels.iter().all(|&label| label < 2));
    }

    #[rstest]
    fn identical_profiles_share_a_label() {
        let mut profiles = blob(0, 25, 0.0, "chess", 3);
        profiles.extend(blob(3, 60, 50.0, "hiking", 3));
        let labels = KMeansPartitioner::default()
            .partition(&profiles, 2)
            .expect("partition succeeds");
        let (first_blob, second_blob) = labels.split_at(3);
        assert!(first_blob.iter().all(|&label| label == first_blob[0]));
        assert!(second_blob.iter().all(|&label| label == second_blob[0]));
    }

    #[rstest]
    fn equal_seeds_reproduce_the_same_labels() {
        let mut profiles = blob(0, 25, 0.0, "chess", 4);
        profiles.extend(blob(4, 60, 50.0, "hiking", 4));
        let first = KMeansPartitioner::seeded(7)
            .partition(&profiles, 3)
            .expect("partition succeeds");
        let second = KMeansPartitioner::seeded(7)
            .partition(&profiles, 3)
            .expect("partition succeeds");
        assert_eq!(first, second);
    }
}
