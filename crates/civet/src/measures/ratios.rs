//! The variance-decomposition indices: the Variance Ratio Criterion, the
//! WB-index, and the Score Function.
//!
//! All three are built from the between-cluster sum of squares `SSb` and the
//! within-cluster sum of squares `SSw`. The grand mean they share comes from
//! an explicit [`EvalContext`]; nothing here is cached.

use distances::number::Float;

use crate::core::dataset::{Centroids, Dataset};
use crate::core::metric::Metric;
use crate::core::partition::Partition;

use super::{check_shapes, cluster_scatter, populated_clusters, ssw, EvalContext};

/// The between-cluster sum of squares: the sum over populated clusters of
/// the cluster size times the squared distance from its centroid to the
/// grand mean.
///
/// # Errors
///
/// * If the context and the centroids disagree on dimensionality.
/// * If a populated cluster has no centroid row.
pub fn ssb<T: Float, M: Metric<Vec<T>, T>, P: Partition>(
    ctx: &EvalContext<T>,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<T, String> {
    if ctx.dimensionality() != centroids.dimensionality() {
        return Err(format!(
            "The context has dimensionality {} but the centroids have {}.",
            ctx.dimensionality(),
            centroids.dimensionality()
        ));
    }
    let total = populated_clusters(partition, centroids.num_rows())?
        .into_iter()
        .map(|(j, members)| T::from(members.len()) * metric.distance(centroids.row(j), ctx.grand_mean()).powi(2))
        .sum();
    Ok(total)
}

/// The Variance Ratio Criterion (Calinski-Harabasz):
/// `(SSb / SSw) * (n - k) / (k - 1)` with `k` the number of populated
/// clusters.
///
/// Higher is better. Sentinel `T::ZERO` when fewer than two clusters are
/// populated or `SSw` is zero.
///
/// # Errors
///
/// * If the shapes disagree, or a populated cluster has no centroid row.
/// * If the context was built for a different cardinality.
pub fn variance_ratio_criterion<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    ctx: &EvalContext<T>,
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<T, String> {
    let (k, within, between) = decompose(ctx, data, metric, centroids, partition)?;
    if k < 2 || within == T::ZERO {
        return Ok(T::ZERO);
    }
    let n = T::from(ctx.cardinality());
    let k_t = T::from(k);
    Ok((between / within) * (n - k_t) / (k_t - T::ONE))
}

/// The WB-index: `(SSw / SSb) * (k - 1)` with `k` the number of populated
/// clusters, the inverse-weighted counterpart of the Variance Ratio
/// Criterion.
///
/// Lower is better. Sentinel `T::MAX` when fewer than two clusters are
/// populated or `SSb` is zero.
///
/// # Errors
///
/// * If the shapes disagree, or a populated cluster has no centroid row.
/// * If the context was built for a different cardinality.
pub fn wb_index<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    ctx: &EvalContext<T>,
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<T, String> {
    let (k, within, between) = decompose(ctx, data, metric, centroids, partition)?;
    if k < 2 || between == T::ZERO {
        return Ok(T::MAX);
    }
    Ok((within / between) * (T::from(k) - T::ONE))
}

/// The Score Function: `1 - 1 / exp(exp(bcd - wcd))`, where
/// `bcd = SSb / (n * k)` and `wcd` is the mean over populated clusters of
/// the mean member-to-centroid distance.
///
/// Unlike the other two ratios the Score Function remains defined for a
/// single populated cluster. Higher is better. Sentinel `T::ZERO` when no
/// cluster is populated at all.
///
/// # Errors
///
/// * If the shapes disagree, or a populated cluster has no centroid row.
/// * If the context was built for a different cardinality.
pub fn score_function<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    ctx: &EvalContext<T>,
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<T, String> {
    check_cardinality(ctx, data)?;
    check_shapes(data, centroids, partition)?;
    let populated = populated_clusters(partition, centroids.num_rows())?;
    let k = populated.len();
    if k == 0 {
        return Ok(T::ZERO);
    }

    let between = ssb(ctx, metric, centroids, partition)?;
    let bcd = between / (T::from(ctx.cardinality()) * T::from(k));

    let scatter_total = populated
        .iter()
        .map(|(j, members)| cluster_scatter(data, metric, centroids.row(*j), members))
        .map(|s| s.unwrap_or(T::ZERO))
        .sum::<T>();
    let wcd = scatter_total / T::from(k);

    // `Float` from the distances crate carries no `exp`; the double
    // exponential goes through f64.
    let value = 1.0 - 1.0 / (bcd - wcd).as_f64().exp().exp();
    Ok(T::from(value))
}

/// Checks the context against the dataset and returns
/// `(k, SSw, SSb)` over the populated clusters.
fn decompose<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    ctx: &EvalContext<T>,
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<(usize, T, T), String> {
    check_cardinality(ctx, data)?;
    check_shapes(data, centroids, partition)?;
    let k = populated_clusters(partition, centroids.num_rows())?.len();
    let within = ssw(data, metric, centroids, partition)?;
    let between = ssb(ctx, metric, centroids, partition)?;
    Ok((k, within, between))
}

/// Checks that a context was built over as many instances as the dataset
/// holds.
fn check_cardinality<T: Float, D: Dataset<Vec<T>>>(ctx: &EvalContext<T>, data: &D) -> Result<(), String> {
    if ctx.cardinality() == data.cardinality() {
        Ok(())
    } else {
        Err(format!(
            "The context was built over {} instances but the dataset has {}.",
            ctx.cardinality(),
            data.cardinality()
        ))
    }
}
