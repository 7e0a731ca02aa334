//! End-to-end tests for the validity-measure battery.

use test_case::test_case;

use civet::{
    measures,
    metric::{Euclidean, Manhattan},
    Centroids, DissimilarityMatrix, EvalContext, LabelPartition, MetricDissimilarity,
};

mod common;

#[test]
fn the_unit_square_scenario() {
    let (data, centroid_rows, partition) = common::data_gen::unit_square();
    let centroids = Centroids::new(centroid_rows).unwrap();
    let metric = Euclidean;

    // Four instances, each 0.5 from its centroid.
    let (sse, valid) = measures::sse(&data, &metric, &centroids, &partition).unwrap();
    assert!(valid);
    assert!(float_cmp::approx_eq!(f64, sse, 1.0, ulps = 2));

    // Two populated clusters with inter-centroid distance 1.
    let db = measures::davies_bouldin(&data, &metric, &centroids, &partition).unwrap();
    assert!(db.is_finite());
    assert!(db > 0.0);

    let matrix = DissimilarityMatrix::new(&data, &metric);
    let dunn = measures::dunn(&matrix, &partition).unwrap();
    assert!(dunn > 0.0);
}

#[test]
fn single_cluster_sentinels() {
    let (data, _) = common::data_gen::blobs(3, 8, 42);
    let lumped = LabelPartition::new(vec![Some(0); data.len()], 2).unwrap();
    let centroids = Centroids::from_partition(&data, &lumped).unwrap();
    let metric = Euclidean;
    let ctx = EvalContext::new(&data, &metric).unwrap();
    let matrix = DissimilarityMatrix::new(&data, &metric);

    assert_eq!(measures::davies_bouldin(&data, &metric, &centroids, &lumped).unwrap(), f64::MAX);
    assert_eq!(measures::wb_index(&ctx, &data, &metric, &centroids, &lumped).unwrap(), f64::MAX);
    assert_eq!(measures::xie_beni(&data, &metric, &centroids, &lumped).unwrap(), f64::MAX);
    assert_eq!(measures::cs_measure(&matrix, &metric, &centroids, &lumped).unwrap(), f64::MAX);

    assert_eq!(measures::dunn(&matrix, &lumped).unwrap(), 0.0);
    assert_eq!(measures::simplified_dunn(&data, &metric, &centroids, &lumped).unwrap(), 0.0);
    assert_eq!(measures::silhouette(&matrix, &lumped).unwrap(), 0.0);
    assert_eq!(
        measures::simplified_silhouette(&data, &metric, &centroids, &lumped).unwrap(),
        0.0
    );
    assert_eq!(
        measures::variance_ratio_criterion(&ctx, &data, &metric, &centroids, &lumped).unwrap(),
        0.0
    );
    assert_eq!(measures::index_i(&ctx, &data, &metric, &centroids, &lumped, 2).unwrap(), 0.0);
}

#[test_case(2, 16; "two blobs")]
#[test_case(4, 8; "four blobs")]
#[test_case(6, 5; "six blobs")]
fn ground_truth_beats_shuffled_labels(k: usize, per_cluster: usize) {
    let (data, truth) = common::data_gen::blobs(k, per_cluster, 1234);
    let metric = Euclidean;
    let ctx = EvalContext::new(&data, &metric).unwrap();
    let matrix = DissimilarityMatrix::new(&data, &metric);

    // A degenerate candidate: labels rotated so clusters mix blobs.
    let shuffled_labels = (0..data.len()).map(|i| Some(i % k)).collect::<Vec<_>>();
    let shuffled = LabelPartition::new(shuffled_labels, k).unwrap();

    let good_centroids = Centroids::from_partition(&data, &truth).unwrap();
    let bad_centroids = Centroids::from_partition(&data, &shuffled).unwrap();

    let good_sil = measures::silhouette(&matrix, &truth).unwrap();
    let bad_sil = measures::silhouette(&matrix, &shuffled).unwrap();
    assert!(good_sil > bad_sil);

    let good_db = measures::davies_bouldin(&data, &metric, &good_centroids, &truth).unwrap();
    let bad_db = measures::davies_bouldin(&data, &metric, &bad_centroids, &shuffled).unwrap();
    assert!(good_db < bad_db);

    let good_vrc = measures::variance_ratio_criterion(&ctx, &data, &metric, &good_centroids, &truth).unwrap();
    let bad_vrc = measures::variance_ratio_criterion(&ctx, &data, &metric, &bad_centroids, &shuffled).unwrap();
    assert!(good_vrc > bad_vrc);

    let good_xb = measures::xie_beni(&data, &metric, &good_centroids, &truth).unwrap();
    let bad_xb = measures::xie_beni(&data, &metric, &bad_centroids, &shuffled).unwrap();
    assert!(good_xb < bad_xb);
}

#[test]
fn measures_are_idempotent() {
    let (data, partition) = common::data_gen::blobs(3, 10, 7);
    let metric = Euclidean;
    let centroids = Centroids::from_partition(&data, &partition).unwrap();
    let ctx = EvalContext::new(&data, &metric).unwrap();
    let matrix = DissimilarityMatrix::new(&data, &metric);

    // Bit-identical results on repeated calls: no hidden state anywhere.
    assert_eq!(
        measures::sse(&data, &metric, &centroids, &partition).unwrap(),
        measures::sse(&data, &metric, &centroids, &partition).unwrap()
    );
    assert_eq!(
        measures::davies_bouldin(&data, &metric, &centroids, &partition).unwrap(),
        measures::davies_bouldin(&data, &metric, &centroids, &partition).unwrap()
    );
    assert_eq!(
        measures::silhouette(&matrix, &partition).unwrap(),
        measures::silhouette(&matrix, &partition).unwrap()
    );
    assert_eq!(
        measures::variance_ratio_criterion(&ctx, &data, &metric, &centroids, &partition).unwrap(),
        measures::variance_ratio_criterion(&ctx, &data, &metric, &centroids, &partition).unwrap()
    );
    assert_eq!(
        measures::score_function(&ctx, &data, &metric, &centroids, &partition).unwrap(),
        measures::score_function(&ctx, &data, &metric, &centroids, &partition).unwrap()
    );
    assert_eq!(
        measures::index_i(&ctx, &data, &metric, &centroids, &partition, 2).unwrap(),
        measures::index_i(&ctx, &data, &metric, &centroids, &partition, 2).unwrap()
    );
}

#[test]
fn matrix_and_lazy_dissimilarities_agree_across_measures() {
    let (data, partition) = common::data_gen::blobs(4, 6, 99);
    let metric = Manhattan;
    let matrix = DissimilarityMatrix::new(&data, &metric);
    let lazy = MetricDissimilarity::new(&data, &metric);

    let a: f64 = measures::dunn(&matrix, &partition).unwrap();
    let b = measures::dunn(&lazy, &partition).unwrap();
    assert!(float_cmp::approx_eq!(f64, a, b, ulps = 2));

    let a = measures::silhouette(&matrix, &partition).unwrap();
    let b = measures::silhouette(&lazy, &partition).unwrap();
    assert!(float_cmp::approx_eq!(f64, a, b, ulps = 2));
}

#[test]
fn linked_partitions_score_like_their_label_form() {
    let (data, labels) = common::data_gen::blobs(3, 7, 5);
    let linked = civet::LinkedPartition::from_partition(&labels);
    let metric = Euclidean;
    let centroids = Centroids::from_partition(&data, &labels).unwrap();

    let (a, a_valid) = measures::sse(&data, &metric, &centroids, &labels).unwrap();
    let (b, b_valid) = measures::sse(&data, &metric, &centroids, &linked).unwrap();
    assert!(a_valid && b_valid);
    assert!(float_cmp::approx_eq!(f64, a, b, ulps = 2));

    let a = measures::davies_bouldin(&data, &metric, &centroids, &labels).unwrap();
    let b = measures::davies_bouldin(&data, &metric, &centroids, &linked).unwrap();
    assert!(float_cmp::approx_eq!(f64, a, b, ulps = 2));
}

#[test]
fn degenerate_inputs_never_error() {
    // One instance, one cluster: about as degenerate as it gets.
    let data = vec![vec![1.0_f64, 2.0]];
    let partition = LabelPartition::new(vec![Some(0)], 1).unwrap();
    let centroids = Centroids::from_partition(&data, &partition).unwrap();
    let metric = Euclidean;
    let ctx = EvalContext::new(&data, &metric).unwrap();
    let matrix = DissimilarityMatrix::new(&data, &metric);

    assert!(measures::sse(&data, &metric, &centroids, &partition).is_ok());
    assert!(measures::distortion(&data, &metric, &centroids, &partition).is_ok());
    assert!(measures::davies_bouldin(&data, &metric, &centroids, &partition).is_ok());
    assert!(measures::dunn(&matrix, &partition).is_ok());
    assert!(measures::silhouette(&matrix, &partition).is_ok());
    assert!(measures::variance_ratio_criterion(&ctx, &data, &metric, &centroids, &partition).is_ok());
    assert!(measures::wb_index(&ctx, &data, &metric, &centroids, &partition).is_ok());
    assert!(measures::score_function(&ctx, &data, &metric, &centroids, &partition).is_ok());
    assert!(measures::cs_measure(&matrix, &metric, &centroids, &partition).is_ok());
    assert!(measures::xie_beni(&data, &metric, &centroids, &partition).is_ok());
    assert!(measures::index_i(&ctx, &data, &metric, &centroids, &partition, 2).is_ok());
}
