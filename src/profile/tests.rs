//! Tests for the profile module.

use std::sync::Arc;

use arrow::{
    array::{
        BooleanArray, Date32Array, Float64Array, Int64Array, RecordBatch, StringArray,
    },
    datatypes::{DataType, Field, Schema},
};

use super::*;
use crate::{dataset::ArrowDataset, error::Error};

/// Eleven-row mixed-type fixture: one null in `category`, an outlier in
/// `value1`, a binary `value2`, a constant column, a boolean, a date,
/// and a final row duplicating the one before it.
fn sample_dataset() -> ArrowDataset {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("category", DataType::Utf8, true),
        Field::new("value1", DataType::Float64, false),
        Field::new("value2", DataType::Int64, false),
        Field::new("all_same", DataType::Int64, false),
        Field::new("bool_col", DataType::Boolean, false),
        Field::new("date_col", DataType::Date32, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10])),
            Arc::new(StringArray::from(vec![
                Some("A"),
                Some("B"),
                Some("A"),
                Some("C"),
                Some("B"),
                Some("A"),
                Some("A"),
                None,
                Some("C"),
                Some("B"),
                Some("B"),
            ])),
            Arc::new(Float64Array::from(vec![
                10.1, 12.5, 9.8, 50.3, 11.0, 9.9, 10.5, 13.0, 1000.0, 11.5, 11.5,
            ])),
            Arc::new(Int64Array::from(vec![0, 1, 0, 1, 0, 0, 0, 1, 1, 0, 0])),
            Arc::new(Int64Array::from(vec![5; 11])),
            Arc::new(BooleanArray::from(vec![
                true, false, true, false, true, true, false, true, false, true, true,
            ])),
            Arc::new(Date32Array::from(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9])),
        ],
    )
    .unwrap();

    ArrowDataset::from_batch(batch).unwrap()
}

/// Profiler with thresholds sized for the eleven-row fixture:
/// effective threshold min(5, floor(11 * 0.5)) = 5.
fn sample_profiler() -> Profiler {
    Profiler::new()
        .unique_n_threshold(5)
        .unique_prop_threshold(0.5)
        .rare_level_threshold(1)
}

fn issues_dataset() -> ArrowDataset {
    let schema = Arc::new(Schema::new(vec![
        Field::new("a", DataType::Float64, true),
        Field::new("b", DataType::Float64, true),
        Field::new("c", DataType::Float64, true),
        Field::new("d", DataType::Utf8, true),
        Field::new("e", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Float64Array::from(vec![
                Some(1.0),
                None,
                Some(3.0),
                Some(f64::NAN),
                Some(5.0),
            ])),
            Arc::new(Float64Array::from(vec![None::<f64>; 5])),
            Arc::new(Float64Array::from(vec![
                Some(1.0),
                Some(2.0),
                Some(f64::INFINITY),
                Some(f64::NEG_INFINITY),
                Some(5.0),
            ])),
            Arc::new(StringArray::from(vec![
                Some("x"),
                Some("y"),
                Some("x"),
                Some("z"),
                Some("y"),
            ])),
            Arc::new(Int64Array::from(vec![1, 1, 1, 1, 1])),
        ],
    )
    .unwrap();

    ArrowDataset::from_batch(batch).unwrap()
}

/// Profiler sized for the five-row issues fixture:
/// effective threshold min(3, floor(5 * 0.8)) = 3.
fn issues_profiler() -> Profiler {
    Profiler::new()
        .unique_n_threshold(3)
        .unique_prop_threshold(0.8)
}

// ========== Structure ==========

#[test]
fn test_profile_shapes() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();

    assert_eq!(report.columns.len(), 7);
    assert_eq!(report.rows.len(), 11);
    assert_eq!(report.dataset.row_count, 11);
    assert_eq!(report.dataset.column_count, 7);
}

#[test]
fn test_row_indices_in_original_order() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();
    let indices: Vec<usize> = report.rows.iter().map(|r| r.row_index).collect();
    assert_eq!(indices, (0..11).collect::<Vec<usize>>());
}

#[test]
fn test_every_column_appears_once() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();
    let mut names: Vec<&str> = report.columns.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 7);
}

// ========== Rejection before computation ==========

#[test]
fn test_empty_rows_rejected() {
    let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Int64, false)]));
    let batch =
        RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(Vec::<i64>::new()))]).unwrap();
    let dataset = ArrowDataset::from_batch(batch).unwrap();

    let result = Profiler::new().profile(&dataset);
    assert!(matches!(result, Err(Error::EmptyDataset)));
}

#[test]
fn test_zero_width_rejected() {
    let schema = Arc::new(Schema::empty());
    let batch = RecordBatch::try_new_with_options(
        schema,
        vec![],
        &arrow::array::RecordBatchOptions::new().with_row_count(Some(3)),
    )
    .unwrap();
    let dataset = ArrowDataset::from_batch(batch).unwrap();

    let result = Profiler::new().profile(&dataset);
    assert!(matches!(result, Err(Error::EmptyDataset)));
}

#[test]
fn test_invalid_config_rejected() {
    let result = Profiler::new()
        .iqr_multiplier(-1.0)
        .profile(&sample_dataset());
    assert!(matches!(result, Err(Error::InvalidConfig { .. })));

    let result = Profiler::new()
        .unique_prop_threshold(2.0)
        .profile(&sample_dataset());
    assert!(matches!(result, Err(Error::InvalidConfig { .. })));
}

// ========== Classification ==========

#[test]
fn test_column_classes() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();

    assert_eq!(report.column("id").unwrap().class, ColumnClass::Numeric);
    assert_eq!(
        report.column("category").unwrap().class,
        ColumnClass::Categorical
    );
    assert_eq!(report.column("value1").unwrap().class, ColumnClass::Numeric);
    assert_eq!(
        report.column("value2").unwrap().class,
        ColumnClass::Categorical
    );
    assert_eq!(
        report.column("all_same").unwrap().class,
        ColumnClass::ZeroVariance
    );
    assert_eq!(
        report.column("bool_col").unwrap().class,
        ColumnClass::Categorical
    );
    assert_eq!(
        report.column("date_col").unwrap().class,
        ColumnClass::Temporal
    );
}

#[test]
fn test_effective_threshold_recorded() {
    // min(5, floor(11 * 0.2)) = 2
    let report = Profiler::new()
        .unique_n_threshold(5)
        .unique_prop_threshold(0.2)
        .profile(&sample_dataset())
        .unwrap();
    assert!(report.columns.iter().all(|c| c.threshold_used == 2));
}

#[test]
fn test_class_counts_in_dataset_summary() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();

    assert_eq!(report.dataset.numeric_column_count, 2);
    assert_eq!(report.dataset.categorical_column_count, 3);
    assert_eq!(report.dataset.zero_variance_column_count, 1);
    assert_eq!(report.dataset.temporal_column_count, 1);
    assert_eq!(report.dataset.other_column_count, 0);
}

// ========== Missingness ==========

#[test]
fn test_column_missingness() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();

    let category = report.column("category").unwrap();
    assert_eq!(category.missing_count, 1);
    assert!((category.missing_ratio - 1.0 / 11.0).abs() < 1e-12);

    assert_eq!(report.column("id").unwrap().missing_count, 0);
}

#[test]
fn test_row_missingness() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();

    assert_eq!(report.rows[7].missing_count, 1);
    assert!((report.rows[7].missing_ratio - 1.0 / 7.0).abs() < 1e-12);

    let elsewhere: usize = report
        .rows
        .iter()
        .filter(|r| r.row_index != 7)
        .map(|r| r.missing_count)
        .sum();
    assert_eq!(elsewhere, 0);
}

#[test]
fn test_missingness_cross_consistency() {
    for dataset in [sample_dataset(), issues_dataset()] {
        let report = Profiler::new().profile(&dataset).unwrap();
        let by_column: usize = report.columns.iter().map(|c| c.missing_count).sum();
        let by_row: usize = report.rows.iter().map(|r| r.missing_count).sum();
        assert_eq!(by_column, by_row);
        assert_eq!(by_column, report.dataset.missing_cell_count);
    }
}

#[test]
fn test_nan_counts_as_missing() {
    let report = issues_profiler().profile(&issues_dataset()).unwrap();

    // One null plus one NaN
    assert_eq!(report.column("a").unwrap().missing_count, 2);
    // All null
    let b = report.column("b").unwrap();
    assert_eq!(b.missing_count, 5);
    assert_eq!(b.missing_ratio, 1.0);
    // Inf is not missing
    assert_eq!(report.column("c").unwrap().missing_count, 0);
}

// ========== Duplicates ==========

#[test]
fn test_duplicate_column_detection() {
    let dataset = sample_dataset();
    let schema = dataset.schema();
    let batch = dataset.batches()[0].clone();

    // Append a copy of value1 on the right
    let mut fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    fields.push(Field::new("value1_dup", DataType::Float64, false));
    let mut arrays = batch.columns().to_vec();
    arrays.push(Arc::clone(&arrays[2]));
    let widened = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap();
    let widened = ArrowDataset::from_batch(widened).unwrap();

    let report = sample_profiler().profile(&widened).unwrap();
    assert_eq!(report.column("value1").unwrap().duplicate, Some(false));
    assert_eq!(report.column("value1_dup").unwrap().duplicate, Some(true));
    assert_eq!(report.duplicate_columns(), vec!["value1_dup"]);
    assert_eq!(report.dataset.duplicate_column_count, Some(1));
}

#[test]
fn test_duplicate_row_detection() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();

    // Only the last row repeats the one before it
    assert_eq!(report.rows[9].duplicate, Some(false));
    assert_eq!(report.rows[10].duplicate, Some(true));
    assert_eq!(report.duplicate_rows(), vec![10]);
    assert_eq!(report.dataset.duplicate_row_count, Some(1));
}

#[test]
fn test_duplicate_detection_idempotent() {
    let dataset = sample_dataset();
    let profiler = sample_profiler();

    let first = profiler.profile(&dataset).unwrap();
    let second = profiler.profile(&dataset).unwrap();

    let flags = |report: &ProfileReport| -> Vec<Option<bool>> {
        report.rows.iter().map(|r| r.duplicate).collect()
    };
    assert_eq!(flags(&first), flags(&second));
}

// ========== Numeric stats ==========

#[test]
fn test_numeric_stats_in_report() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();

    let value1 = report.column("value1").unwrap().numeric.as_ref().unwrap();
    assert_eq!(value1.finite_count, 11);
    assert!(value1.mean.unwrap() > 100.0); // pulled up by the outlier
    assert_eq!(value1.sparsity, Some(0.0));
    assert!(!value1.has_nan);
    assert!(!value1.has_inf);
    assert_eq!(value1.min, Some(9.8));
    assert_eq!(value1.max, Some(1000.0));

    // Non-numeric classes carry no numeric section
    assert!(report.column("category").unwrap().numeric.is_none());
    assert!(report.column("value2").unwrap().numeric.is_none());
    assert!(report.column("all_same").unwrap().numeric.is_none());
}

#[test]
fn test_numeric_stats_nan_inf() {
    let report = issues_profiler().profile(&issues_dataset()).unwrap();

    let a = report.column("a").unwrap().numeric.as_ref().unwrap();
    assert_eq!(a.finite_count, 3); // 1, 3, 5
    assert_eq!(a.mean, Some(3.0));
    assert!(a.has_nan);
    assert!(!a.has_inf);

    let c = report.column("c").unwrap().numeric.as_ref().unwrap();
    assert_eq!(c.finite_count, 3); // 1, 2, 5
    assert!((c.mean.unwrap() - 8.0 / 3.0).abs() < 1e-12);
    assert!(!c.has_nan);
    assert!(c.has_inf);
}

// ========== Outliers ==========

#[test]
fn test_outlier_stats_in_report() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();

    let value1 = report.column("value1").unwrap().outliers.as_ref().unwrap();
    // 50.3 and 1000.0 sit outside [Q1 - 1.5 IQR, Q3 + 1.5 IQR]
    assert_eq!(value1.outlier_count, 2);
    assert!(value1.flagged);

    let id = report.column("id").unwrap().outliers.as_ref().unwrap();
    assert_eq!(id.outlier_count, 0);
    assert!(!id.flagged);

    // Rows holding 50.3 and 1000.0
    assert!(report.rows[3].outliers.unwrap().flagged);
    assert!(report.rows[8].outliers.unwrap().flagged);
    assert!(!report.rows[0].outliers.unwrap().flagged);
    assert_eq!(report.dataset.outlier_count, Some(2));
    assert_eq!(report.dataset.rows_with_outliers, Some(2));
}

// ========== Categorical stats ==========

#[test]
fn test_categorical_stats_null_sentinel() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();

    let category = report
        .column("category")
        .unwrap()
        .categorical
        .as_ref()
        .unwrap();
    // A, B, C plus the null sentinel
    assert_eq!(category.level_count, 4);
    assert!(category.levels.contains(&"NULL".to_string()));
    // A and B tie at 4; lexicographic tie-break picks A
    assert_eq!(category.most_common_level.as_deref(), Some("A"));
    // Only NULL (frequency 1) is rare at threshold 1
    assert_eq!(category.rare_level_count, 1);
    assert!(category.flagged);
    assert_eq!(category.rare_levels, vec!["NULL".to_string()]);

    // The row holding the null carries the rare level
    assert!(report.rows[7].rare_levels.unwrap().flagged);
    assert_eq!(report.dataset.rows_with_rare_levels, Some(1));
    assert_eq!(report.dataset.columns_with_rare_levels, Some(1));
}

#[test]
fn test_categorical_stats_exclude_null() {
    let report = sample_profiler()
        .exclude_null_level(true)
        .profile(&sample_dataset())
        .unwrap();

    let category = report
        .column("category")
        .unwrap()
        .categorical
        .as_ref()
        .unwrap();
    assert_eq!(category.level_count, 3);
    assert!(!category.levels.contains(&"NULL".to_string()));
    assert_eq!(category.rare_level_count, 0);
    assert!(!category.flagged);

    assert!(!report.rows[7].rare_levels.unwrap().flagged);
}

#[test]
fn test_non_categorical_columns_have_no_section() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();
    assert!(report.column("id").unwrap().categorical.is_none());
    assert!(report.column("value1").unwrap().categorical.is_none());
    assert!(report.column("all_same").unwrap().categorical.is_none());
    assert!(report.column("date_col").unwrap().categorical.is_none());
}

// ========== Toggles ==========

#[test]
fn test_disable_duplicate_stats() {
    let report = sample_profiler()
        .with_duplicate_stats(false)
        .profile(&sample_dataset())
        .unwrap();

    assert!(report.columns.iter().all(|c| c.duplicate.is_none()));
    assert!(report.rows.iter().all(|r| r.duplicate.is_none()));
    assert!(report.dataset.duplicate_column_count.is_none());
    assert!(report.dataset.duplicate_row_count.is_none());
}

#[test]
fn test_disable_numeric_stats() {
    let report = sample_profiler()
        .with_numeric_stats(false)
        .profile(&sample_dataset())
        .unwrap();

    assert!(report.columns.iter().all(|c| c.numeric.is_none()));
    // Outlier stats are a separate toggle and still present
    assert!(report.column("value1").unwrap().outliers.is_some());
}

#[test]
fn test_disable_outlier_stats() {
    let report = sample_profiler()
        .with_outlier_stats(false)
        .profile(&sample_dataset())
        .unwrap();

    assert!(report.columns.iter().all(|c| c.outliers.is_none()));
    assert!(report.rows.iter().all(|r| r.outliers.is_none()));
    assert!(report.dataset.outlier_count.is_none());
    assert!(report.dataset.rows_with_outliers.is_none());
}

#[test]
fn test_disable_categorical_stats() {
    let report = sample_profiler()
        .with_categorical_stats(false)
        .profile(&sample_dataset())
        .unwrap();

    assert!(report.columns.iter().all(|c| c.categorical.is_none()));
    assert!(report.rows.iter().all(|r| r.rare_levels.is_none()));
    assert!(report.dataset.columns_with_rare_levels.is_none());
    assert!(report.dataset.rows_with_rare_levels.is_none());
}

#[test]
fn test_all_engines_disabled_still_classifies() {
    let report = sample_profiler()
        .with_duplicate_stats(false)
        .with_numeric_stats(false)
        .with_outlier_stats(false)
        .with_categorical_stats(false)
        .profile(&sample_dataset())
        .unwrap();

    // Classification and missingness always run
    assert_eq!(report.columns.len(), 7);
    assert_eq!(report.column("value1").unwrap().class, ColumnClass::Numeric);
    assert_eq!(report.column("category").unwrap().missing_count, 1);
    // The null in category still counts as an issue
    assert!(report.has_issues());
}

// ========== Assembly ==========

#[test]
fn test_multi_batch_profile_matches_single_batch() {
    let single = sample_dataset();
    let batch = single.batches()[0].clone();
    let split = ArrowDataset::new(vec![batch.slice(0, 4), batch.slice(4, 7)]).unwrap();

    let profiler = sample_profiler();
    let a = profiler.profile(&single).unwrap();
    let b = profiler.profile(&split).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_has_issues() {
    let report = sample_profiler().profile(&sample_dataset()).unwrap();
    assert!(report.has_issues());
}

#[test]
fn test_profiler_config_accessor() {
    let profiler = Profiler::new().rare_level_threshold(3).iqr_multiplier(3.0);
    assert_eq!(profiler.config().rare_level_threshold, 3);
    assert_eq!(profiler.config().iqr_multiplier, 3.0);

    let config = ProfileConfig {
        exclude_null_level: true,
        ..Default::default()
    };
    assert!(Profiler::with_config(config).config().exclude_null_level);
}
