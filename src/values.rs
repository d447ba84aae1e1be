//! Column cell materialization.
//!
//! Collects an [`ArrowDataset`] into per-column cell vectors the profiling
//! engines share, so the dataset is scanned exactly once. Numeric values
//! stay numeric (NaN and Inf preserved); everything else is canonicalized
//! to text.

use arrow::{
    array::{
        Array, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
        Int8Array, LargeStringArray, StringArray, UInt16Array, UInt32Array, UInt64Array,
        UInt8Array,
    },
    datatypes::DataType,
    util::display::array_value_to_string,
};

use crate::{
    dataset::{ArrowDataset, Dataset},
    error::Result,
};

/// A single materialized cell value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    /// Null entry.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating value, possibly NaN or infinite.
    Float(f64),
    /// Text value, also used as the canonical form for temporal and
    /// otherwise unhandled storage types.
    Text(String),
}

impl Cell {
    /// True for null entries and floating NaN. Both count as missing:
    /// NaN is never treated as a valid numeric value at this layer.
    pub(crate) fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// True for null entries only (NaN is a value here, not a null).
    pub(crate) fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the cell. NaN and Inf pass through; callers filter
    /// with `is_finite` where the statistic base requires it.
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Canonical text form of a non-null cell, or `None` for null.
    ///
    /// Used for distinct counting, level frequencies, and duplicate
    /// signatures, so it must be deterministic per value.
    pub(crate) fn text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(canonical_float(*f)),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

/// Canonical text for a float, with one spelling per special value.
fn canonical_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        f.to_string()
    }
}

/// One fully materialized column.
#[derive(Debug, Clone)]
pub(crate) struct ColumnData {
    /// Column name from the schema.
    pub(crate) name: String,
    /// Arrow storage type.
    pub(crate) data_type: DataType,
    /// All cells in row order, across batches.
    pub(crate) cells: Vec<Cell>,
}

/// Collects every column of the dataset into cell vectors, in schema
/// order, concatenated across batches in batch order.
pub(crate) fn collect_columns(dataset: &ArrowDataset) -> Result<Vec<ColumnData>> {
    let schema = dataset.schema();
    let row_count = dataset.len();

    let mut columns: Vec<ColumnData> = schema
        .fields()
        .iter()
        .map(|field| ColumnData {
            name: field.name().clone(),
            data_type: field.data_type().clone(),
            cells: Vec::with_capacity(row_count),
        })
        .collect();

    for batch in dataset.iter() {
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let array = batch.column(col_idx);
            append_cells(&mut column.cells, array.as_ref(), &column.data_type)?;
        }
    }

    Ok(columns)
}

/// Appends every value of `array` to `cells`.
fn append_cells(cells: &mut Vec<Cell>, array: &dyn Array, data_type: &DataType) -> Result<()> {
    for i in 0..array.len() {
        if array.is_null(i) {
            cells.push(Cell::Null);
        } else {
            cells.push(cell_at(array, i, data_type)?);
        }
    }
    Ok(())
}

/// Materializes the non-null value at `idx`.
#[allow(clippy::cast_lossless, clippy::cast_possible_wrap)]
fn cell_at(array: &dyn Array, idx: usize, data_type: &DataType) -> Result<Cell> {
    let any = array.as_any();

    let cell = if let Some(arr) = any.downcast_ref::<BooleanArray>() {
        Cell::Bool(arr.value(idx))
    } else if let Some(arr) = any.downcast_ref::<Int8Array>() {
        Cell::Int(arr.value(idx) as i64)
    } else if let Some(arr) = any.downcast_ref::<Int16Array>() {
        Cell::Int(arr.value(idx) as i64)
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Cell::Int(arr.value(idx) as i64)
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Cell::Int(arr.value(idx))
    } else if let Some(arr) = any.downcast_ref::<UInt8Array>() {
        Cell::Int(arr.value(idx) as i64)
    } else if let Some(arr) = any.downcast_ref::<UInt16Array>() {
        Cell::Int(arr.value(idx) as i64)
    } else if let Some(arr) = any.downcast_ref::<UInt32Array>() {
        Cell::Int(arr.value(idx) as i64)
    } else if let Some(arr) = any.downcast_ref::<UInt64Array>() {
        Cell::Int(arr.value(idx) as i64)
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Cell::Float(arr.value(idx) as f64)
    } else if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Cell::Float(arr.value(idx))
    } else if let Some(arr) = any.downcast_ref::<StringArray>() {
        Cell::Text(arr.value(idx).to_string())
    } else if let Some(arr) = any.downcast_ref::<LargeStringArray>() {
        Cell::Text(arr.value(idx).to_string())
    } else {
        // Temporal and exotic types go through Arrow's display path. When
        // the storage type is numeric (Decimal and friends) the rendered
        // value must stay numeric for the stats engines.
        let rendered = array_value_to_string(array, idx)?;
        if data_type.is_numeric() {
            match rendered.parse::<f64>() {
                Ok(f) => Cell::Float(f),
                Err(_) => Cell::Text(rendered),
            }
        } else {
            Cell::Text(rendered)
        }
    };

    Ok(cell)
}
