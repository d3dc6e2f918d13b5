//! Line-chart series over a table's numeric columns.
//!
//! The chart stage is a read-only view: it extracts up to [`MAX_SERIES`] numeric columns as
//! `(row index, value)` series for a renderer to draw. No drawing happens here.

use serde::Serialize;

use crate::error::{SweepError, SweepResult};
use crate::types::Table;

/// Upper bound on plotted columns.
pub const MAX_SERIES: usize = 2;

/// One plottable series: a numeric column's values against row index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Source column name.
    pub name: String,
    /// `(row index, value)` pairs; missing cells are omitted, leaving gaps.
    pub points: Vec<(usize, f64)>,
}

/// A line-chart dataset extracted from a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    /// Row count of the source table (the x-axis domain).
    pub row_count: usize,
    /// Up to [`MAX_SERIES`] series.
    pub series: Vec<ChartSeries>,
}

impl LineChart {
    /// Build a line chart over `table`.
    ///
    /// With `selection: None`, the first [`MAX_SERIES`] numeric columns are plotted. An
    /// explicit selection is restricted to the table's numeric columns and capped at
    /// [`MAX_SERIES`], keeping the requested order.
    ///
    /// Fails with [`SweepError::EmptyNumericDomain`] when no numeric column is available
    /// to plot; callers treat that as a warning, not a pipeline failure.
    pub fn build(table: &Table, selection: Option<&[&str]>) -> SweepResult<LineChart> {
        let numeric = table.numeric_column_names();

        let chosen: Vec<&str> = match selection {
            None => numeric.iter().copied().take(MAX_SERIES).collect(),
            Some(requested) => requested
                .iter()
                .copied()
                .filter(|name| numeric.contains(name))
                .take(MAX_SERIES)
                .collect(),
        };
        if chosen.is_empty() {
            return Err(SweepError::EmptyNumericDomain);
        }

        let series = chosen
            .into_iter()
            .filter_map(|name| table.schema.index_of(name).map(|idx| (name, idx)))
            .map(|(name, idx)| ChartSeries {
                name: name.to_string(),
                points: table
                    .rows
                    .iter()
                    .enumerate()
                    .filter_map(|(row, cells)| cells[idx].as_f64().map(|v| (row, v)))
                    .collect(),
            })
            .collect();

        Ok(LineChart {
            row_count: table.row_count(),
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{LineChart, MAX_SERIES};
    use crate::error::SweepError;
    use crate::types::{DataType, Field, Schema, Table, Value};

    fn sample_table() -> Table {
        let schema = Schema::new(vec![
            Field::new("name", DataType::Utf8),
            Field::new("score", DataType::Float64),
            Field::new("age", DataType::Int64),
            Field::new("height", DataType::Float64),
        ]);
        let rows = vec![
            vec![
                Value::Utf8("a".to_string()),
                Value::Float64(10.0),
                Value::Int64(30),
                Value::Float64(1.8),
            ],
            vec![
                Value::Utf8("b".to_string()),
                Value::Null,
                Value::Int64(40),
                Value::Float64(1.7),
            ],
        ];
        Table::new(schema, rows)
    }

    #[test]
    fn default_selection_takes_first_two_numeric_columns() {
        let chart = LineChart::build(&sample_table(), None).unwrap();
        assert_eq!(chart.series.len(), MAX_SERIES);
        assert_eq!(chart.series[0].name, "score");
        assert_eq!(chart.series[1].name, "age");
        assert_eq!(chart.row_count, 2);
    }

    #[test]
    fn missing_cells_leave_gaps() {
        let chart = LineChart::build(&sample_table(), None).unwrap();
        assert_eq!(chart.series[0].points, vec![(0, 10.0)]);
        assert_eq!(chart.series[1].points, vec![(0, 30.0), (1, 40.0)]);
    }

    #[test]
    fn explicit_selection_keeps_requested_order_and_skips_non_numeric() {
        let chart =
            LineChart::build(&sample_table(), Some(&["height", "name", "score"])).unwrap();
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "height");
        assert_eq!(chart.series[1].name, "score");
    }

    #[test]
    fn table_without_numeric_columns_reports_empty_domain() {
        let schema = Schema::new(vec![Field::new("name", DataType::Utf8)]);
        let table = Table::new(schema, vec![vec![Value::Utf8("a".to_string())]]);

        let err = LineChart::build(&table, None).unwrap_err();
        assert!(matches!(err, SweepError::EmptyNumericDomain));
    }

    #[test]
    fn selection_of_only_text_columns_reports_empty_domain() {
        let err = LineChart::build(&sample_table(), Some(&["name"])).unwrap_err();
        assert!(matches!(err, SweepError::EmptyNumericDomain));
    }
}
