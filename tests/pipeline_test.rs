use anyhow::Result;
use dielectron_viz::data::filter::{filter_columns, iqr_filter};
use dielectron_viz::data::loader;
use dielectron_viz::pipeline::{self, PlotRequest};
use dielectron_viz::{ChartKind, Column, Table, UnitCatalog, VizError};
use tempfile::tempdir;

mod common;

fn request(kind: ChartKind, x: &str, y: Option<&str>) -> PlotRequest {
    PlotRequest {
        kind,
        x_column: x.to_string(),
        y_column: y.map(String::from),
    }
}

#[test]
fn test_full_run_histogram() -> Result<()> {
    let dir = tempdir()?;
    let path = common::dielectron_csv(&dir);

    let pair = pipeline::run(
        &path,
        &request(ChartKind::Histogram, "pt1", None),
        &UnitCatalog::dielectron(),
    )?;

    // One duplicate dropped, then the 240 GeV electron removed by the filter.
    assert_eq!(pair.raw.table.len(), 7);
    assert_eq!(pair.filtered.table.len(), 6);
    assert_eq!(pair.raw.instruction.x_label, "pt1 (GeV)");
    assert_eq!(pair.raw.instruction.title, "Distribution of pt1");
    assert_eq!(pair.filtered.instruction.title, "Distribution of pt1 (Filtered)");

    // The missing pt1 cell was imputed, so every row survives as a number.
    let pt1 = pair.raw.table.column("pt1").unwrap();
    assert_eq!(pt1.numbers_iter().count(), 7);
    Ok(())
}

#[test]
fn test_full_run_scatter_labels() -> Result<()> {
    let dir = tempdir()?;
    let path = common::dielectron_csv(&dir);

    let pair = pipeline::run(
        &path,
        &request(ChartKind::Scatter, "pt1", Some("pt2")),
        &UnitCatalog::dielectron(),
    )?;

    let raw = &pair.raw.instruction;
    assert_eq!(raw.title, "Scatter Plot of pt2 vs pt1");
    assert_eq!(raw.x_label, "pt1 (GeV)");
    assert_eq!(raw.y_label.as_deref(), Some("pt2 (GeV)"));
    assert!(pair.filtered.table.len() <= pair.raw.table.len());
    Ok(())
}

#[test]
fn test_scatter_without_y_fails() -> Result<()> {
    let dir = tempdir()?;
    let path = common::dielectron_csv(&dir);

    let err = pipeline::run(
        &path,
        &request(ChartKind::Scatter, "pt1", None),
        &UnitCatalog::dielectron(),
    )
    .unwrap_err();
    assert!(matches!(err, VizError::MissingColumn(ChartKind::Scatter)));
    Ok(())
}

#[test]
fn test_unknown_column_fails_with_name() -> Result<()> {
    let dir = tempdir()?;
    let path = common::dielectron_csv(&dir);

    let err = pipeline::run(
        &path,
        &request(ChartKind::Line, "pt1", Some("pt3")),
        &UnitCatalog::dielectron(),
    )
    .unwrap_err();
    assert!(matches!(&err, VizError::ColumnNotFound(c) if c == "pt3"));
    assert!(err.to_string().contains("pt3"));
    Ok(())
}

#[test]
fn test_missing_file_is_load_error() {
    let err = pipeline::run(
        std::path::Path::new("/definitely/not/here/dielectron.csv"),
        &request(ChartKind::Histogram, "M", None),
        &UnitCatalog::dielectron(),
    )
    .unwrap_err();
    assert!(matches!(err, VizError::Load(_)));
}

#[test]
fn test_header_only_file_is_load_error() -> Result<()> {
    let dir = tempdir()?;
    let path = common::write_file(&dir, "empty.csv", "E1,E2,M\n");
    assert!(matches!(loader::load(&path), Err(VizError::Load(_))));
    Ok(())
}

#[test]
fn test_loader_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    let path = common::dielectron_csv(&dir);

    let once = loader::load(&path)?;
    let twice = loader::clean(&once)?;
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_filter_order_is_x_then_y() -> Result<()> {
    // Removing the x outlier (row 4) tightens y's quartiles so that row 5
    // becomes a y outlier. Filtering y first keeps row 5.
    let dir = tempdir()?;
    let path = common::write_file(
        &dir,
        "order.csv",
        &common::csv_text(
            &["pt1", "pt2"],
            &[
                vec![1.0, 0.0],
                vec![2.0, 0.0],
                vec![3.0, 0.0],
                vec![4.0, 0.0],
                vec![1000.0, 5.0],
                vec![5.0, 5.0],
            ],
        ),
    );
    let table = loader::load(&path)?;

    let x_then_y = iqr_filter(&iqr_filter(&table, "pt1")?, "pt2")?;
    let y_then_x = iqr_filter(&iqr_filter(&table, "pt2")?, "pt1")?;
    assert_eq!(x_then_y.len(), 4);
    assert_eq!(y_then_x.len(), 5);

    let pair = pipeline::run(
        &path,
        &request(ChartKind::Scatter, "pt1", Some("pt2")),
        &UnitCatalog::dielectron(),
    )?;
    assert_eq!(pair.filtered.table, x_then_y);
    Ok(())
}

#[test]
fn test_filter_keeps_median_and_never_grows() -> Result<()> {
    let columns: Vec<Column> = [(7u64, 1.0), (13, 250.0), (29, -3.5)]
        .iter()
        .map(|&(step, scale)| {
            let mut values: Vec<f64> = (0..101u64)
                .map(|i| ((i * step) % 101) as f64 * scale)
                .collect();
            values[17] = 1e9;
            values[60] = -1e9;
            Column::numbers(format!("c{step}"), &values)
        })
        .collect();
    let table = Table::new(columns)?;

    for column in table.columns() {
        let mut sorted: Vec<f64> = column.numbers_iter().collect();
        sorted.sort_by(f64::total_cmp);
        let median = sorted[sorted.len() / 2];

        let filtered = iqr_filter(&table, &column.name)?;
        assert!(filtered.len() <= table.len());
        assert!(filtered.len() < table.len(), "far outliers should be removed");
        let kept = filtered.column(&column.name).unwrap();
        assert!(kept.numbers_iter().any(|v| v == median));
    }
    Ok(())
}

#[test]
fn test_zero_variance_column_keeps_only_constant() -> Result<()> {
    let mut charges = vec![1.0; 9];
    charges.push(-1.0);
    let table = Table::new(vec![
        Column::numbers("Q1", &charges),
        Column::numbers("E1", &(0..10).map(f64::from).collect::<Vec<_>>()),
    ])?;

    let filtered = filter_columns(&table, &["Q1"])?;
    assert_eq!(filtered.len(), 9);
    assert!(filtered.column("Q1").unwrap().numbers_iter().all(|q| q == 1.0));
    Ok(())
}

#[test]
fn test_filter_leaves_input_untouched() -> Result<()> {
    let table = Table::new(vec![Column::numbers("M", &[1.0, 2.0, 3.0, 4.0, 500.0])])?;
    let before = table.clone();
    let filtered = iqr_filter(&table, "M")?;
    assert_eq!(table, before);
    assert_eq!(filtered.len(), 4);
    Ok(())
}
