use std::fs;

use freight_cost_optimizer::{
    domain::{process_batch, quote, BatchOutcome, Constraint, Goal, RateRecord, TransportMode},
    infra::{
        export::BATCH_FILE_NAME, load_rate_file, parse_batch_requests, write_batch_table,
        write_charts, write_results_table, ChartKind,
    },
};

fn records() -> Vec<RateRecord> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/freight_rates.csv");
    load_rate_file(path).unwrap()
}

#[test]
fn results_table_and_charts_land_in_the_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/output");
    let results = quote(&records(), "Shanghai", "Los Angeles", 1000.5);

    let table = write_results_table(&results, &out, "Shanghai", "Los Angeles", 1000.5).unwrap();
    assert_eq!(
        table.file_name().unwrap(),
        "recommendations_Shanghai_Los_Angeles_1000kg.csv"
    );
    let text = fs::read_to_string(&table).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("origin,destination,mode"));
    assert!(lines[1].contains(",sea,"));

    let charts = write_charts(&results, &out).unwrap();
    assert_eq!(charts.len(), ChartKind::ALL.len());
    for (path, kind) in charts.iter().zip(ChartKind::ALL) {
        assert_eq!(path.file_name().unwrap(), kind.file_name());
        assert!(fs::read_to_string(path).unwrap().contains(kind.title()));
    }
}

#[test]
fn batch_survives_bad_rows_and_is_exported() {
    let requests = parse_batch_requests(
        "origin,destination,weight\n\
         Shanghai,Los Angeles,1000kg\n\
         Atlantis,Nowhere,10\n\
         Hamburg,New York,abc\n\
         Chicago,Los Angeles,2204.62 lbs\n",
    )
    .unwrap();
    let rows = process_batch(&records(), &requests, Goal::Fastest, Constraint::unbounded());

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].best().map(|r| r.mode()), Some(TransportMode::Air));
    assert_eq!(rows[1].outcome, BatchOutcome::NoValidRoute);
    assert!(matches!(rows[2].outcome, BatchOutcome::InvalidWeight(_)));
    assert!(rows[3].is_routed());

    let dir = tempfile::tempdir().unwrap();
    let path = write_batch_table(&rows, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), BATCH_FILE_NAME);
    let text = fs::read_to_string(path).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert!(text.contains("Atlantis,Nowhere,10,N/A,No valid route"));
}

#[test]
fn blank_origin_row_does_not_sink_its_neighbours() {
    let requests = parse_batch_requests(
        "origin,destination,weight\n\
         Shanghai,Los Angeles,1000kg\n\
         ,Los Angeles,500kg\n\
         Hamburg,New York,200kg\n",
    )
    .unwrap();
    let rows = process_batch(&records(), &requests, Goal::Cheapest, Constraint::unbounded());

    assert_eq!(rows.len(), 3);
    assert!(rows[0].is_routed());
    assert_eq!(rows[1].outcome, BatchOutcome::NoValidRoute);
    assert_eq!(rows[1].request.origin, "");
    assert!(rows[2].is_routed());
}
