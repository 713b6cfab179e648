//! End-to-end checks over small in-memory Bookshelf designs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use shelf_diagnostics::{DiagnosticSink, Severity};
use shelf_place::{
    Collection, EntityKind, IngestOptions, Ledger, PlaceError, Point, Session, Strategy,
};
use shelf_source::{FileKind, SourceDb};

fn ingest(files: &[(&str, &str)]) -> (Session, DiagnosticSink) {
    let mut db = SourceDb::new();
    for (name, text) in files {
        db.add_source(*name, text.to_string());
    }
    let sink = DiagnosticSink::new();
    let mut session = Session::new();
    session
        .ingest(&db, &IngestOptions::default(), &sink)
        .expect("ingest");
    (session, sink)
}

const ONE_ROW: &str = "\
UCLA scl 1.0
NumRows : 1

CoreRow Horizontal
  Coordinate    :  0
  Height        :  2
  Sitewidth     :  1
  Sitespacing   :  1
  Siteorient    :  1
  Sitesymmetry  :  1
  SubrowOrigin  :  0  NumSites  :  10
End
";

#[test]
fn two_squares_overlap_once() {
    let (session, sink) = ingest(&[
        ("t.nodes", "UCLA nodes 1.0\na 2 2\nb 2 2\n"),
        ("t.pl", "UCLA pl 1.0\na 0 0 : N\nb 1 0 : N\n"),
        ("t.scl", ONE_ROW),
        ("t.nets", "UCLA nets 1.0\nNetDegree : 2\na I\nb O\n"),
    ]);
    assert!(sink.diagnostics().is_empty());
    let report = session.legality_report(Ledger::Primary).unwrap();
    assert_eq!(report.overlaps, 1);
    assert_eq!(report.misaligned, 0);
    assert_eq!(report.out_of_bounds, 0);
}

#[test]
fn two_pin_net_has_hpwl_fifteen() {
    let (session, _) = ingest(&[
        ("t.nodes", "a 1 1\nb 1 1\n"),
        ("t.pl", "a 0 0\nb 10 5\n"),
        ("t.scl", ONE_ROW),
        ("t.nets", "NetDegree : 2\na I\nb O\n"),
    ]);
    assert_eq!(session.net_wirelength(Ledger::Primary, "n0").unwrap(), 15.0);
    assert_eq!(session.total_wirelength(Ledger::Primary).unwrap(), 15.0);
}

#[test]
fn first_fit_reports_node_that_does_not_fit() {
    let row6 = ONE_ROW.replace("NumSites  :  10", "NumSites : 6");
    let (session, _) = ingest(&[
        ("t.nodes", "a 3 1\nb 4 1\n"),
        ("t.pl", "a 0 0\nb 0 0\n"),
        ("t.scl", row6.as_str()),
        ("t.nets", ""),
    ]);
    let result = session.legalize(Strategy::FirstFitLeftPack);
    assert_eq!(result.placement.get("a"), Some(Point::new(0.0, 0.0)));
    assert_eq!(result.failures, vec!["b".to_string()]);

    let sink = DiagnosticSink::new();
    result.emit_diagnostics(&sink);
    assert_eq!(sink.count(Severity::Warning), 1);
}

#[test]
fn editing_absent_node_is_not_found() {
    let (mut session, _) = ingest(&[
        ("t.nodes", "a 1 1\n"),
        ("t.pl", "a 1 1\n"),
        ("t.scl", ONE_ROW),
        ("t.nets", ""),
    ]);
    let before = session.placement(Ledger::Primary).unwrap().clone();
    let err = session
        .edit_coordinate(Ledger::Primary, "nope", 0.0, 0.0)
        .unwrap_err();
    assert_eq!(
        err,
        PlaceError::NotFound {
            kind: EntityKind::Node,
            id: "nope".into()
        }
    );
    assert_eq!(session.placement(Ledger::Primary).unwrap(), &before);
}

#[test]
fn missing_rows_file_is_named() {
    let mut db = SourceDb::new();
    db.add_source("t.nodes", "a 1 1\n".to_string());
    db.add_source("t.pl", "a 0 0\n".to_string());
    db.add_source("t.nets", String::new());
    let err = Session::new()
        .ingest(&db, &IngestOptions::default(), &DiagnosticSink::new())
        .unwrap_err();
    assert_eq!(err, PlaceError::MissingInput(vec![FileKind::Scl]));
    assert!(err.to_string().contains(".scl"));
}

#[test]
fn reingest_replaces_everything_and_drops_trial() {
    let (mut session, _) = ingest(&[
        ("t.nodes", "a 1 1\nb 1 1\n"),
        ("t.pl", "a 0 0\nb 1 0\n"),
        ("t.scl", ONE_ROW),
        ("t.nets", "NetDegree : 2\na I\nb O\n"),
    ]);
    session
        .randomize_trial(&mut StdRng::seed_from_u64(5))
        .unwrap();
    assert!(session.placement(Ledger::Trial).is_ok());

    let mut db = SourceDb::new();
    db.add_source("u.nodes", "c 1 1\n".to_string());
    db.add_source("u.pl", "c 0 0\n".to_string());
    db.add_source("u.scl", ONE_ROW.to_string());
    db.add_source("u.nets", String::new());
    session
        .ingest(&db, &IngestOptions::default(), &DiagnosticSink::new())
        .unwrap();

    assert!(!session.design().nodes.contains("a"));
    assert_eq!(
        session.placement(Ledger::Trial),
        Err(PlaceError::NoData(Collection::Placement(Ledger::Trial)))
    );
    assert_eq!(
        session.total_wirelength(Ledger::Primary),
        Err(PlaceError::NoData(Collection::Nets))
    );
}

#[test]
fn trial_ledger_is_legal_in_bounds_and_editable() {
    let (mut session, _) = ingest(&[
        ("t.nodes", "a 2 2\nb 3 1\nc 1 1\np 1 1 terminal\n"),
        ("t.pl", "a 0 0\nb 0 0\nc 0 0\np 4 4 : N /FIXED\n"),
        ("t.scl", ONE_ROW),
        ("t.nets", "NetDegree : 3\na I\nb O\np I\n"),
    ]);
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        session.randomize_trial(&mut rng).unwrap();
        let report = session.legality_report(Ledger::Trial).unwrap();
        assert_eq!(report.out_of_bounds, 0);
    }
    let outcome = session
        .edit_coordinate(Ledger::Trial, "a", 0.0, 0.0)
        .unwrap();
    assert_eq!(outcome.affected.len(), 1);
    assert_eq!(
        session.node_coordinates(Ledger::Trial, "p").unwrap(),
        Point::new(4.0, 4.0)
    );
    // the primary ledger is untouched by trial edits
    assert_eq!(
        session.node_coordinates(Ledger::Primary, "a").unwrap(),
        Point::new(0.0, 0.0)
    );
}

#[test]
fn malformed_lines_are_warnings_not_errors() {
    let (session, sink) = ingest(&[
        ("t.nodes", "a 1 1\nb one 1\n"),
        ("t.pl", "a 0 0\nb\n"),
        ("t.scl", "CoreRow Horizontal\nCoordinate : 0\nEnd\n"),
        ("t.nets", "NetDegree : 2\na I\n"),
    ]);
    assert!(!sink.has_errors());
    let codes: Vec<String> = sink
        .diagnostics()
        .iter()
        .map(|d| d.code.to_string())
        .collect();
    assert_eq!(codes, vec!["P001", "P004", "P005", "P002"]);
    assert_eq!(session.design().nodes.len(), 1);
    assert_eq!(
        session.legality_report(Ledger::Primary),
        Err(PlaceError::NoData(Collection::Rows))
    );
}

#[test]
fn ingesting_same_batch_twice_is_deterministic() {
    let files = [
        ("t.nodes", "UCLA nodes 1.0\na 2 2\nb 3 1\np 1 1 terminal\n"),
        ("t.pl", "UCLA pl 1.0\nA 0 0 : N\nb 4 0 : N\np 9 9 : N /FIXED\n"),
        ("t.scl", ONE_ROW),
        ("t.nets", "NetDegree : 2\na I\nb O\nNetDegree : 2\nb I\np O\n"),
    ];
    let (first, first_sink) = ingest(&files);
    let (second, second_sink) = ingest(&files);
    assert_eq!(first.design(), second.design());
    assert_eq!(
        first.placement(Ledger::Primary).unwrap(),
        second.placement(Ledger::Primary).unwrap()
    );
    let rendered = |sink: &DiagnosticSink| -> Vec<String> {
        sink.diagnostics().iter().map(|d| format!("{d:?}")).collect()
    };
    assert_eq!(rendered(&first_sink), rendered(&second_sink));
}
