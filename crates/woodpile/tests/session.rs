use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use woodpile::core::ScalingError;
use woodpile::grid::ResolverMode;
use woodpile::session::{evaluate_taps, SessionConfig, SessionError, TapInput};
use woodpile::{GridDescription, Rect, RuleTable, ScalingInfo, TagKind};

fn testdata_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../testdata")
}

fn tap(x: f32, y: f32, tag: TagKind) -> TapInput {
    TapInput { x, y, tag }
}

#[test]
fn explicit_session_prices_registered_tags() {
    let dir = testdata_dir();
    let cfg = SessionConfig::load_json(dir.join("session_explicit.json")).unwrap();
    let report = cfg.run(&dir).unwrap();

    assert_eq!(report.mode, ResolverMode::ExplicitLines);
    assert_eq!(report.tagged_points.len(), 4);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.skipped_taps, 1);

    let summary = &report.summary;
    assert_eq!(summary.lines.len(), 2);
    let branch = summary.line("P03").unwrap();
    assert_eq!((branch.quantity, branch.subtotal), (2.0, 10.0));
    let leaf = summary.line("P43").unwrap();
    assert_eq!((leaf.quantity, leaf.subtotal), (1.0, 3.0));
    assert_relative_eq!(summary.total, 13.0);

    // cell (0, 0) spans (50, 25)-(150, 100) on the 600 px wide display
    let first = report.tagged_points[0];
    assert_eq!((first.cell.row, first.cell.col), (0, 0));
    assert_eq!(first.cell.rect, Rect::new(50.0, 25.0, 150.0, 100.0));
    assert_relative_eq!(first.percent_offset.x, 0.5);
    assert_relative_eq!(first.percent_offset.y, 1.0 / 3.0);
}

#[test]
fn crop_relative_taps_use_the_crop_grid() {
    let dir = testdata_dir();
    let grid = GridDescription::load_json(dir.join("woodpile_grid.json")).unwrap();
    let rules = RuleTable::load_json(dir.join("penalty_rules.json")).unwrap();
    let scaling = ScalingInfo::identity(1200, 900).unwrap();
    // 5 x 5 lines over a 500 x 500 crop -> 100 px cells
    let crop = Rect::new(200.0, 200.0, 700.0, 700.0);

    let taps = [
        tap(250.0, 250.0, TagKind::Branch),
        tap(299.0, 299.0, TagKind::Branch),
        tap(700.0, 700.0, TagKind::Branch),
        tap(150.0, 250.0, TagKind::Leaf),
        tap(650.0, 250.0, TagKind::Soil),
    ];
    let report = evaluate_taps(
        &grid,
        scaling,
        &rules,
        ResolverMode::CropRelative,
        Some(&crop),
        &taps,
        200.0,
    );

    assert_eq!(report.duplicates, 1);
    assert_eq!(report.skipped_taps, 1);
    let cells: Vec<(usize, usize)> = report
        .tagged_points
        .iter()
        .map(|p| (p.cell.row, p.cell.col))
        .collect();
    assert_eq!(cells, vec![(0, 0), (4, 4), (0, 4)]);

    // two branches at 5 each plus soil at 2.5% of 200
    assert_relative_eq!(report.summary.total, 15.0);
}

#[test]
fn invalid_explicit_scaling_is_rejected() {
    let dir = testdata_dir();
    let tmp = tempfile::tempdir().unwrap();
    let session = tmp.path().join("session.json");
    let raw = serde_json::json!({
        "grid_path": dir.join("woodpile_grid.json"),
        "rules_path": dir.join("penalty_rules.json"),
        "scaling": {
            "scale_x": -2.0,
            "scale_y": 0.0,
            "original_width": 0,
            "original_height": 0
        },
        "taps": [{ "x": 300.0, "y": 200.0, "tag": "branch" }]
    });
    std::fs::write(&session, raw.to_string()).unwrap();

    let cfg = SessionConfig::load_json(&session).unwrap();
    let err = cfg.run(tmp.path()).unwrap_err();
    assert!(
        matches!(
            err,
            SessionError::Scaling(ScalingError::InvalidOriginalSize { width: 0, height: 0 })
        ),
        "{err}"
    );
}

#[test]
fn all_ignored_session_totals_positive_zero() {
    let dir = testdata_dir();
    let grid = GridDescription::load_json(dir.join("woodpile_grid.json")).unwrap();
    let rules = RuleTable::load_json(dir.join("penalty_rules.json")).unwrap();
    let scaling = ScalingInfo::identity(1200, 900).unwrap();

    let taps = [tap(300.0, 200.0, TagKind::Ignored)];
    let report = evaluate_taps(
        &grid,
        scaling,
        &rules,
        ResolverMode::ExplicitLines,
        None,
        &taps,
        0.0,
    );
    assert_eq!(report.tagged_points.len(), 1);
    assert!(report.summary.is_empty());
    assert_eq!(report.summary.total.to_bits(), 0.0f64.to_bits());
}
