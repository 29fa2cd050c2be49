use super::*;

fn records() -> Vec<ScoreRecord> {
    vec![
        ScoreRecord::new("B", false, 0.1),
        ScoreRecord::new("B", true, 0.8),
        ScoreRecord::new("A", false, 0.3),
        ScoreRecord::new("A", true, 0.4),
    ]
}

#[test]
fn test_grid_layout_rows_and_cells() {
    let layout = GridLayout::for_count(7, 3, (5.0, 5.0));
    assert_eq!(layout.rows, 3);
    assert_eq!(layout.figure_size(), (15.0, 15.0));
    assert_eq!(layout.cell(0), (0, 0));
    assert_eq!(layout.cell(4), (1, 1));
    assert_eq!(layout.cell(6), (2, 0));

    let wide = GridLayout::for_count(2, 4, (4.0, 3.0));
    assert_eq!(wide.rows, 1);
    assert_eq!(wide.figure_size(), (16.0, 3.0));
}

#[test]
fn test_group_keys_default_to_first_appearance() {
    assert_eq!(resolve_group_keys(&records(), None).unwrap(), vec!["B", "A"]);
    let requested = vec!["A".to_string()];
    assert_eq!(
        resolve_group_keys(&records(), Some(&requested)).unwrap(),
        vec!["A"]
    );
}

#[test]
fn test_missing_requested_group_is_reported() {
    let requested = vec!["A".to_string(), "Q".to_string(), "R".to_string()];
    match resolve_group_keys(&records(), Some(&requested)) {
        Err(RocError::EmptyGroup { group, column }) => {
            assert_eq!(group, "Q");
            assert_eq!(column, RECORD_GROUP_COLUMN);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(
        resolve_group_keys(&[], None),
        Err(RocError::Configuration(_))
    ));
}

#[test]
fn test_colors_positional_or_palette() {
    let explicit = vec![Color::rgb(1, 2, 3), Color::rgb(4, 5, 6)];
    assert_eq!(resolve_colors(&explicit, 2).unwrap(), explicit);
    assert_eq!(resolve_colors(&[], 4).unwrap().len(), 4);
    assert!(matches!(
        resolve_colors(&explicit, 3),
        Err(RocError::Configuration(_))
    ));
}

#[test]
fn test_estimate_group_attaches_key() {
    let mut recs = records();
    recs.push(ScoreRecord::new("C", true, 0.5));
    let err = estimate_group(&recs, "C", &IntervalConfig::default()).unwrap_err();
    match err {
        RocError::DegenerateInput { group, .. } => assert_eq!(group.as_deref(), Some("C")),
        other => panic!("unexpected {other:?}"),
    }
    let message = estimate_group(&recs, "C", &IntervalConfig::hanley_mcneil(0.95))
        .unwrap_err()
        .to_string();
    assert!(message.contains("group `C`"), "{message}");
}

#[test]
fn test_legend_font_has_floor() {
    assert_eq!(legend_font(20.0, -6.0), 14.0);
    assert_eq!(legend_font(8.0, -7.0), 6.0);
}

#[test]
fn test_panel_helpers() {
    let config = PanelConfig {
        interval: IntervalConfig::hanley_mcneil(0.95),
        columns: 3,
        ..PanelConfig::default()
    };
    let panel = render_panel(&records(), None, &config).unwrap();
    assert_eq!(panel.groups(), vec!["B", "A"]);
    assert_eq!(panel.empty_cells(), 1);
    assert_eq!(panel.trace("A").unwrap().auc.point_estimate, 1.0);
    assert!(panel.trace("Z").is_none());
}
