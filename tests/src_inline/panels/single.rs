use super::*;

fn hm() -> IntervalConfig {
    IntervalConfig::hanley_mcneil(0.95)
}

fn records() -> Vec<ScoreRecord> {
    let mut out = Vec::new();
    for (group, scores) in [
        ("G1", [0.1, 0.4, 0.35, 0.8]),
        ("G2", [0.1, 0.2, 0.7, 0.9]),
        ("G3", [0.6, 0.5, 0.3, 0.2]),
        ("G4", [0.3, 0.6, 0.5, 0.9]),
    ] {
        for (i, s) in scores.into_iter().enumerate() {
            out.push(ScoreRecord::new(group, i >= 2, s));
        }
    }
    out
}

#[test]
fn test_one_facet_per_group_row_major() {
    let config = PanelConfig {
        interval: hm(),
        ..PanelConfig::default()
    };
    let panel = render_panel(&records(), None, &config).unwrap();
    assert_eq!(panel.kind, PanelKind::Faceted);
    assert_eq!(panel.facets.len(), 4);
    assert_eq!((panel.layout.rows, panel.layout.columns), (2, 3));
    assert_eq!(panel.layout.figure_size(), (15.0, 10.0));
    let cells: Vec<(usize, usize)> = panel.facets.iter().map(|f| (f.row, f.col)).collect();
    assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 0)]);
    assert_eq!(panel.empty_cells(), 2);
    assert_eq!(panel.title, "ROC Curve Panels");
    assert_eq!(panel.title_font_size, 24.0);
    assert_eq!(panel.facets[0].title, "G1");
    assert_eq!(panel.facets[0].title_font_size, 20.0);
}

#[test]
fn test_requested_subset_and_order() {
    let config = PanelConfig {
        interval: hm(),
        colors: vec![Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)],
        ..PanelConfig::default()
    };
    let keys = vec!["G3".to_string(), "G1".to_string()];
    let panel = render_panel(&records(), Some(&keys), &config).unwrap();
    assert_eq!(panel.groups(), vec!["G3", "G1"]);
    assert_eq!(panel.trace("G3").unwrap().color, Color::rgb(255, 0, 0));
    assert_eq!(panel.trace("G3").unwrap().auc.point_estimate, 0.0);
    assert!((panel.trace("G1").unwrap().auc.point_estimate - 0.75).abs() < 1e-12);
}

#[test]
fn test_legend_label_and_fonts() {
    let config = PanelConfig {
        interval: hm(),
        ..PanelConfig::default()
    };
    let panel = render_panel(&records(), None, &config).unwrap();
    let legend = panel.facets[1].legend.as_ref().unwrap();
    assert_eq!(legend.title, "AUC");
    assert_eq!(legend.position, AnnotationPosition::LowerRight);
    assert_eq!(legend.font_size, 14.0);
    assert_eq!(legend.title_font_size, 16.0);
    assert!(legend.entries[0].label.starts_with("AUC = 1.00 (95% CI "));

    let quiet = PanelConfig {
        annotate: false,
        ..config
    };
    let panel = render_panel(&records(), None, &quiet).unwrap();
    assert!(panel.facets.iter().all(|f| f.legend.is_none()));
}

#[test]
fn test_format_auc_label_precision() {
    let auc = AucResult {
        point_estimate: 0.8734,
        ci_low: 0.80123,
        ci_high: 0.93,
        confidence: 0.95,
        std_error: 0.03,
    };
    assert_eq!(format_auc_label(&auc, 2), "AUC = 0.87 (95% CI 0.80-0.93)");
    assert_eq!(format_auc_label(&auc, 3), "AUC = 0.873 (95% CI 0.801-0.930)");
}

#[test]
fn test_config_validated_before_estimation() {
    let bad = [
        PanelConfig {
            columns: 0,
            ..PanelConfig::default()
        },
        PanelConfig {
            colors: vec![Color::rgb(0, 0, 0)],
            ..PanelConfig::default()
        },
        PanelConfig {
            precision: 12,
            ..PanelConfig::default()
        },
        PanelConfig {
            interval: IntervalConfig::hanley_mcneil(1.0),
            ..PanelConfig::default()
        },
        PanelConfig {
            panel_size: (0.0, 5.0),
            ..PanelConfig::default()
        },
        PanelConfig {
            panel_size: (5.0, -1.0),
            ..PanelConfig::default()
        },
        PanelConfig {
            title_font: Some(0.0),
            ..PanelConfig::default()
        },
    ];
    for config in bad {
        assert!(matches!(
            render_panel(&records(), None, &config),
            Err(RocError::Configuration(_))
        ));
    }
}

#[test]
fn test_single_class_group_fails_with_name() {
    let mut recs = records();
    recs.push(ScoreRecord::new("Only", true, 0.3));
    let err = render_panel(&recs, None, &PanelConfig::default()).unwrap_err();
    match err {
        RocError::DegenerateInput { group, .. } => assert_eq!(group.as_deref(), Some("Only")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_partial_style_json() {
    let config: PanelConfig =
        serde_json::from_str(r##"{"columns": 2, "colors": ["#E64B35"], "annotate": false}"##)
            .unwrap();
    assert_eq!(config.columns, 2);
    assert_eq!(config.colors, vec![Color::rgb(0xE6, 0x4B, 0x35)]);
    assert!(!config.annotate);
    assert_eq!(config.base_font, 20.0);
}
