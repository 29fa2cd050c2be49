use super::*;

fn parse_run(extra: &[&str]) -> RunArgs {
    let mut argv = vec!["kira-roc", "run", "--input", "scores.tsv", "--out", "out"];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Run(args) => args,
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn test_run_defaults() {
    let args = parse_run(&[]);
    assert_eq!(args.mode, Mode::Panels);
    assert_eq!(args.group_col, "Dataset");
    assert_eq!(args.truth_col, "true");
    assert_eq!(args.score_col, "score");
    assert!(args.groups.is_empty());
    assert!(args.compose_by.is_none());

    let interval = interval_config(IntervalConfig::default(), &args);
    assert_eq!(interval, IntervalConfig::default());
}

#[test]
fn test_run_lists_and_colors() {
    let args = parse_run(&[
        "--mode",
        "overlay",
        "--groups",
        "A,B",
        "--colors",
        "#E64B35,#1C97CC",
    ]);
    assert_eq!(args.mode, Mode::Overlay);
    assert_eq!(args.groups, vec!["A", "B"]);
    assert_eq!(args.colors[0].to_hex(), "#E64B35");

    let config = overlay_config(OverlayConfig::default(), &args);
    assert_eq!(config.colors.len(), 2);
}

#[test]
fn test_bad_color_rejected_at_parse() {
    let argv = [
        "kira-roc", "run", "--input", "x", "--out", "y", "--colors", "#GGGGGG",
    ];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn test_interval_overrides() {
    let args = parse_run(&["--ci-method", "hanley-mcneil", "--confidence", "0.9"]);
    let interval = interval_config(IntervalConfig::default(), &args);
    assert_eq!(interval.method, CiMethod::HanleyMcNeil);
    assert_eq!(interval.confidence, 0.9);

    let args = parse_run(&["--resamples", "500", "--seed", "7"]);
    let interval = interval_config(IntervalConfig::default(), &args);
    assert_eq!(
        interval.method,
        CiMethod::Bootstrap {
            resamples: 500,
            seed: 7
        }
    );

    let args = parse_run(&["--ci-method", "bootstrap"]);
    let interval = interval_config(IntervalConfig::hanley_mcneil(0.95), &args);
    assert_eq!(
        interval.method,
        CiMethod::Bootstrap {
            resamples: DEFAULT_RESAMPLES,
            seed: DEFAULT_SEED
        }
    );
}

#[test]
fn test_ncol_targets_facets_unless_composing() {
    let args = parse_run(&["--ncol", "2"]);
    assert_eq!(panel_config(PanelConfig::default(), &args).columns, 2);

    let args = parse_run(&["--ncol", "2", "--compose-by", "Batch"]);
    assert_eq!(panel_config(PanelConfig::default(), &args).columns, 3);
}

#[test]
fn test_style_file_partial() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("style.json");
    std::fs::write(&path, r#"{"panel": {"base_font": 14, "columns": 2}}"#).unwrap();
    let style = load_style(Some(path.as_path())).unwrap();
    assert_eq!(style.panel.base_font, 14.0);
    assert_eq!(style.panel.columns, 2);
    assert_eq!(style.panel.line_width, PanelConfig::default().line_width);
    assert_eq!(style.overlay, OverlayConfig::default());
}

#[test]
fn test_demo_defaults() {
    let cli = Cli::try_parse_from(["kira-roc", "demo", "--out", "d"]).unwrap();
    match cli.command {
        Command::Demo(args) => {
            assert_eq!(args.n, 300);
            assert_eq!(args.seed, 2025);
        }
        other => panic!("expected demo, got {other:?}"),
    }
}
