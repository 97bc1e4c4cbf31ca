use eps_chart::data_types::ShapeKind;
use eps_chart::directive::parse_str;

#[test]
fn test_full_directive_file() {
    let input = "\
# benchmark comparison
Title = 'Execution Time'
XLabel = 'Benchmark'
YLabel = 'Cycles'
XTics = 'gcc' 'mcf' \"twolf\"
Key = 'base' 'opt'
KeyColumns = 1
PlotWidth = 400
PlotHeight = 200
Rotate = 30
Group = 0 1 'int'
Confidence = 0 0 0.5 1.5
Baseline = 0 1.0 'ref'

1.0 2.0
3.0 4.0
5.0 6.0
";
    let (config, data) = parse_str(input).unwrap();
    assert_eq!(config.title, "Execution Time");
    assert_eq!(config.x_label, "Benchmark");
    assert_eq!(config.y_label, "Cycles");
    assert_eq!(config.x_tics, vec!["gcc", "mcf", "twolf"]);
    assert_eq!(config.key, vec!["base", "opt"]);
    assert_eq!(config.key_columns, 1);
    assert_eq!(config.plot_width, 400.0);
    assert_eq!(config.plot_height, 200.0);
    assert_eq!(config.rotate, 30);
    assert_eq!(config.groups.len(), 1);
    assert_eq!(config.confidence.len(), 1);
    assert_eq!(config.baselines[0].label, "ref");
    assert_eq!(data.block_count(), 3);
    assert_eq!(data.bar_count(), 2);
    assert_eq!(data.value(2, 1), 6.0);
}

#[test]
fn test_unknown_key_is_fatal() {
    let result = parse_str("Bogus = 1\n1 2\n");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not recognized"));
}

#[test]
fn test_boolean_values_case_insensitive() {
    let (config, _) = parse_str("BreakBars = FALSE\nOverlap = True\n1 2\n").unwrap();
    assert!(!config.break_bars);
    assert!(config.overlap);

    let result = parse_str("BreakBars = maybe\n1 2\n");
    assert!(result.is_err());
}

#[test]
fn test_yrange_validation() {
    let (config, _) = parse_str("YRange = -1 9\n1 2\n").unwrap();
    assert_eq!(config.y_range, Some((-1.0, 9.0)));

    assert!(parse_str("YRange = 5\n1 2\n").is_err());
    assert!(parse_str("YRange = 5 5\n1 2\n").is_err());
    assert!(parse_str("YRange = 9 1\n1 2\n").is_err());
}

#[test]
fn test_scalar_range_validation() {
    assert!(parse_str("KeyColumns = 5\n1 2\n").is_err());
    assert!(parse_str("PlotWidth = 50\n1 2\n").is_err());
    assert!(parse_str("PlotHeight = 2000\n1 2\n").is_err());
    assert!(parse_str("Rotate = 91\n1 2\n").is_err());
    assert!(parse_str("ShapeWidth = 1.5\n1 2\n").is_err());
    assert!(parse_str("BlockspcWidthRatio = 0.05\n1 2\n").is_err());
}

#[test]
fn test_key_colors_parsing() {
    let (config, _) = parse_str("KeyColors = 0 10 29\n1 2 3\n").unwrap();
    assert_eq!(config.key_colors, Some(vec![0, 10, 29]));

    assert!(parse_str("KeyColors = 30\n1 2\n").is_err());
    assert!(parse_str("KeyColors = red\n1 2\n").is_err());
}

#[test]
fn test_shape_and_bar_directives() {
    let input = "\
Shape = 1 0 2 4.5
Bar = 0 1 7 3.0

1 2
3 4
";
    let (config, data) = parse_str(input).unwrap();
    assert_eq!(config.shapes.len(), 1);
    assert_eq!(config.shapes[0].kind, ShapeKind::Square);
    assert_eq!(config.shapes[0].value, 4.5);
    assert_eq!(config.bars[0].color, 7);
    assert_eq!(data.block_count(), 2);

    assert!(parse_str("Shape = 0 0 3 1.0\n1 2\n").is_err());
}

#[test]
fn test_shape_only_chart_synthesizes_zero_matrix() {
    let input = "Shape = 2 1 0 4.0\n";
    let (config, data) = parse_str(input).unwrap();
    assert_eq!(config.shapes.len(), 1);
    assert_eq!(data.block_count(), 3);
    assert_eq!(data.bar_count(), 2);
    assert!(data.blocks().iter().all(|row| row.iter().all(|&v| v == 0.0)));
}

#[test]
fn test_no_data_is_fatal() {
    let result = parse_str("Title = 'empty'\n");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("no data"));
}

#[test]
fn test_ragged_data_is_fatal() {
    assert!(parse_str("1 2\n3\n").is_err());
}

#[test]
fn test_label_directive() {
    let (config, _) = parse_str("Label = 0 1 2 -3 0.5 'peak'\n1 2\n").unwrap();
    let label = &config.labels[0];
    assert_eq!((label.block, label.bar), (0, 1));
    assert_eq!((label.dx, label.dy), (2, -3));
    assert_eq!(label.ldy, 0.5);
    assert_eq!(label.text, "peak");

    assert!(parse_str("Label = 0 1 2 'peak'\n1 2\n").is_err());
}

#[test]
fn test_confidence_requires_ordered_bounds() {
    assert!(parse_str("Confidence = 0 0 2.0 1.0\n1 2\n").is_err());
}

#[test]
fn test_bad_float_in_data_row() {
    let result = parse_str("1 two\n");
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("not a valid floating point number"));
}
