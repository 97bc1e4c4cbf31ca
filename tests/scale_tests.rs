use eps_chart::data_types::{ChartConfig, ConfidenceInterval, DataMatrix};
use eps_chart::scales::resolve_range;
use rand::Rng;

#[test]
fn test_range_contains_all_values() {
    let data = DataMatrix::from_rows(vec![vec![1.0, 8.0], vec![3.0, 5.5]]).unwrap();
    let config = ChartConfig::default();
    let range = resolve_range(&data, &config).unwrap();
    for block in data.blocks() {
        for &value in block {
            assert!(range.low <= value && value <= range.high);
        }
    }
}

#[test]
fn test_range_contains_random_data() {
    let mut rng = rand::rng();
    for _ in 0..50 {
        let rows: Vec<Vec<f64>> = (0..4)
            .map(|_| (0..3).map(|_| rng.random_range(-100.0..100.0)).collect())
            .collect();
        let data = DataMatrix::from_rows(rows).unwrap();
        let config = ChartConfig::default();
        let Ok(range) = resolve_range(&data, &config) else {
            // Degenerate spans (all values equal) are a config error.
            continue;
        };
        let (min, max) = data.min_max();
        assert!(range.low <= min, "low {} above min {}", range.low, min);
        assert!(range.high >= max, "high {} below max {}", range.high, max);
        assert!(range.tick_spacing > 0.0);
    }
}

#[test]
fn test_snapped_bounds_are_tick_multiples() {
    let data = DataMatrix::from_rows(vec![vec![1.3, 8.7]]).unwrap();
    let config = ChartConfig::default();
    let range = resolve_range(&data, &config).unwrap();
    let spacing = range.tick_spacing;
    assert!((range.low / spacing - (range.low / spacing).round()).abs() < 1e-9);
    assert!((range.high / spacing - (range.high / spacing).round()).abs() < 1e-9);
    // With no low override the first tick sits exactly on the low bound.
    assert_eq!(range.first_tick, range.low);
}

#[test]
fn test_user_range_is_not_snapped() {
    let data = DataMatrix::from_rows(vec![vec![1.3, 8.7]]).unwrap();
    let config = ChartConfig {
        y_range: Some((0.5, 9.5)),
        ..ChartConfig::default()
    };
    let range = resolve_range(&data, &config).unwrap();
    assert_eq!(range.low, 0.5);
    assert_eq!(range.high, 9.5);
}

#[test]
fn test_single_bound_override_only_snaps_the_other() {
    let data = DataMatrix::from_rows(vec![vec![1.3, 8.7]]).unwrap();
    let config = ChartConfig {
        y_range_low: Some(0.7),
        ..ChartConfig::default()
    };
    let range = resolve_range(&data, &config).unwrap();
    assert_eq!(range.low, 0.7);
    // High is still snapped outward to a tick multiple.
    let spacing = range.tick_spacing;
    assert!(range.high >= 8.7);
    assert!((range.high / spacing - (range.high / spacing).round()).abs() < 1e-9);
}

#[test]
fn test_confidence_bounds_extend_range() {
    let data = DataMatrix::from_rows(vec![vec![2.0, 3.0]]).unwrap();
    let config = ChartConfig {
        confidence: vec![ConfidenceInterval::new(0, 0, -4.0, 12.0).unwrap()],
        ..ChartConfig::default()
    };
    let range = resolve_range(&data, &config).unwrap();
    assert!(range.low <= -4.0);
    assert!(range.high >= 12.0);
}

#[test]
fn test_overlap_forces_zero_baseline() {
    let data = DataMatrix::from_rows(vec![vec![5.0, 9.0]]).unwrap();
    let config = ChartConfig {
        overlap: true,
        ..ChartConfig::default()
    };
    let range = resolve_range(&data, &config).unwrap();
    assert_eq!(range.low, 0.0);
}

#[test]
fn test_degenerate_span_is_fatal() {
    let data = DataMatrix::from_rows(vec![vec![4.0, 4.0]]).unwrap();
    let config = ChartConfig::default();
    let result = resolve_range(&data, &config);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("YRange difference"));
}

#[test]
fn test_tick_iteration_covers_range() {
    let data = DataMatrix::from_rows(vec![vec![0.0, 30.0]]).unwrap();
    let config = ChartConfig::default();
    let range = resolve_range(&data, &config).unwrap();
    let ticks: Vec<f64> = range.ticks().collect();
    assert!(!ticks.is_empty());
    assert_eq!(ticks[0], range.first_tick);
    assert!(*ticks.last().unwrap() <= range.high);
    for pair in ticks.windows(2) {
        assert!((pair[1] - pair[0] - range.tick_spacing).abs() < 1e-9);
    }
}
