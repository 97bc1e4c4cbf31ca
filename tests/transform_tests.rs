use eps_chart::data_types::ChartConfig;
use eps_chart::scales::ResolvedRange;
use eps_chart::transform::{PlotGeometry, PlotTransform};

fn fixed_range(low: f64, high: f64) -> ResolvedRange {
    ResolvedRange {
        low,
        high,
        tick_spacing: (high - low) / 3.0,
        first_tick: low,
    }
}

#[test]
fn test_value_to_y_endpoints() {
    let config = ChartConfig::default();
    let geometry = PlotGeometry::solve(&config, 2, 2, 0);
    let transform = PlotTransform::new(geometry, fixed_range(0.0, 10.0), vec![], false);

    assert_eq!(transform.value_to_y(0.0), 0.0);
    assert_eq!(transform.value_to_y(10.0), config.plot_height);
    // Out-of-range values project linearly past the plot edges.
    assert!(transform.value_to_y(20.0) > config.plot_height);
    assert!(transform.value_to_y(-5.0) < 0.0);
    assert_eq!(transform.clamped_y(20.0), config.plot_height);
}

#[test]
fn test_value_to_y_monotonic() {
    let config = ChartConfig::default();
    let geometry = PlotGeometry::solve(&config, 3, 2, 0);
    let transform = PlotTransform::new(geometry, fixed_range(-5.0, 5.0), vec![], false);

    let mut previous = f64::NEG_INFINITY;
    for step in 0..100 {
        let value = -6.0 + step as f64 * 0.12;
        let y = transform.value_to_y(value);
        assert!(y >= previous);
        previous = y;
    }
}

#[test]
fn test_width_equation_holds() {
    let config = ChartConfig {
        blockspc_width_ratio: 0.7,
        break_width_ratio: 1.3,
        ..ChartConfig::default()
    };
    let block_count = 5;
    let break_count = 2;
    let geometry = PlotGeometry::solve(&config, block_count, 3, break_count);

    let total = geometry.blockspc_width * (block_count as f64 + 1.0)
        + geometry.block_width * block_count as f64
        + geometry.break_width * break_count as f64;
    assert!(
        (total - config.plot_width).abs() < 1e-9,
        "width system does not close: {} vs {}",
        total,
        config.plot_width
    );
}

#[test]
fn test_bar_widths_fill_block() {
    let config = ChartConfig::default();
    let bar_count = 4;
    let geometry = PlotGeometry::solve(&config, 2, bar_count, 0);
    let total = geometry.bar_width * bar_count as f64
        + geometry.barspc_width * (bar_count as f64 - 1.0);
    assert!((total - geometry.block_width).abs() < 1e-9);
}

#[test]
fn test_block_intervals_accumulate_breaks() {
    let config = ChartConfig::default();
    let geometry = PlotGeometry::solve(&config, 4, 2, 1);
    let transform = PlotTransform::new(geometry, fixed_range(0.0, 10.0), vec![2], false);

    let (first_start, first_end) = transform.block_x_interval(0);
    assert_eq!(first_start, geometry.blockspc_width);
    assert_eq!(first_end, first_start + geometry.block_width);

    // Blocks before the break are spaced regularly.
    let (second_start, _) = transform.block_x_interval(1);
    assert!(
        (second_start - (first_start + geometry.block_width + geometry.blockspc_width)).abs()
            < 1e-9
    );

    // The break at position 2 shifts every block from index 2 on.
    let (third_start, _) = transform.block_x_interval(2);
    let expected = first_start
        + 2.0 * (geometry.block_width + geometry.blockspc_width)
        + geometry.break_width;
    assert!((third_start - expected).abs() < 1e-9);
}

#[test]
fn test_bar_interval_subdivision() {
    let config = ChartConfig::default();
    let geometry = PlotGeometry::solve(&config, 2, 3, 0);
    let transform = PlotTransform::new(geometry, fixed_range(0.0, 10.0), vec![], false);

    let (block_start, block_end) = transform.block_x_interval(0);
    let (bar0_start, bar0_end) = transform.bar_x_interval(0, 0);
    let (bar2_start, bar2_end) = transform.bar_x_interval(0, 2);

    assert_eq!(bar0_start, block_start);
    assert!((bar0_end - bar0_start - geometry.bar_width).abs() < 1e-9);
    // The last bar ends flush with its block.
    assert!((bar2_end - block_end).abs() < 1e-9);
    assert!(bar2_start > bar0_end);
}

#[test]
fn test_overlap_shares_block_interval() {
    let config = ChartConfig {
        overlap: true,
        ..ChartConfig::default()
    };
    let geometry = PlotGeometry::solve(&config, 2, 3, 0);
    assert_eq!(geometry.bar_width, geometry.block_width);
    assert_eq!(geometry.barspc_width, 0.0);

    let transform = PlotTransform::new(geometry, fixed_range(0.0, 10.0), vec![], true);
    let block = transform.block_x_interval(1);
    for bar in 0..3 {
        assert_eq!(transform.bar_x_interval(1, bar), block);
    }
}
