use eps_chart::data_types::{ChartConfig, DataMatrix};
use eps_chart::directive::parse_str;
use eps_chart::primitives::DrawingSink;
use eps_chart::{Chart, EpsWriter};

fn eps_for(config: ChartConfig, rows: Vec<Vec<f64>>) -> String {
    let data = DataMatrix::from_rows(rows).unwrap();
    let chart = Chart::new(config, data).unwrap();
    let mut writer = EpsWriter::new(Vec::new());
    let page = chart.render().unwrap();
    writer.emit(&page).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn test_eps_header_and_bounding_box() {
    let output = eps_for(ChartConfig::default(), vec![vec![1.0, 2.0]]);
    assert!(output.starts_with("%!PS-Adobe-2.0 EPSF-2.0\n"));
    // Default page: x 50..420, y 230..455.
    assert!(output.contains("%%BoundingBox: 50 230 420 455"));
    // Wider than tall pages carry the orientation comment.
    assert!(output.contains("%%Orientation: Portrait"));
}

#[test]
fn test_prolog_defines_required_procedures() {
    let output = eps_for(ChartConfig::default(), vec![vec![1.0, 2.0]]);
    for proc_name in [
        "/FillBox", "/Rshow", "/Cshow", "/Tt", "/Ts", "/Tn", "/Tb", "/LTthick", "/PatBox0",
        "/PatBox9",
    ] {
        assert!(output.contains(proc_name), "missing {proc_name}");
    }
}

#[test]
fn test_solid_bars_emit_fillbox() {
    let output = eps_for(ChartConfig::default(), vec![vec![1.0, 2.0]]);
    assert!(output.contains("FillBox stroke"));
}

#[test]
fn test_pattern_bars_emit_patbox() {
    let config = ChartConfig {
        color: false,
        pattern_fill: true,
        ..ChartConfig::default()
    };
    let output = eps_for(config, vec![vec![1.0, 2.0]]);
    // Pattern swatches paint a white box first, then the pattern overlay.
    assert!(output.contains("1 setgray"));
    assert!(output.contains("PatBox0 stroke"));
    assert!(output.contains("PatBox1 stroke"));
}

#[test]
fn test_parenthesized_text_is_escaped() {
    let config = ChartConfig {
        title: "cycles (more)".into(),
        ..ChartConfig::default()
    };
    let output = eps_for(config, vec![vec![1.0, 2.0]]);
    assert!(output.contains("(cycles \\(more\\))"));
}

#[test]
fn test_end_to_end_from_directives() {
    let input = "\
Title = 'demo'
Key = 'a' 'b'

1 2
3 4
";
    let (config, data) = parse_str(input).unwrap();
    let chart = Chart::new(config, data).unwrap();
    let mut output = Vec::new();
    chart.write_eps(&mut output).unwrap();
    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("%!PS-Adobe-2.0 EPSF-2.0"));
    assert!(text.contains("(demo) Cshow"));
    assert!(text.contains("(a) show"));
    assert!(text.contains("(b) show"));
}
