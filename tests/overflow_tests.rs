use eps_chart::data_types::DataMatrix;
use eps_chart::overflow::{find_overflow_runs, OverflowRun, WormTracker};

#[test]
fn test_single_run_in_block() {
    let data = DataMatrix::from_rows(vec![vec![1.0, 12.0, 15.0, 3.0]]).unwrap();
    let runs = find_overflow_runs(&data, 10.0);
    assert_eq!(
        runs,
        vec![OverflowRun {
            block: 0,
            start_bar: 1,
            end_bar: 2
        }]
    );
}

#[test]
fn test_no_runs_when_all_in_range() {
    let data = DataMatrix::from_rows(vec![vec![1.0, 2.0], vec![9.0, 10.0]]).unwrap();
    // A value equal to the bound does not overflow.
    assert!(find_overflow_runs(&data, 10.0).is_empty());
}

#[test]
fn test_runs_ordered_by_block_then_bar() {
    let data = DataMatrix::from_rows(vec![
        vec![11.0, 1.0, 12.0],
        vec![1.0, 1.0, 1.0],
        vec![13.0, 14.0, 1.0],
    ])
    .unwrap();
    let runs = find_overflow_runs(&data, 10.0);
    assert_eq!(runs.len(), 3);
    assert_eq!((runs[0].block, runs[0].start_bar, runs[0].end_bar), (0, 0, 0));
    assert_eq!((runs[1].block, runs[1].start_bar, runs[1].end_bar), (0, 2, 2));
    assert_eq!((runs[2].block, runs[2].start_bar, runs[2].end_bar), (2, 0, 1));
}

#[test]
fn test_worm_tracker_label_sides() {
    let mut tracker = WormTracker::new();

    // First single-bar worm of a block labels the left side only.
    let sides = tracker.note(OverflowRun {
        block: 3,
        start_bar: 0,
        end_bar: 0,
    });
    assert_eq!(sides, (true, false));

    // A later worm in the same block labels the right side only.
    let sides = tracker.note(OverflowRun {
        block: 3,
        start_bar: 2,
        end_bar: 2,
    });
    assert_eq!(sides, (false, true));

    // A fresh block starts over.
    let sides = tracker.note(OverflowRun {
        block: 4,
        start_bar: 1,
        end_bar: 1,
    });
    assert_eq!(sides, (true, false));

    // Multi-bar runs always label both sides.
    let sides = tracker.note(OverflowRun {
        block: 5,
        start_bar: 0,
        end_bar: 3,
    });
    assert_eq!(sides, (true, true));
}
