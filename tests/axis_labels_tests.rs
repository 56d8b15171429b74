use chart_glyphs::api::{
    DEFAULT_MAX_X_LABELS, DEFAULT_MIN_LABEL_SPACING_PX, thin_x_labels, x_label_step,
    y_grid_labels,
};
use proptest::prelude::*;

#[test]
fn hundred_days_on_an_800px_plot() {
    let values: Vec<f64> = (0..100).map(|day| f64::from(day) * 86_400_000.0).collect();
    let labels = thin_x_labels(
        &values,
        800.0,
        DEFAULT_MAX_X_LABELS,
        DEFAULT_MIN_LABEL_SPACING_PX,
    );

    let budget = (DEFAULT_MAX_X_LABELS as f64).min(800.0 / DEFAULT_MIN_LABEL_SPACING_PX);
    let expected_step = (100.0 / budget).ceil() as usize;
    assert_eq!(
        x_label_step(100, 800.0, DEFAULT_MAX_X_LABELS, DEFAULT_MIN_LABEL_SPACING_PX),
        expected_step
    );
    assert!(labels.len() <= 12);
    assert_eq!(labels.first(), values.first());
    assert_eq!(labels.last(), values.last());
}

#[test]
fn grid_lines_outlive_their_labels() {
    let grid = [0.0, 2.0, 4.0, 6.0, 8.0];
    let ticks = y_grid_labels(&grid, 0.0, 4.0);
    assert_eq!(ticks.len(), grid.len());
    assert_eq!(
        ticks.iter().filter(|tick| tick.labeled).count(),
        3,
        "0, 4 and 8 carry labels"
    );
}

proptest! {
    #[test]
    fn thinned_labels_keep_order_and_last_value(
        count in 1usize..500,
        plot_width in 0.0f64..3_000.0,
        max_labels in 1usize..30,
        min_spacing in 1.0f64..200.0
    ) {
        let values: Vec<f64> = (0..count).map(|i| i as f64).collect();
        let labels = thin_x_labels(&values, plot_width, max_labels, min_spacing);

        prop_assert!(!labels.is_empty());
        prop_assert_eq!(labels[0], values[0]);
        prop_assert_eq!(labels[labels.len() - 1], values[count - 1]);
        prop_assert!(labels.windows(2).all(|pair| pair[0] < pair[1]));

        let step = x_label_step(count, plot_width, max_labels, min_spacing);
        let budget = (max_labels as f64).min(plot_width / min_spacing);
        if budget > 0.0 {
            prop_assert!(step >= (count as f64 / budget).ceil() as usize);
        }
        prop_assert!(labels.len() <= count.div_ceil(step) + 1);
    }
}
