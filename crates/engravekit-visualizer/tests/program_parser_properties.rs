//! Property tests for the program parser and bounds calculator

use engravekit_visualizer::{compute_bounds, parse, parse_program, BoundingRectangle};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = String> {
    "-?[0-9]{1,3}(\\.[0-9]{1,3})?"
}

fn motion_line(mnemonic: &'static str) -> impl Strategy<Value = String> {
    (coordinate(), coordinate()).prop_map(move |(x, y)| format!("{} X{} Y{}", mnemonic, x, y))
}

fn non_layer_line() -> impl Strategy<Value = String> {
    prop_oneof![
        motion_line("G0"),
        motion_line("G1"),
        Just("M5".to_string()),
        Just("; comment".to_string()),
        Just(String::new()),
        Just("G1 X".to_string()),
        "[A-Z][0-9]{1,2}",
    ]
}

fn any_line() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => "M3 S[0-9]{1,4}",
        4 => non_layer_line(),
    ]
}

/// Same motion as `motion_line` with the separating spaces dropped, as some
/// generators write it
fn compact_motion_line(mnemonic: &'static str) -> impl Strategy<Value = String> {
    (coordinate(), coordinate(), any::<bool>()).prop_map(move |(x, y, space_after_mnemonic)| {
        if space_after_mnemonic {
            format!("{} X{}Y{}", mnemonic, x, y)
        } else {
            format!("{}X{}Y{}", mnemonic, x, y)
        }
    })
}

fn program(line: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
    prop::collection::vec(line, 0..60).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn no_m3_means_no_layers(text in program(non_layer_line()), h in 0.0f64..5.0) {
        prop_assert!(parse(&text, h).is_empty());
    }

    #[test]
    fn layer_count_matches_non_empty_openings(text in program(any_line()), h in 0.0f64..5.0) {
        let m3_count = text.lines().filter(|l| l.starts_with("M3 S")).count();
        let parsed = parse_program(&text, h);

        prop_assert!(parsed.layers.len() <= m3_count);
        prop_assert_eq!(parsed.stats.layers_opened, m3_count);
        prop_assert_eq!(
            parsed.layers.len(),
            m3_count - parsed.stats.empty_layers_dropped
        );
        prop_assert!(parsed.layers.iter().all(|l| !l.points.is_empty()));
    }

    #[test]
    fn z_is_layer_index_times_line_height(text in program(any_line()), h in 0.0f64..5.0) {
        for layer in parse(&text, h) {
            for point in &layer.points {
                prop_assert_eq!(point.z, f64::from(layer.index) * h);
            }
        }
    }

    #[test]
    fn layer_indices_strictly_increase(text in program(any_line())) {
        let layers = parse(&text, 1.0);
        prop_assert!(layers.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn parsing_is_idempotent(text in program(any_line()), h in 0.0f64..5.0) {
        prop_assert_eq!(parse(&text, h), parse(&text, h));
    }

    #[test]
    fn compact_words_parse_like_spaced_words(text in program(any_line()), h in 0.0f64..5.0) {
        let compact = text.replace(' ', "");
        prop_assert_eq!(parse(&compact, h), parse(&text, h));
    }

    #[test]
    fn compact_moves_draw_points(
        lines in prop::collection::vec(compact_motion_line("G1"), 1..20),
    ) {
        let text = format!("M3 S100\n{}\nM5", lines.join("\n"));
        let layers = parse(&text, 1.0);
        prop_assert_eq!(layers.len(), 1);
        prop_assert_eq!(layers[0].points.len(), lines.len());
    }

    #[test]
    fn bounds_ignore_nan_points(
        points in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 0..40),
        w in 1.0f64..500.0,
        h in 1.0f64..500.0,
    ) {
        let mut with_nan = points.clone();
        with_nan.push((f64::NAN, f64::NAN));
        with_nan.insert(0, (f64::NAN, 1.0));

        prop_assert_eq!(
            compute_bounds(with_nan, w, h),
            compute_bounds(points.clone(), w, h)
        );
    }

    #[test]
    fn bounds_contain_every_point(
        points in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 1..40),
    ) {
        let rect = compute_bounds(points.clone(), 50.0, 50.0);
        for (x, y) in points {
            prop_assert!(rect.min_x <= x && x <= rect.max_x);
            prop_assert!(rect.min_y <= y && y <= rect.max_y);
        }
    }

    #[test]
    fn empty_bounds_are_the_table(w in 0.0f64..1000.0, h in 0.0f64..1000.0) {
        prop_assert_eq!(
            compute_bounds(std::iter::empty(), w, h),
            BoundingRectangle { min_x: 0.0, max_x: w, min_y: 0.0, max_y: h }
        );
    }
}
