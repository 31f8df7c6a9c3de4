use std::f64::consts::FRAC_PI_2;

use plotscript::{
    get_result,
    interpreter::{
        evaluator::function::plot::{BOX_SIZE, POINT_SIZE, continuous_plot, make_line, make_point},
        value::expression::Expression,
    },
};

fn plot(src: &str) -> Expression {
    match get_result(src) {
        Ok(result) => result,
        Err(e) => panic!("Program failed: {src}\n{e}"),
    }
}

fn assert_failure(src: &str) {
    if let Ok(result) = get_result(src) {
        panic!("Program succeeded with {result} but was expected to fail: {src}")
    }
}

fn object_name(primitive: &Expression) -> String {
    primitive.property("object-name")
             .head
             .as_string()
             .unwrap_or_default()
             .to_string()
}

fn count_of(plot: &Expression, name: &str) -> usize {
    plot.tail.iter().filter(|p| object_name(p) == name).count()
}

fn point(x: f64, y: f64) -> Expression {
    make_point(x, y, 0.0)
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Expression {
    make_line(point(x1, y1), point(x2, y2))
}

fn number(expr: &Expression) -> f64 {
    expr.as_number()
        .unwrap_or_else(|| panic!("{expr} is not a Number"))
}

#[test]
fn discrete_plot_emits_lollipops_box_and_labels() {
    let plot = plot("(discrete-plot (list (list -1 -1) (list 1 1)))");

    assert_eq!(plot.tail.len(), 14);
    assert_eq!(count_of(&plot, "point"), 2);
    assert_eq!(count_of(&plot, "line"), 8);
    assert_eq!(count_of(&plot, "text"), 4);

    let marker = &plot.tail[0];
    assert_eq!(marker, &point(-10.0, 10.0));
    assert_eq!(marker.property("size"), POINT_SIZE.into());

    let stem = &plot.tail[1];
    assert_eq!(stem, &line(-10.0, 10.0, -10.0, 0.0));
    assert_eq!(stem.property("thickness"), 0.0.into());

    // Borders: top, bottom, left, right. Then the x and y axes.
    assert_eq!(plot.tail[4], line(-10.0, -10.0, 10.0, -10.0));
    assert_eq!(plot.tail[5], line(-10.0, 10.0, 10.0, 10.0));
    assert_eq!(plot.tail[6], line(-10.0, -10.0, -10.0, 10.0));
    assert_eq!(plot.tail[7], line(10.0, -10.0, 10.0, 10.0));
    assert_eq!(plot.tail[8], line(-10.0, 0.0, 10.0, 0.0));
    assert_eq!(plot.tail[9], line(0.0, 10.0, 0.0, -10.0));
}

#[test]
fn discrete_plot_extent_labels() {
    let plot = plot("(discrete-plot (list (list -1 -1) (list 1 1)))");
    let labels = &plot.tail[10..];

    let texts: Vec<String> = labels.iter().map(ToString::to_string).collect();
    assert_eq!(texts, vec!["(\"-1\")", "(\"1\")", "(\"-1\")", "(\"1\")"]);

    assert_eq!(labels[0].property("position"), point(-10.0, 12.0));
    assert_eq!(labels[1].property("position"), point(10.0, 12.0));
    assert_eq!(labels[2].property("position"), point(-12.0, 10.0));
    assert_eq!(labels[3].property("position"), point(-12.0, -10.0));

    for label in labels {
        assert_eq!(label.property("text-scale"), 1.0.into());
        assert_eq!(label.property("text-rotation"), 0.0.into());
    }
}

#[test]
fn discrete_plot_scales_into_the_box() {
    let plot = plot("(discrete-plot (list (list 0 -3) (list 4 5) (list 2 1)))");

    let xs: Vec<f64> = plot.tail
                           .iter()
                           .filter(|p| object_name(p) == "point")
                           .map(|p| number(&p.tail[0]))
                           .collect();
    let width = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max)
                - xs.iter().copied().fold(f64::INFINITY, f64::min);

    assert!((width - BOX_SIZE).abs() < 1e-9);
}

#[test]
fn discrete_plot_options() {
    let plot = plot("(discrete-plot (list (list -1 -1) (list 1 1)) \
                     (list (list \"title\" \"The Title\") \
                           (list \"abscissa-label\" \"X\") \
                           (list \"ordinate-label\" \"Y\") \
                           (list \"text-scale\" 2)))");

    assert_eq!(plot.tail.len(), 17);

    let title = &plot.tail[10];
    assert_eq!(title.to_string(), "(\"The Title\")");
    assert_eq!(title.property("position"), point(0.0, -13.0));
    assert_eq!(title.property("text-scale"), 2.0.into());

    let abscissa = &plot.tail[11];
    assert_eq!(abscissa.to_string(), "(\"X\")");
    assert_eq!(abscissa.property("position"), point(0.0, 13.0));

    let ordinate = &plot.tail[12];
    assert_eq!(ordinate.to_string(), "(\"Y\")");
    assert_eq!(ordinate.property("position"), point(-13.0, 0.0));
    assert_eq!(ordinate.property("text-rotation"), (-FRAC_PI_2).into());

    for label in &plot.tail[13..] {
        assert_eq!(label.property("text-scale"), 2.0.into());
    }
}

#[test]
fn first_text_scale_wins() {
    let plot = plot("(discrete-plot (list (list -1 -1) (list 1 1)) \
                     (list (list \"text-scale\" 3) (list \"text-scale\" 4)))");

    assert_eq!(plot.tail.len(), 14);
    assert_eq!(plot.tail[13].property("text-scale"), 3.0.into());
}

#[test]
fn stems_end_on_the_bottom_edge_for_positive_data() {
    let plot = plot("(discrete-plot (list (list 1 1) (list 2 4)))");

    // No axis crosses the box.
    assert_eq!(plot.tail.len(), 12);

    let bottom = -BOX_SIZE / 3.0;
    let stem = &plot.tail[3];
    assert!((number(&stem.tail[0].tail[1]) - 4.0 * bottom).abs() < 1e-9);
    assert!((number(&stem.tail[1].tail[1]) - bottom).abs() < 1e-9);
}

#[test]
fn stems_end_on_the_top_edge_for_negative_data() {
    let plot = plot("(discrete-plot (list (list 1 -1) (list 2 -4)))");

    let top = BOX_SIZE / 3.0;
    let stem = &plot.tail[3];
    assert!((number(&stem.tail[1].tail[1]) - top).abs() < 1e-9);
}

#[test]
fn stems_start_at_zero_baseline() {
    let plot = plot("(discrete-plot (list (list 0 0) (list 1 2)))");

    assert_eq!(plot.tail.len(), 12);
    let stem = &plot.tail[3];
    assert!(number(&stem.tail[1].tail[1]).abs() < 1e-9);
}

#[test]
fn single_point_is_left_unscaled() {
    let plot = plot("(discrete-plot (list (list 2 3)))");

    // 1 marker, 1 stem, 4 borders and 4 labels.
    assert_eq!(plot.tail.len(), 10);
    assert_eq!(plot.tail[0], point(2.0, -3.0));
}

#[test]
fn discrete_plot_rejects_bad_data() {
    assert_failure("(discrete-plot (list))");
    assert_failure("(discrete-plot 1)");
    assert_failure("(discrete-plot (list (list 1)))");
    assert_failure("(discrete-plot (list (list 1 2 3)))");
    assert_failure("(discrete-plot (list (list 1 \"two\")))");
    assert_failure("(discrete-plot (list (list 1 (/ 1 0))))");
    assert_failure("(discrete-plot (list (list 1 I)))");
}

#[test]
fn discrete_plot_rejects_bad_options() {
    assert_failure("(discrete-plot (list (list 1 1)) 1)");
    assert_failure("(discrete-plot (list (list 1 1)) (list (list \"color\" \"red\")))");
    assert_failure("(discrete-plot (list (list 1 1)) (list (list \"title\" 1)))");
    assert_failure("(discrete-plot (list (list 1 1)) (list (list \"text-scale\" \"big\")))");
    assert_failure("(discrete-plot (list (list 1 1)) (list (list \"title\")))");
    assert_failure("(discrete-plot (list (list 1 1)) (list) (list))");
}

#[test]
fn continuous_plot_of_a_line() {
    let plot = plot("(begin (define f (lambda (x) (+ (* 2 x) 1))) (continuous-plot f (list -2 2)))");

    // A straight line collapses to 2 segments.
    assert_eq!(plot.tail.len(), 12);
    assert_eq!(count_of(&plot, "line"), 8);
    assert_eq!(count_of(&plot, "text"), 4);

    let first = &plot.tail[0];
    assert_eq!(number(&first.tail[0].tail[0]), -10.0);
    assert_eq!(first.property("thickness"), 0.0.into());
}

#[test]
fn continuous_plot_captions_follow_the_segments() {
    let plot = plot("(begin (define f (lambda (x) (+ (* 2 x) 1))) \
                     (continuous-plot f (list -2 2) (list (list \"title\" \"Line\"))))");

    assert_eq!(plot.tail.len(), 13);
    assert_eq!(plot.tail[2].to_string(), "(\"Line\")");
    assert_eq!(object_name(&plot.tail[3]), "line");
}

#[test]
fn continuous_plot_accepts_builtins_and_lambda_expressions() {
    let sine = plot("(continuous-plot sin (list -3 3))");
    let parabola = plot("(continuous-plot (lambda (x) (* x x)) (list -1 1))");

    for plot in [&sine, &parabola] {
        let segments = plot.tail
                           .iter()
                           .take_while(|p| object_name(p) == "line" && !p.tail[0].is_leaf())
                           .count();
        assert!(segments >= 2);
        assert_eq!(count_of(plot, "text"), 4);
    }
}

#[test]
fn continuous_plot_refines_corners() {
    let bounds = Expression::list(vec![(-1.0).into(), 1.0.into()]);
    let options = Expression::list(vec![Expression::list(vec![Expression::string("title"),
                                                              Expression::string("V")])]);

    let mut sampled = Vec::new();
    let plot = continuous_plot(&bounds, &options, |x| {
                   sampled.push(x);
                   Ok(x.abs())
               }).unwrap();

    // 51 initial samples, then 2 midpoints around the corner in passes 1, 3
    // and 4. Passes 2 and 5 see the corner as a triple endpoint.
    assert_eq!(sampled.len(), 57);
    let expected = [-0.02, 0.02, -0.02, 0.02, -0.01, 0.01];
    for (x, want) in sampled[51..].iter().zip(expected) {
        assert!((x - want).abs() < 1e-9, "sampled {x}, expected {want}");
    }

    // Straight runs collapse to their endpoints, leaving 5 points.
    let segments: Vec<&Expression> = plot.tail
                                         .iter()
                                         .take_while(|p| object_name(p) == "line")
                                         .collect();
    assert_eq!(segments.len(), 4);
    assert_eq!(segments[0], &line(-10.0, -20.0, -0.2, -0.4));
    assert_eq!(segments[1], &line(-0.2, -0.4, 0.0, 0.0));
    assert_eq!(segments[2], &line(0.0, 0.0, 0.2, -0.4));
    assert_eq!(segments[3], &line(0.2, -0.4, 10.0, -20.0));
    assert_eq!(plot.tail[4].to_string(), "(\"V\")");
}

#[test]
fn continuous_plot_keeps_straight_lines_to_their_endpoints() {
    let bounds = Expression::list(vec![(-1.0).into(), 1.0.into()]);
    let options = Expression::list(vec![]);

    let mut calls = 0;
    let plot = continuous_plot(&bounds, &options, |x| {
                   calls += 1;
                   Ok(x)
               }).unwrap();

    // Every triple is straight, so no pass samples again and the line keeps
    // only x = -1, 0.28 and 1.
    assert_eq!(calls, 51);
    assert_eq!(plot.tail[0], line(-10.0, 10.0, 2.8, -2.8));
    assert_eq!(plot.tail[1], line(2.8, -2.8, 10.0, -10.0));
}

#[test]
fn continuous_plot_rejects_bad_arguments() {
    assert_failure("(continuous-plot sin (list 1 1))");
    assert_failure("(continuous-plot sin (list 2 1))");
    assert_failure("(continuous-plot sin (list 1))");
    assert_failure("(continuous-plot sin 1)");
    assert_failure("(continuous-plot 5 (list 0 1))");
    assert_failure("(continuous-plot nope (list 0 1))");
    assert_failure("(continuous-plot list (list 0 1))");
    assert_failure("(continuous-plot ln (list -1 1))");
    assert_failure("(continuous-plot sin (list 0 1) (list (list \"title\" 1)))");
    assert_failure("(continuous-plot sin (list 0 1) (list) (list))");
}
