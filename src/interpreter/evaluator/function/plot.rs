use log::{debug, trace};
use ordered_float::OrderedFloat;

use crate::{
    error::SemanticError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            utils::{expect_list, expect_number},
        },
        value::expression::Expression,
    },
    util::num::format_significant,
};

/// Side length of the square every plot is scaled into.
pub const BOX_SIZE: f64 = 20.0;
/// Size of the marker drawn at each discrete data point.
pub const POINT_SIZE: f64 = 0.5;
/// Thickness of every generated line.
pub const LINE_THICKNESS: f64 = 0.0;
/// Number of intervals the domain of a continuous plot is split into.
pub const SAMPLE_INTERVALS: u32 = 50;
/// Number of refinement passes over the sampled polyline.
pub const REFINEMENT_PASSES: usize = 5;
/// Turning angle, in degrees, from which three samples count as collinear.
pub const STRAIGHT_ANGLE: f64 = 175.0;

/// Distance between the box and the title or axis labels.
const OPTION_OFFSET: f64 = 3.0;
/// Distance between the box and the automatic extent labels.
const LABEL_OFFSET: f64 = 2.0;
/// Significant digits of the automatic extent labels.
const LABEL_DIGITS: usize = 2;

/// Builds a point primitive: `(x y)` tagged with `object-name` and `size`.
///
/// # Example
/// ```
/// use plotscript::interpreter::evaluator::function::plot::make_point;
///
/// let point = make_point(1.0, -2.0, 0.5);
/// assert_eq!(point.to_string(), "((1) (-2))");
/// assert_eq!(point.property("object-name").to_string(), "(\"point\")");
/// assert_eq!(point.property("size"), 0.5.into());
/// ```
#[must_use]
pub fn make_point(x: f64, y: f64, size: f64) -> Expression {
    let mut point = Expression::list(vec![x.into(), y.into()]);
    point.set_property("object-name", Expression::string("point"));
    point.set_property("size", size.into());
    point
}

/// Builds a line primitive between two point primitives.
#[must_use]
pub fn make_line(from: Expression, to: Expression) -> Expression {
    let mut line = Expression::list(vec![from, to]);
    line.set_property("object-name", Expression::string("line"));
    line.set_property("thickness", LINE_THICKNESS.into());
    line
}

/// Builds a text primitive anchored at a point primitive.
///
/// `rotation` is in radians.
#[must_use]
pub fn make_text(text: &str, position: Expression, scale: f64, rotation: f64) -> Expression {
    let mut label = Expression::string(text);
    label.set_property("object-name", Expression::string("text"));
    label.set_property("position", position);
    label.set_property("text-scale", scale.into());
    label.set_property("text-rotation", rotation.into());
    label
}

/// A data point in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

impl Point {
    fn midpoint_x(self, other: Self) -> f64 {
        f64::midpoint(self.x, other.x)
    }

    fn distance_squared(self, other: Self) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }
}

/// The bounding box of the data and the transform into the output box.
///
/// Scaled coordinates flip the vertical axis, so larger data values end up
/// higher on a y-down canvas.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x_min:   f64,
    x_max:   f64,
    y_min:   f64,
    y_max:   f64,
    x_scale: f64,
    y_scale: f64,
}

impl Frame {
    /// Fits a frame around `points`, which must not be empty.
    fn fit(points: &[Point], procedure: &str) -> EvalResult<Self> {
        let xs = || points.iter().map(|p| OrderedFloat(p.x));
        let ys = || points.iter().map(|p| OrderedFloat(p.y));

        let (Some(x_min), Some(x_max), Some(y_min), Some(y_max)) =
            (xs().min(), xs().max(), ys().min(), ys().max())
        else {
            return Err(SemanticError::InvalidArgument { procedure: procedure.to_string(),
                                                        details:   "no data to plot".to_string(), });
        };

        Ok(Self { x_min:   x_min.0,
                  x_max:   x_max.0,
                  y_min:   y_min.0,
                  y_max:   y_max.0,
                  x_scale: Self::scale(x_min.0, x_max.0),
                  y_scale: Self::scale(y_min.0, y_max.0), })
    }

    /// Maps an extent onto the box. A zero extent is left unscaled.
    fn scale(min: f64, max: f64) -> f64 {
        let extent = max - min;
        if extent > 0.0 { BOX_SIZE / extent } else { 1.0 }
    }

    fn sx(&self, x: f64) -> f64 {
        x * self.x_scale
    }

    fn sy(&self, y: f64) -> f64 {
        -y * self.y_scale
    }

    fn left(&self) -> f64 {
        self.sx(self.x_min)
    }

    fn right(&self) -> f64 {
        self.sx(self.x_max)
    }

    fn top(&self) -> f64 {
        self.sy(self.y_max)
    }

    fn bottom(&self) -> f64 {
        self.sy(self.y_min)
    }

    fn crosses_x_axis(&self) -> bool {
        self.y_min < 0.0 && 0.0 < self.y_max
    }

    fn crosses_y_axis(&self) -> bool {
        self.x_min < 0.0 && 0.0 < self.x_max
    }

    /// Where lollipop stems end: the x axis if it is inside the box,
    /// otherwise the box edge nearest to zero.
    fn stem_anchor(&self) -> f64 {
        if self.crosses_x_axis() {
            0.0
        } else if self.y_min >= 0.0 {
            self.bottom()
        } else {
            self.top()
        }
    }

    /// Emits the four borders (top, bottom, left, right) followed by the
    /// axes that lie inside the box.
    fn push_borders(&self, out: &mut Vec<Expression>) {
        let (left, right, top, bottom) = (self.left(), self.right(), self.top(), self.bottom());

        out.push(make_line(make_point(left, top, 0.0), make_point(right, top, 0.0)));
        out.push(make_line(make_point(left, bottom, 0.0), make_point(right, bottom, 0.0)));
        out.push(make_line(make_point(left, top, 0.0), make_point(left, bottom, 0.0)));
        out.push(make_line(make_point(right, top, 0.0), make_point(right, bottom, 0.0)));

        if self.crosses_x_axis() {
            out.push(make_line(make_point(left, 0.0, 0.0), make_point(right, 0.0, 0.0)));
        }
        if self.crosses_y_axis() {
            out.push(make_line(make_point(0.0, bottom, 0.0), make_point(0.0, top, 0.0)));
        }
    }

    /// Emits the xmin, xmax, ymin and ymax extent labels.
    fn push_extent_labels(&self, text_scale: f64, out: &mut Vec<Expression>) {
        let (left, right, top, bottom) = (self.left(), self.right(), self.top(), self.bottom());
        let label = |value: f64, x: f64, y: f64| {
            make_text(&format_significant(value, LABEL_DIGITS),
                      make_point(x, y, 0.0),
                      text_scale,
                      0.0)
        };

        out.push(label(self.x_min, left, bottom + LABEL_OFFSET));
        out.push(label(self.x_max, right, bottom + LABEL_OFFSET));
        out.push(label(self.y_min, left - LABEL_OFFSET, bottom));
        out.push(label(self.y_max, left - LABEL_OFFSET, top));
    }
}

/// A caption requested through the options list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Caption {
    Title(String),
    AbscissaLabel(String),
    OrdinateLabel(String),
}

/// The parsed options list of a plot.
#[derive(Debug, Clone, PartialEq)]
struct PlotOptions {
    captions:   Vec<Caption>,
    text_scale: f64,
}

impl PlotOptions {
    /// Reads a list of `(key value)` pairs.
    ///
    /// Recognized keys are `title`, `abscissa-label` and `ordinate-label`,
    /// which take a String, and `text-scale`, which takes a Number. The first
    /// `text-scale` wins.
    fn parse(options: &Expression, procedure: &str) -> EvalResult<Self> {
        let invalid = |details: String| SemanticError::InvalidArgument { procedure: procedure.to_string(),
                                                                         details };

        let mut captions = Vec::new();
        let mut text_scale = None;

        for option in expect_list(options, procedure)? {
            let [key, value] = expect_list(option, procedure)? else {
                return Err(invalid(format!("option {option} is not a (key value) pair")));
            };
            let Some(key) = key.head.as_string().filter(|_| key.is_leaf()) else {
                return Err(invalid(format!("option key {key} is not a String")));
            };

            if key == "text-scale" {
                let scale = expect_number(value, procedure)?;
                text_scale.get_or_insert(scale);
                continue;
            }

            let Some(text) = value.head.as_string().filter(|_| value.is_leaf()) else {
                return Err(invalid(format!("value of option \"{key}\" is not a String")));
            };
            let text = text.to_string();

            captions.push(match key {
                              "title" => Caption::Title(text),
                              "abscissa-label" => Caption::AbscissaLabel(text),
                              "ordinate-label" => Caption::OrdinateLabel(text),
                              _ => return Err(invalid(format!("unknown option \"{key}\""))),
                          });
        }

        Ok(Self { captions,
                  text_scale: text_scale.unwrap_or(1.0) })
    }

    /// Emits the requested captions around `frame`, in option order.
    fn push_captions(&self, frame: &Frame, out: &mut Vec<Expression>) {
        let x_mid = f64::midpoint(frame.left(), frame.right());
        let y_mid = f64::midpoint(frame.top(), frame.bottom());

        for caption in &self.captions {
            let text = match caption {
                Caption::Title(text) => {
                    make_text(text,
                              make_point(x_mid, frame.top() - OPTION_OFFSET, 0.0),
                              self.text_scale,
                              0.0)
                },
                Caption::AbscissaLabel(text) => {
                    make_text(text,
                              make_point(x_mid, frame.bottom() + OPTION_OFFSET, 0.0),
                              self.text_scale,
                              0.0)
                },
                Caption::OrdinateLabel(text) => {
                    make_text(text,
                              make_point(frame.left() - OPTION_OFFSET, y_mid, 0.0),
                              self.text_scale,
                              -std::f64::consts::FRAC_PI_2)
                },
            };
            out.push(text);
        }
    }
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self { captions:   Vec::new(),
               text_scale: 1.0, }
    }
}

/// Reads a `(x y)` data point with finite coordinates.
fn expect_point(expr: &Expression, procedure: &str) -> EvalResult<Point> {
    let [x, y] = expect_list(expr, procedure)? else {
        return Err(SemanticError::TypeError { procedure: procedure.to_string(),
                                              details:   format!("{expr} is not a point") });
    };

    finite_point(expect_number(x, procedure)?, expect_number(y, procedure)?, procedure)
}

fn finite_point(x: f64, y: f64, procedure: &str) -> EvalResult<Point> {
    if x.is_finite() && y.is_finite() {
        Ok(Point { x, y })
    } else {
        Err(SemanticError::InvalidArgument { procedure: procedure.to_string(),
                                             details:   format!("point ({x}, {y}) is not finite"), })
    }
}

/// Plots a list of `(x y)` data points as lollipops.
///
/// The optional second argument is an options list. The result is a list of
/// graphic primitives, in this order: a marker and a stem per point, the
/// box borders and axes, the captions, and the four extent labels.
///
/// # Errors
/// - The data is not a non-empty list of `(Number Number)` points.
/// - The options list is malformed.
///
/// # Example
/// ```
/// use plotscript::interpreter::{
///     evaluator::function::plot::discrete_plot,
///     value::expression::Expression,
/// };
///
/// let data = Expression::list(vec![Expression::list(vec![(-1.0).into(), (-1.0).into()]),
///                                  Expression::list(vec![1.0.into(), 1.0.into()])]);
///
/// let plot = discrete_plot(&[data]).unwrap();
/// // 2 markers, 2 stems, 4 borders, 2 axes and 4 extent labels.
/// assert_eq!(plot.tail.len(), 14);
/// ```
pub fn discrete_plot(args: &[Expression]) -> EvalResult<Expression> {
    const PROCEDURE: &str = "discrete-plot";

    let (data, options) = match args {
        [data] => (data, PlotOptions::default()),
        [data, options] => (data, PlotOptions::parse(options, PROCEDURE)?),
        _ => return Err(SemanticError::ArgumentCountMismatch { procedure: PROCEDURE.to_string() }),
    };

    let points = expect_list(data, PROCEDURE)?.iter()
                                              .map(|point| expect_point(point, PROCEDURE))
                                              .collect::<EvalResult<Vec<_>>>()?;

    let frame = Frame::fit(&points, PROCEDURE)?;
    let anchor = frame.stem_anchor();

    let mut out = Vec::with_capacity(2 * points.len() + 14);
    for point in &points {
        let (x, y) = (frame.sx(point.x), frame.sy(point.y));
        out.push(make_point(x, y, POINT_SIZE));
        out.push(make_line(make_point(x, y, 0.0), make_point(x, anchor, 0.0)));
    }

    frame.push_borders(&mut out);
    options.push_captions(&frame, &mut out);
    frame.push_extent_labels(options.text_scale, &mut out);

    debug!("{PROCEDURE}: {} data points, {} primitives", points.len(), out.len());
    Ok(Expression::list(out))
}

/// Plots a function of one variable over `bounds = (a b)`.
///
/// `f` is sampled at 51 evenly spaced points from `a` to `b`, the polyline is
/// refined adaptively, and the result is a list of graphic primitives in
/// this order: the curve segments, the captions, the box borders and axes,
/// and the four extent labels.
///
/// # Errors
/// - `bounds` is not a list of two Numbers with `a < b`.
/// - The options list is malformed.
/// - `f` fails or yields a non-finite value.
///
/// # Example
/// ```
/// use plotscript::interpreter::{
///     evaluator::function::plot::continuous_plot,
///     value::expression::Expression,
/// };
///
/// let bounds = Expression::list(vec![(-1.0).into(), 1.0.into()]);
/// let options = Expression::list(vec![]);
///
/// let plot = continuous_plot(&bounds, &options, |x| Ok(2.0 * x + 1.0)).unwrap();
/// // Refining a straight line leaves 3 points, so 2 segments, followed by
/// // 4 borders, both axes and 4 extent labels.
/// assert_eq!(plot.tail.len(), 12);
/// ```
pub fn continuous_plot<F>(bounds: &Expression, options: &Expression, mut f: F) -> EvalResult<Expression>
    where F: FnMut(f64) -> EvalResult<f64>
{
    const PROCEDURE: &str = "continuous-plot";

    let [lower, upper] = expect_list(bounds, PROCEDURE)? else {
        return Err(SemanticError::TypeError { procedure: PROCEDURE.to_string(),
                                              details:   format!("bounds {bounds} are not a (lower upper) pair"), });
    };
    let (lower, upper) = (expect_number(lower, PROCEDURE)?, expect_number(upper, PROCEDURE)?);
    if lower >= upper || !lower.is_finite() || !upper.is_finite() {
        return Err(SemanticError::InvalidArgument { procedure: PROCEDURE.to_string(),
                                                    details:   format!("lower bound {lower} must be less than upper bound {upper}"), });
    }

    let options = PlotOptions::parse(options, PROCEDURE)?;

    let mut sample = |x: f64| -> EvalResult<Point> { finite_point(x, f(x)?, PROCEDURE) };

    let step = (upper - lower) / f64::from(SAMPLE_INTERVALS);
    let mut points = (0..=SAMPLE_INTERVALS).map(|i| sample(lower + f64::from(i) * step))
                                           .collect::<EvalResult<Vec<_>>>()?;
    debug!("{PROCEDURE}: sampled {} points over [{lower}, {upper}]", points.len());

    for pass in 1..=REFINEMENT_PASSES {
        points = refine(&points, &mut sample)?;
        trace!("{PROCEDURE}: refinement pass {pass} left {} points", points.len());
    }

    let frame = Frame::fit(&points, PROCEDURE)?;
    let scaled = points.iter()
                       .map(|p| make_point(frame.sx(p.x), frame.sy(p.y), 0.0))
                       .collect::<Vec<_>>();

    let mut out = scaled.windows(2)
                        .map(|segment| make_line(segment[0].clone(), segment[1].clone()))
                        .collect::<Vec<_>>();

    options.push_captions(&frame, &mut out);
    frame.push_borders(&mut out);
    frame.push_extent_labels(options.text_scale, &mut out);

    Ok(Expression::list(out))
}

/// Runs one refinement pass over consecutive, non-overlapping triples.
///
/// A triple that turns by less than [`STRAIGHT_ANGLE`] at its middle point
/// keeps all of its points and gains two midpoints sampled from `sample`.
/// A nearly straight triple keeps only its first point. The last point of
/// each triple starts the next one, and points not covered by a full triple
/// are kept as they are.
fn refine<S>(points: &[Point], sample: &mut S) -> EvalResult<Vec<Point>>
    where S: FnMut(f64) -> EvalResult<Point>
{
    let mut refined = Vec::with_capacity(points.len() * 2);

    let mut i = 0;
    while i + 2 < points.len() {
        let (a, b, c) = (points[i], points[i + 1], points[i + 2]);

        if turning_angle(a, b, c) < STRAIGHT_ANGLE {
            refined.push(a);
            refined.push(sample(a.midpoint_x(b))?);
            refined.push(b);
            refined.push(sample(b.midpoint_x(c))?);
        } else {
            refined.push(a);
        }

        i += 2;
    }
    refined.extend_from_slice(&points[i..]);

    Ok(refined)
}

/// The angle at `b` in the triangle `a b c`, in degrees.
///
/// 180 means the three points are collinear with `b` between the others.
/// A degenerate triangle counts as straight.
fn turning_angle(a: Point, b: Point, c: Point) -> f64 {
    let ab = a.distance_squared(b);
    let bc = b.distance_squared(c);
    let ac = a.distance_squared(c);

    let denominator = (4.0 * ab * bc).sqrt();
    if denominator == 0.0 {
        return 180.0;
    }

    ((ab + bc - ac) / denominator).clamp(-1.0, 1.0).acos().to_degrees()
}
