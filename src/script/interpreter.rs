//! Evaluation of parsed scripts against a [`Session`].
//!
//! Only the builtins listed in [`BUILTINS`] are callable; scripts have no access
//! to the filesystem, the environment or any other host facility.

use super::parser::{Arg, BinaryOp, Expr, ExprKind, Stmt};
use crate::draw::{Drawable, Session, Shape, translate};
use crate::error::{GeometryError, ScriptError};
use crate::geometry::{Point, Ring};
use log::debug;
use std::collections::HashMap;
use std::f64::consts::PI;

/// Functions a script may call.
pub const BUILTINS: &[&str] = &[
    "Polygon",
    "Circle",
    "Rect",
    "Rectangle",
    "add",
    "subtract",
    "translate",
    "translation",
    "copy",
    "move",
    "setstyle",
    "zorder",
    "sin",
    "cos",
    "sqrt",
];

/// A script value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Number(f64),
    Str(String),
    List(Vec<Value>),
    Shape(Shape),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::None => "None",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Shape(shape) => shape.kind(),
        }
    }
}

/// Names bound by a script, in the order they were first bound.
///
/// Rebinding a name replaces its value but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    order: Vec<String>,
    values: HashMap<String, Value>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if !self.values.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.values.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over all bindings in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.order
            .iter()
            .filter_map(|name| self.values.get(name).map(|value| (name.as_str(), value)))
    }

    /// Consumes the namespace, yielding every shape binding in binding order.
    pub fn into_shapes(mut self) -> impl Iterator<Item = (String, Shape)> {
        let order = std::mem::take(&mut self.order);
        order.into_iter().filter_map(move |name| match self.values.remove(&name) {
            Some(Value::Shape(shape)) => Some((name, shape)),
            _ => None,
        })
    }
}

/// Executes statements in order, stopping at the first error.
pub struct Interpreter<'s> {
    session: &'s mut Session,
    namespace: Namespace,
}

impl<'s> Interpreter<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Self {
            session,
            namespace: Namespace::new(),
        }
    }

    pub fn run(mut self, statements: &[Stmt]) -> Result<Namespace, ScriptError> {
        for statement in statements {
            self.execute(statement)?;
        }
        Ok(self.namespace)
    }

    fn execute(&mut self, statement: &Stmt) -> Result<(), ScriptError> {
        match statement {
            Stmt::Assign { name, value, line } => {
                if BUILTINS.contains(&name.as_str()) || name == "pi" {
                    return Err(ScriptError::runtime(
                        *line,
                        format!("cannot assign to builtin '{name}'"),
                    ));
                }
                let value = self.eval(value)?;
                debug!("line {}: {} = {}", line, name, value.type_name());
                self.namespace.set(name.clone(), value);
            }
            Stmt::Expr { expr, .. } => {
                self.eval(expr)?;
            }
        }
        Ok(())
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, ScriptError> {
        let line = expr.line;
        match &expr.kind {
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),
            ExprKind::Name(name) => self.lookup(name, line),
            ExprKind::List(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            ExprKind::Neg(operand) => match self.eval(operand)? {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(ScriptError::runtime(
                    line,
                    format!("bad operand type for unary -: {}", other.type_name()),
                )),
            },
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                binary(*op, lhs, rhs, line)
            }
            ExprKind::Call { function, args } => self.call(function, args, line),
        }
    }

    fn lookup(&self, name: &str, line: usize) -> Result<Value, ScriptError> {
        if let Some(value) = self.namespace.get(name) {
            return Ok(value.clone());
        }
        match name {
            "pi" => Ok(Value::Number(PI)),
            "None" => Ok(Value::None),
            _ if BUILTINS.contains(&name) => Err(ScriptError::runtime(
                line,
                format!("'{name}' is a function and must be called"),
            )),
            _ => Err(ScriptError::runtime(line, format!("name '{name}' is not defined"))),
        }
    }

    fn call(&mut self, function: &str, args: &[Arg], line: usize) -> Result<Value, ScriptError> {
        if function == "setstyle" {
            return self.setstyle(args, line);
        }
        if let Some(arg) = args.iter().find(|a| a.keyword.is_some()) {
            return Err(ScriptError::runtime(
                line,
                format!(
                    "{function}() got an unexpected keyword argument '{}'",
                    arg.keyword.as_deref().unwrap_or_default()
                ),
            ));
        }
        if function == "move" {
            return self.move_binding(args, line);
        }

        let values = args
            .iter()
            .map(|arg| self.eval(&arg.value))
            .collect::<Result<Vec<_>, _>>()?;
        let geometry = |source| ScriptError::Geometry { line, source };

        match function {
            "Polygon" => {
                let [rings] = arity::<1>(function, values, line)?;
                let rings = rings_arg(rings, line)?;
                let polygon = self.session.polygon(rings).map_err(geometry)?;
                Ok(Value::Shape(polygon.into()))
            }
            "Circle" => {
                let [x, y, r] = numbers::<3>(function, values, line)?;
                let circle = self.session.circle(x, y, r).map_err(geometry)?;
                Ok(Value::Shape(circle.into()))
            }
            "Rect" | "Rectangle" => {
                let [x, y, w, h] = numbers::<4>(function, values, line)?;
                let rect = self.session.rect(x, y, w, h).map_err(geometry)?;
                Ok(Value::Shape(rect.into()))
            }
            "add" => {
                if values.is_empty() {
                    return Err(ScriptError::runtime(
                        line,
                        "add() takes at least 1 argument (0 given)",
                    ));
                }
                let shapes = values
                    .iter()
                    .map(|v| shape_arg(function, v, line))
                    .collect::<Result<Vec<_>, _>>()?;
                let rest: Vec<&dyn Drawable> =
                    shapes[1..].iter().map(|s| *s as &dyn Drawable).collect();
                let union = self.session.add(shapes[0], &rest).map_err(geometry)?;
                Ok(Value::Shape(union.into()))
            }
            "subtract" => {
                let [x, y] = arity::<2>(function, values, line)?;
                let x = shape_arg(function, &x, line)?;
                let y = shape_arg(function, &y, line)?;
                let difference = self.session.subtract(x, y).map_err(geometry)?;
                Ok(Value::Shape(difference.into()))
            }
            "translate" | "translation" | "copy" => {
                let [shape, dx, dy] = arity::<3>(function, values, line)?;
                let shape = shape_arg(function, &shape, line)?;
                let dx = number_arg(function, &dx, line)?;
                let dy = number_arg(function, &dy, line)?;
                let copy = finite_extent(translate(shape, dx, dy), line)?;
                Ok(Value::Shape(copy))
            }
            "zorder" => {
                arity::<0>(function, values, line)?;
                Ok(Value::Number(self.session.zorder() as f64))
            }
            "sin" | "cos" | "sqrt" => {
                let [x] = numbers::<1>(function, values, line)?;
                let result = match function {
                    "sin" => x.sin(),
                    "cos" => x.cos(),
                    _ if x < 0.0 => {
                        return Err(ScriptError::runtime(line, "math domain error"));
                    }
                    _ => x.sqrt(),
                };
                Ok(Value::Number(result))
            }
            _ => Err(ScriptError::runtime(
                line,
                format!("name '{function}' is not defined"),
            )),
        }
    }

    /// `setstyle(key=value, ...)`: updates the session default style.
    fn setstyle(&mut self, args: &[Arg], line: usize) -> Result<Value, ScriptError> {
        for arg in args {
            let Some(key) = &arg.keyword else {
                return Err(ScriptError::runtime(
                    line,
                    "setstyle() takes keyword arguments only",
                ));
            };
            let value = match self.eval(&arg.value)? {
                Value::Str(s) => s,
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(ScriptError::runtime(
                        line,
                        format!(
                            "setstyle() value for '{key}' must be a string or number, not {}",
                            other.type_name()
                        ),
                    ));
                }
            };
            self.session.set_style(key, value);
        }
        Ok(Value::None)
    }

    /// `move(name, dx, dy)`: shifts the shape bound to `name` in place.
    fn move_binding(&mut self, args: &[Arg], line: usize) -> Result<Value, ScriptError> {
        if args.len() != 3 {
            return Err(ScriptError::runtime(
                line,
                format!("move() takes 3 arguments ({} given)", args.len()),
            ));
        }
        let ExprKind::Name(name) = &args[0].value.kind else {
            return Err(ScriptError::runtime(
                line,
                "move() expects a bound name as its first argument",
            ));
        };
        let dx = self.eval(&args[1].value)?;
        let dx = number_arg("move", &dx, line)?;
        let dy = self.eval(&args[2].value)?;
        let dy = number_arg("move", &dy, line)?;

        match self.namespace.get_mut(name) {
            Some(Value::Shape(shape)) => {
                let mut moved = shape.clone();
                moved.shift(dx, dy);
                *shape = finite_extent(moved, line)?;
                Ok(Value::None)
            }
            Some(other) => Err(ScriptError::runtime(
                line,
                format!("move() expects a shape, not {}", other.type_name()),
            )),
            None => Err(ScriptError::runtime(line, format!("name '{name}' is not defined"))),
        }
    }
}

fn binary(op: BinaryOp, lhs: Value, rhs: Value, line: usize) -> Result<Value, ScriptError> {
    match (op, lhs, rhs) {
        (BinaryOp::Add, Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
        (BinaryOp::Div, Value::Number(_), Value::Number(b)) if b == 0.0 => {
            Err(ScriptError::runtime(line, "division by zero"))
        }
        (op, Value::Number(a), Value::Number(b)) => Ok(Value::Number(match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        })),
        (op, lhs, rhs) => Err(ScriptError::runtime(
            line,
            format!(
                "unsupported operand types for {}: {} and {}",
                match op {
                    BinaryOp::Add => "+",
                    BinaryOp::Sub => "-",
                    BinaryOp::Mul => "*",
                    BinaryOp::Div => "/",
                },
                lhs.type_name(),
                rhs.type_name()
            ),
        )),
    }
}

fn arity<const N: usize>(
    function: &str,
    values: Vec<Value>,
    line: usize,
) -> Result<[Value; N], ScriptError> {
    let given = values.len();
    values.try_into().map_err(|_| {
        ScriptError::runtime(
            line,
            format!("{function}() takes {N} argument(s) ({given} given)"),
        )
    })
}

fn numbers<const N: usize>(
    function: &str,
    values: Vec<Value>,
    line: usize,
) -> Result<[f64; N], ScriptError> {
    let values = arity::<N>(function, values, line)?;
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(values.iter()) {
        *slot = number_arg(function, value, line)?;
    }
    Ok(out)
}

/// Rejects a shape whose offset pushed part of it to infinity.
fn finite_extent(shape: Shape, line: usize) -> Result<Shape, ScriptError> {
    if shape.has_finite_extent() {
        return Ok(shape);
    }
    let (x, y) = shape.offset();
    Err(ScriptError::Geometry {
        line,
        source: GeometryError::NonFinite { x, y },
    })
}

fn number_arg(function: &str, value: &Value, line: usize) -> Result<f64, ScriptError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(ScriptError::runtime(
            line,
            format!("{function}() expects a number, not {}", other.type_name()),
        )),
    }
}

fn shape_arg<'v>(function: &str, value: &'v Value, line: usize) -> Result<&'v Shape, ScriptError> {
    match value {
        Value::Shape(shape) => Ok(shape),
        other => Err(ScriptError::runtime(
            line,
            format!("{function}() expects a shape, not {}", other.type_name()),
        )),
    }
}

/// Accepts a list of rings, or a single ring given directly as a list of points.
fn rings_arg(value: Value, line: usize) -> Result<Vec<Ring>, ScriptError> {
    let items = match value {
        Value::List(items) => items,
        other => {
            return Err(ScriptError::runtime(
                line,
                format!("Polygon() expects a list of rings, not {}", other.type_name()),
            ));
        }
    };

    let single_ring = items.first().is_some_and(is_point);
    let ring_values = if single_ring {
        vec![Value::List(items)]
    } else {
        items
    };

    ring_values
        .into_iter()
        .map(|ring| {
            let points = match ring {
                Value::List(points) => points,
                other => {
                    return Err(ScriptError::runtime(
                        line,
                        format!("Polygon() ring must be a list of points, not {}", other.type_name()),
                    ));
                }
            };
            let points = points
                .iter()
                .map(|p| point_arg(p, line))
                .collect::<Result<Vec<_>, _>>()?;
            Ring::new(points).map_err(|source| ScriptError::Geometry { line, source })
        })
        .collect()
}

fn is_point(value: &Value) -> bool {
    matches!(value, Value::List(xy) if xy.len() == 2 && xy.iter().all(|v| matches!(v, Value::Number(_))))
}

fn point_arg(value: &Value, line: usize) -> Result<Point, ScriptError> {
    match value {
        Value::List(xy) => match xy.as_slice() {
            [Value::Number(x), Value::Number(y)] => Ok(Point::new(*x, *y)),
            _ => Err(ScriptError::runtime(line, "a point must be a list of two numbers")),
        },
        other => Err(ScriptError::runtime(
            line,
            format!("a point must be a list of two numbers, not {}", other.type_name()),
        )),
    }
}
