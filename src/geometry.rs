//! Plane shapes with the usual polygon measurements. Unrelated to the solver core.

use std::f64::consts::PI;
use std::fmt;

use crate::error::{FuncError, Result};
use crate::format::pretty_number;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle { radius: f64 },
    Triangle { sides: [f64; 3] },
    Rectangle { width: f64, height: f64 },
    Square { side: f64 },
}

fn positive(what: &str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite() && *v > 0.0) {
        Ok(())
    } else {
        Err(FuncError::invalid(format!(
            "{what} sides must be positive, got {values:?}"
        )))
    }
}

impl Shape {
    pub fn circle(radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(FuncError::invalid(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        Ok(Shape::Circle { radius })
    }

    /// Requires exactly three positive sides satisfying the triangle inequality.
    pub fn triangle(sides: &[f64]) -> Result<Self> {
        let sides: [f64; 3] = sides.try_into().map_err(|_| {
            FuncError::invalid(format!("a triangle has 3 sides, got {}", sides.len()))
        })?;
        positive("triangle", &sides)?;
        let [a, b, c] = sides;
        if a + b <= c || a + c <= b || b + c <= a {
            return Err(FuncError::invalid(format!(
                "sides {a}, {b}, {c} violate the triangle inequality"
            )));
        }
        Ok(Shape::Triangle { sides })
    }

    /// Accepts `[width, height]`, or four sides where opposite sides match.
    pub fn rectangle(sides: &[f64]) -> Result<Self> {
        let (width, height) = match *sides {
            [w, h] => (w, h),
            [a, b, c, d] if a == c && b == d => (a, b),
            [_, _, _, _] => {
                return Err(FuncError::invalid(
                    "opposite rectangle sides must be equal",
                ))
            }
            _ => {
                return Err(FuncError::invalid(format!(
                    "a rectangle takes 2 or 4 sides, got {}",
                    sides.len()
                )))
            }
        };
        positive("rectangle", &[width, height])?;
        Ok(Shape::Rectangle { width, height })
    }

    pub fn square(side: f64) -> Result<Self> {
        positive("square", &[side])?;
        Ok(Shape::Square { side })
    }

    pub fn area(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => PI * radius * radius,
            Shape::Triangle { sides: [a, b, c] } => {
                // Heron
                let s = (a + b + c) / 2.0;
                (s * (s - a) * (s - b) * (s - c)).sqrt()
            }
            Shape::Rectangle { width, height } => width * height,
            Shape::Square { side } => side * side,
        }
    }

    pub fn perimeter(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => 2.0 * PI * radius,
            _ => self.sides().iter().sum(),
        }
    }

    /// Side lengths in order; a circle has none.
    pub fn sides(&self) -> Vec<f64> {
        match *self {
            Shape::Circle { .. } => Vec::new(),
            Shape::Triangle { sides } => sides.to_vec(),
            Shape::Rectangle { width, height } => vec![width, height, width, height],
            Shape::Square { side } => vec![side; 4],
        }
    }

    /// Interior angles in degrees, opposite each side for a triangle.
    pub fn angles(&self) -> Vec<f64> {
        match *self {
            Shape::Circle { .. } => Vec::new(),
            Shape::Triangle { sides: [a, b, c] } => {
                let opposite = |x: f64, y: f64, z: f64| {
                    ((y * y + z * z - x * x) / (2.0 * y * z))
                        .clamp(-1.0, 1.0)
                        .acos()
                        .to_degrees()
                };
                vec![opposite(a, b, c), opposite(b, a, c), opposite(c, a, b)]
            }
            Shape::Rectangle { .. } | Shape::Square { .. } => vec![90.0; 4],
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Circle { radius } => write!(f, "circle(r = {})", pretty_number(*radius)),
            Shape::Triangle { sides } => {
                let sides: Vec<String> = sides.iter().map(|s| pretty_number(*s)).collect();
                write!(f, "triangle({})", sides.join(", "))
            }
            Shape::Rectangle { width, height } => write!(
                f,
                "rectangle({} × {})",
                pretty_number(*width),
                pretty_number(*height)
            ),
            Shape::Square { side } => write!(f, "square({})", pretty_number(*side)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_measurements() {
        let r = Shape::rectangle(&[2.0, 3.0]).unwrap();
        assert_eq!(r.area(), 6.0);
        assert_eq!(r.perimeter(), 10.0);
        assert_eq!(r.sides(), vec![2.0, 3.0, 2.0, 3.0]);
    }

    #[test]
    fn right_triangle_by_heron() {
        let t = Shape::triangle(&[3.0, 4.0, 5.0]).unwrap();
        assert!((t.area() - 6.0).abs() < 1e-12);
        assert_eq!(t.perimeter(), 12.0);
        let angles = t.angles();
        assert!((angles[2] - 90.0).abs() < 1e-9);
        assert!((angles.iter().sum::<f64>() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn bad_construction() {
        assert!(matches!(
            Shape::triangle(&[1.0, 2.0]),
            Err(FuncError::InvalidConstruction(_))
        ));
        assert!(Shape::triangle(&[1.0, 1.0, 3.0]).is_err());
        assert!(Shape::rectangle(&[2.0, -3.0]).is_err());
        assert!(Shape::square(0.0).is_err());
        assert!(Shape::circle(f64::NAN).is_err());
    }

    #[test]
    fn circle_has_no_sides() {
        let c = Shape::circle(1.0).unwrap();
        assert!(c.sides().is_empty());
        assert!((c.perimeter() - 2.0 * PI).abs() < 1e-12);
    }
}
