use fnsolve::{differentiate, integrate, FuncError, Function, Origin, Polynomial, Variable};

fn x() -> Variable {
    Variable::new("x").expect("variable")
}

fn f(body: &str) -> Function {
    let body: Polynomial = body.parse().expect("parse body");
    Function::polynomial("f", x(), body).expect("build function")
}

fn assert_diff_eq(input: &str, expected: &str) {
    let got = differentiate(&f(input), &x()).expect("differentiate");
    assert_eq!(got.body(), f(expected).body(), "d/dx {input}");
}

#[test]
fn constants_vanish() {
    assert_diff_eq("5", "0");
    let c = Function::constant("c", 5.0).unwrap();
    assert_eq!(c.derivative().unwrap().body(), "0");
}

#[test]
fn power_rule_term_by_term() {
    assert_diff_eq("x", "1");
    assert_diff_eq("x^3", "3x^2");
    assert_diff_eq("2x^2 + 3x", "4x + 3");
}

#[test]
fn derivative_is_primed() {
    let df = f("x^2").derivative().unwrap();
    assert_eq!(df.name(), "f'");
    assert_eq!(df.to_string(), "f'(x) = 2x");
}

#[test]
fn logarithms_and_radicals_are_not_differentiated() {
    let log = Function::log("g", 2.0, f("x")).unwrap();
    assert!(matches!(log.derivative(), Err(FuncError::NotImplemented(_))));
    let root = Function::square_root("h", f("x")).unwrap();
    assert!(matches!(root.derivative(), Err(FuncError::NotImplemented(_))));
}

#[test]
fn indefinite_integral_carries_a_constant() {
    let big_f = integrate(&f("3x^2 + 2"), &x()).unwrap();
    assert_eq!(big_f.origin(), Origin::IndefiniteIntegral);
    assert_eq!(big_f.body(), "x³ + 2x + C");
    assert_eq!(big_f.derivative().unwrap().body(), "3x² + 2");
}

#[test]
fn definite_integral_is_a_difference() {
    let area = f("x^2").definite_integral(0.0, 3.0).unwrap();
    assert!((area - 9.0).abs() < 1e-12);
    let c = Function::constant("c", 2.0).unwrap();
    assert_eq!(c.definite_integral(1.0, 4.0), Ok(6.0));
}

#[test]
fn constants_integrate_in_x() {
    let c = Function::constant("c", 3.0).unwrap();
    let big_c = c.integrate().unwrap();
    assert_eq!(big_c.variable(), &x());
    assert_eq!(big_c.body(), "3x + C");
    assert_eq!(big_c.origin(), Origin::IndefiniteIntegral);
    let t = Variable::new("t").unwrap();
    assert_eq!(c.integrate_in(&t).unwrap().body(), "3t + C");
    assert!(matches!(
        integrate(&c, &Variable::all()),
        Err(FuncError::InvalidConstruction(_))
    ));
}
