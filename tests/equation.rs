use fnsolve::prelude::solve;
use fnsolve::{
    Equation, FuncError, Function, Multiplicity, Polynomial, Range, SolvedEquation, Solutions,
    SolverConfig, Variable,
};

fn x() -> Variable {
    Variable::new("x").expect("variable")
}

fn f(name: &str, body: &str) -> Function {
    let body: Polynomial = body.parse().expect("parse body");
    Function::polynomial(name, x(), body).expect("build function")
}

fn c(value: f64) -> Function {
    Function::constant("c", value).expect("constant")
}

fn points(solved: &SolvedEquation) -> Vec<f64> {
    solved
        .solutions()
        .keys()
        .filter_map(Range::as_point)
        .collect()
}

fn assert_points(got: &[f64], expected: &[f64]) {
    assert_eq!(got.len(), expected.len(), "{got:?} vs {expected:?}");
    for (g, e) in got.iter().zip(expected) {
        assert!((g - e).abs() < 1e-9, "{got:?} vs {expected:?}");
    }
}

#[test]
fn quadratic_against_zero() {
    let solved = Equation::new(f("f", "x^2 - 5x + 6"), c(0.0)).solve().unwrap();
    let expected: Solutions = [
        (Range::point(2.0), Multiplicity::Count(1)),
        (Range::point(3.0), Multiplicity::Count(1)),
    ]
    .into_iter()
    .collect();
    assert_eq!(solved.solutions(), &expected);
    assert_eq!(solved.to_string(), "x² - 5x + 6 = 0: {[2, 2] → 1, [3, 3] → 1}");
}

#[test]
fn linear_through_the_string_api() {
    assert_eq!(solve("2x + 4", "0").unwrap(), "{[-2, -2] → 1}");
}

#[test]
fn identical_sides_hold_everywhere() {
    let solved = Equation::new(f("f", "x^2"), f("g", "x^2")).solve().unwrap();
    assert!(solved.has_infinitely_many());
    assert_eq!(solved.solutions().get(&Range::All), Some(&Multiplicity::Infinite));
    assert_eq!(Multiplicity::Infinite.value(), -1);
}

#[test]
fn constants_are_all_or_nothing() {
    assert!(Equation::new(c(3.0), c(3.0)).solve().unwrap().has_infinitely_many());
    assert!(Equation::new(c(3.0), c(4.0)).solve().unwrap().solutions().is_empty());
}

#[test]
fn constant_on_the_left_is_moved() {
    let solved = Equation::new(c(9.0), f("f", "x^2")).solve().unwrap();
    assert_points(&points(&solved), &[-3.0, 3.0]);
}

#[test]
fn repeated_roots_report_multiplicity() {
    let solved = Equation::new(f("f", "x^2 - 2x + 1"), c(0.0)).solve().unwrap();
    assert_eq!(
        solved.solutions().values().copied().collect::<Vec<_>>(),
        vec![Multiplicity::Count(2)]
    );
    let cubic = Equation::new(f("f", "x^3 - 4x^2 + 5x - 2"), c(0.0)).solve().unwrap();
    assert_points(&points(&cubic), &[1.0, 2.0]);
    let multiplicities: Vec<i32> = cubic.solutions().values().map(|m| m.value()).collect();
    assert_eq!(multiplicities, vec![2, 1]);
}

#[test]
fn cubic_with_three_roots() {
    let solved = Equation::new(f("f", "x^3 - 6x^2 + 11x"), c(6.0)).solve().unwrap();
    assert_points(&points(&solved), &[1.0, 2.0, 3.0]);
}

#[test]
fn no_real_roots() {
    let solved = Equation::new(f("f", "x^2 + 1"), c(0.0)).solve().unwrap();
    assert!(solved.solutions().is_empty());
}

#[test]
fn quartic_is_not_implemented() {
    let err = Equation::new(f("f", "x^4"), c(1.0)).solve().unwrap_err();
    assert!(matches!(err, FuncError::NotImplemented(_)));
}

#[test]
fn logarithm_equals_constant() {
    let log = Function::log("g", 2.0, f("f", "x")).unwrap();
    let solved = Equation::new(log, c(3.0)).solve().unwrap();
    assert_points(&points(&solved), &[8.0]);

    let shifted = Function::log("g", 10.0, f("f", "x - 1")).unwrap();
    let solved = Equation::new(c(2.0), shifted).solve().unwrap();
    assert_points(&points(&solved), &[101.0]);
}

#[test]
fn logarithm_against_polynomial_is_not_implemented() {
    let log = Function::natural_log("g", f("f", "x")).unwrap();
    let err = Equation::new(log, f("h", "x")).solve().unwrap_err();
    assert!(matches!(err, FuncError::NotImplemented(_)));
}

#[test]
fn square_root_equals_constant() {
    let root = Function::square_root("g", f("f", "x + 1")).unwrap();
    let solved = Equation::new(root, c(3.0)).solve().unwrap();
    assert_points(&points(&solved), &[8.0]);
}

#[test]
fn square_roots_equate_bodies() {
    let left = Function::square_root("g", f("f", "x + 1")).unwrap();
    let right = Function::square_root("h", f("f", "2x")).unwrap();
    let solved = Equation::new(left, right).solve().unwrap();
    assert_points(&points(&solved), &[1.0]);
}

#[test]
fn squaring_keeps_extraneous_roots_unless_strict() {
    let equation = Equation::new(
        Function::square_root("g", f("f", "x")).unwrap(),
        f("h", "x - 2"),
    );
    assert_points(&points(&equation.solve().unwrap()), &[1.0, 4.0]);
    let strict = equation.solve_with(&SolverConfig::strict()).unwrap();
    assert_points(&points(&strict), &[4.0]);
}

#[test]
fn higher_roots_are_not_implemented() {
    let cube = Function::radical("g", 3, f("f", "x")).unwrap();
    let err = Equation::new(cube, c(2.0)).solve().unwrap_err();
    assert!(matches!(err, FuncError::NotImplemented(_)));
}

#[test]
fn two_variables_are_not_implemented() {
    let y = Variable::new("y").unwrap();
    let g = Function::polynomial("g", y.clone(), Polynomial::variable(&y)).unwrap();
    let err = Equation::new(f("f", "x"), g).solve().unwrap_err();
    assert!(matches!(err, FuncError::NotImplemented(_)));
}

#[test]
fn close_roots_are_not_collapsed() {
    let solved = Equation::new(f("f", "x^3 - 0.0001x"), c(0.0)).solve().unwrap();
    assert_points(&points(&solved), &[-0.01, 0.0, 0.01]);
    assert!(solved.solutions().values().all(|m| *m == Multiplicity::Count(1)));
}

#[test]
fn huge_exponents_parse_but_do_not_solve() {
    let solved = Equation::new(f("f", "x^2147483648"), c(1.0)).solve();
    assert!(matches!(solved, Err(FuncError::NotImplemented(msg)) if msg.contains("2147483648")));
    let overflow = "x^4294967295 * x".parse::<Polynomial>();
    assert!(matches!(overflow, Err(FuncError::NotImplemented(_))));
}

#[test]
fn solving_twice_gives_the_same_answer() {
    let equation = Equation::new(f("f", "x^3 - 4x^2 + 5x - 2"), c(0.0));
    let first = equation.solve().unwrap();
    let second = equation.solve().unwrap();
    assert_eq!(first, second);
    assert_eq!(equation.solve().unwrap().solutions(), first.solutions());
}
