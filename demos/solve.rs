use fnsolve::prelude::{inequality, inequality_summary, solve_equation, solve_summary};

fn main() {
    let _ = tracing_subscriber::fmt().try_init();

    match solve_equation("x^3 - 6x^2 + 11x - 6", "0") {
        Ok(solved) => println!("{}", solve_summary(&solved).join("\n")),
        Err(err) => eprintln!("could not solve: {err}"),
    }

    match inequality("x^2 - 1", ">=", "0") {
        Ok(solved) => println!("{}", inequality_summary(&solved).join("\n")),
        Err(err) => eprintln!("could not solve: {err}"),
    }
}
