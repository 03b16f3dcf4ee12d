use fnsolve::prelude::{diff, inte};

fn main() {
    let body = "x^3 - 2x + 7";
    let var = "x";

    match diff(body, var) {
        Ok(result) => println!("d/d{var} {body} = {result}"),
        Err(err) => eprintln!("cannot differentiate {body}: {err}"),
    }
    match inte(body, var) {
        Ok(result) => println!("∫ {body} d{var} = {result}"),
        Err(err) => eprintln!("cannot integrate {body}: {err}"),
    }
}
