use crate::format::pretty_number;
use crate::solver::{Multiplicity, SolvedEquation, SolvedInequality};

/// Render a solved equation into human-readable lines for demos.
pub fn solve_summary(solved: &SolvedEquation) -> Vec<String> {
    let mut lines = vec![format!("{} = {}", solved.left().body(), solved.right().body())];
    if solved.has_infinitely_many() {
        lines.push("Infinitely many solutions (every real number).".to_string());
        return lines;
    }
    if solved.solutions().is_empty() {
        lines.push("No real solutions.".to_string());
        return lines;
    }
    let var = if solved.left().variable().is_all() {
        solved.right().variable()
    } else {
        solved.left().variable()
    };
    for (range, multiplicity) in solved.solutions() {
        let value = match range.as_point() {
            Some(x) => format!("{var} = {}", pretty_number(x)),
            None => range.to_string(),
        };
        match multiplicity {
            Multiplicity::Count(1) => lines.push(value),
            Multiplicity::Count(n) => lines.push(format!("{value} (multiplicity {n})")),
            Multiplicity::Infinite => lines.push(format!("{value} (every point)")),
        }
    }
    lines
}

pub fn inequality_summary(solved: &SolvedInequality) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} {}",
        solved.left().body(),
        solved.op(),
        solved.right().body()
    )];
    if solved.solution().is_empty() {
        lines.push("No real solutions.".to_string());
    } else {
        lines.extend(solved.solution().iter().map(ToString::to_string));
    }
    lines
}
