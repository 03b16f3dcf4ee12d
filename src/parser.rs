//! Text front end for polynomial bodies, e.g. `x^2 - 5x + 6` or `3*x*y - y^2/2`.

use nom::branch::alt;
use nom::character::complete::{alpha1, alphanumeric0, char, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::error::VerboseError;
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;

use crate::error::{FuncError, Result};
use crate::polynomial::Polynomial;
use crate::variable::Variable;

type Parsed = Result<Polynomial>;
type PResult<'a> = IResult<&'a str, Parsed, VerboseError<&'a str>>;

pub fn parse_polynomial(input: &str) -> Result<Polynomial> {
    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, poly)) => poly,
        Err(e) => Err(FuncError::Parse(format!("{e:?}"))),
    }
}

fn parse_add_sub(input: &str) -> PResult<'_> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc: Parsed, (op, rhs): (char, Parsed)| -> Parsed {
            match op {
                '+' => Ok(acc? + rhs?),
                _ => Ok(acc? - rhs?),
            }
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> PResult<'_> {
    let (rest, init) = parse_unary(input)?;
    fold_many0(
        alt((
            pair(ws(alt((char('*'), char('/')))), parse_unary),
            // implicit product: `5x`, `2(x + 1)`, `x y`
            map(parse_factor, |f| ('*', f)),
        )),
        move || init.clone(),
        |acc: Parsed, (op, rhs): (char, Parsed)| -> Parsed {
            match op {
                '*' => acc?.try_mul(&rhs?),
                _ => divide(acc?, rhs?),
            }
        },
    )(rest)
}

fn divide(numer: Polynomial, denom: Polynomial) -> Parsed {
    match denom.constant_value() {
        Some(c) => Ok(numer.scale(1.0 / c)),
        None => Err(FuncError::not_implemented(
            "division by a non-constant polynomial",
        )),
    }
}

fn parse_unary(input: &str) -> PResult<'_> {
    if let Ok((rest, inner)) = preceded(ws(char('-')), parse_unary)(input) {
        Ok((rest, inner.map(|p| -p)))
    } else {
        parse_factor(input)
    }
}

fn parse_factor(input: &str) -> PResult<'_> {
    map(
        pair(
            parse_primary,
            opt(preceded(ws(char('^')), ws(map_res(digit1, str::parse::<u32>)))),
        ),
        |(base, exp)| match exp {
            Some(e) => base.and_then(|p| p.pow(e)),
            None => base,
        },
    )(input)
}

fn parse_primary(input: &str) -> PResult<'_> {
    alt((parse_parens, parse_number, parse_identifier))(input)
}

fn parse_parens(input: &str) -> PResult<'_> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_number(input: &str) -> PResult<'_> {
    map(
        ws(map_res(
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            str::parse::<f64>,
        )),
        |n| Ok(Polynomial::constant(n)),
    )(input)
}

fn parse_identifier(input: &str) -> PResult<'_> {
    map(ws(recognize(pair(alpha1, alphanumeric0))), |s: &str| {
        Variable::new(s).map(|v| Polynomial::variable(&v))
    })(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, VerboseError<&'a str>>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, VerboseError<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Variable {
        Variable::new("x").unwrap()
    }

    #[test]
    fn implicit_products_and_signs() {
        let p = parse_polynomial("x^2 - 5x + 6").unwrap();
        assert_eq!(p, Polynomial::from_coefficients(&x(), &[6.0, -5.0, 1.0]));
    }

    #[test]
    fn powers_expand() {
        let p = parse_polynomial("(x + 1)^2").unwrap();
        assert_eq!(p, Polynomial::from_coefficients(&x(), &[1.0, 2.0, 1.0]));
    }

    #[test]
    fn scalar_division_only() {
        assert_eq!(
            parse_polynomial("x/2").unwrap(),
            Polynomial::monomial(0.5, &x(), 1)
        );
        assert!(matches!(
            parse_polynomial("1/x"),
            Err(FuncError::NotImplemented(_))
        ));
    }

    #[test]
    fn large_exponents_do_not_overflow() {
        let p = parse_polynomial("x^2147483648").unwrap();
        assert_eq!(p.degree(), 2_147_483_648);
        assert!(matches!(
            parse_polynomial("x^4294967295 x"),
            Err(FuncError::NotImplemented(_))
        ));
        assert!(matches!(
            parse_polynomial("(x^2147483648)^2"),
            Err(FuncError::NotImplemented(_))
        ));
        assert!(matches!(parse_polynomial("x^4294967296"), Err(FuncError::Parse(_))));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(parse_polynomial("x +"), Err(FuncError::Parse(_))));
    }
}
