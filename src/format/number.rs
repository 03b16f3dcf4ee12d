/// Integers print without a fractional part; everything else is rounded to two decimals.
pub fn pretty_number(value: f64) -> String {
    if value == f64::INFINITY {
        return "∞".to_string();
    }
    if value == f64::NEG_INFINITY {
        return "-∞".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded + 0.0)
    } else {
        let text = format!("{rounded:.2}");
        text.trim_end_matches('0').to_string()
    }
}

pub fn superscript(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            _ => '⁹',
        })
        .collect()
}

pub fn subscript(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '0' => '₀',
            '1' => '₁',
            '2' => '₂',
            '3' => '₃',
            '4' => '₄',
            '5' => '₅',
            '6' => '₆',
            '7' => '₇',
            '8' => '₈',
            _ => '₉',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(pretty_number(2.0), "2");
        assert_eq!(pretty_number(-0.0), "0");
        assert_eq!(pretty_number(1.0 / 3.0), "0.33");
        assert_eq!(pretty_number(2.5), "2.5");
        assert_eq!(pretty_number(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn superscripts() {
        assert_eq!(superscript(2), "²");
        assert_eq!(superscript(10), "¹⁰");
    }
}
