use crate::models::Unit;

/// Currency symbol prefixed to amounts.
pub const CURRENCY_SYMBOL: &str = "฿";

const MISSING: &str = "—";

/// Fixed decimals with comma thousands separators. Non-finite renders as "—".
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }

    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    // "-0.00" reads as noise; only sign values that survive rounding.
    let is_zero = raw.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// "฿1,234.56"
pub fn format_currency(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_number(amount, 2))
}

/// "฿1,235"
pub fn format_currency_whole(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_number(amount, 0))
}

/// "85.5%"
pub fn format_percentage(value: f64) -> String {
    format!("{}%", format_number(value, 1))
}

/// "1.50 kg"
pub fn format_quantity_short(quantity: f64, unit: Unit) -> String {
    if !quantity.is_finite() {
        return format!("{} {}", MISSING, unit);
    }
    format!("{} {}", format_number(quantity, 2), unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(1234.567, 2), "1,234.57");
        assert_eq!(format_number(1234.567, 0), "1,235");
        assert_eq!(format_number(999.0, 2), "999.00");
        assert_eq!(format_number(1_000_000.0, 0), "1,000,000");
        assert_eq!(format_number(-4321.0, 1), "-4,321.0");
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_number(f64::NAN, 2), "—");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56), "฿1,234.56");
        assert_eq!(format_currency_whole(1234.56), "฿1,235");
        assert_eq!(format_currency(f64::INFINITY), "฿—");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(85.5), "85.5%");
        assert_eq!(format_percentage(132.04), "132.0%");
        assert_eq!(format_percentage(f64::NAN), "—%");
    }

    #[test]
    fn test_format_quantity_short() {
        assert_eq!(format_quantity_short(1.5, Unit::Kg), "1.50 kg");
        assert_eq!(format_quantity_short(500.0, Unit::G), "500.00 g");
        assert_eq!(format_quantity_short(f64::NAN, Unit::Ml), "— ml");
    }
}
