/// Format a float as a rupee amount with Indian digit grouping: 12,34,567.89
///
/// No currency symbol; templates add their own.
pub fn money(val: f64) -> String {
    let val = if val.is_finite() { val } else { 0.0 };
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = val < 0.0 && fixed.chars().any(|c| c != '0' && c != '.');

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        // First group of three, then groups of two.
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{grouped}.{dec_part}")
    } else {
        format!("{grouped}.{dec_part}")
    }
}

/// Plain number with up to three decimals and no trailing zeros: 2.5, 10, 0.125
pub fn number(val: f64) -> String {
    let val = if val.is_finite() { val } else { 0.0 };
    let fixed = format!("{:.3}", val);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Quantity followed by its unit: "2.5 kg"
pub fn quantity(qty: f64, unit: &str) -> String {
    let unit = unit.trim();
    if unit.is_empty() {
        number(qty)
    } else {
        format!("{} {unit}", number(qty))
    }
}

/// Phone number as digits, keeping a leading `+`. Length is not assumed.
pub fn phone(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    let raw = raw.trim();
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return "-".to_string();
    }
    if raw.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}

/// Invoice date as DD/MM/YYYY. Unparseable dates are shown as given.
pub fn date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(d) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

// ---------------------------------------------------------------------------
// Amount in words
// ---------------------------------------------------------------------------

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

fn below_hundred(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

fn below_thousand(n: u64) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, r) => below_hundred(r),
        (h, 0) => format!("{} Hundred", ONES[h as usize]),
        (h, r) => format!("{} Hundred {}", ONES[h as usize], below_hundred(r)),
    }
}

/// Words for a whole number on the Indian scale. Zero yields an empty string.
fn integer_words(n: u128) -> String {
    let crore = n / 10_000_000;
    let lakh = ((n / 100_000) % 100) as u64;
    let thousand = ((n / 1_000) % 100) as u64;
    let rest = (n % 1_000) as u64;

    let mut parts: Vec<String> = Vec::new();
    if crore > 0 {
        parts.push(format!("{} Crore", integer_words(crore)));
    }
    if lakh > 0 {
        parts.push(format!("{} Lakh", below_hundred(lakh)));
    }
    if thousand > 0 {
        parts.push(format!("{} Thousand", below_hundred(thousand)));
    }
    if rest > 0 {
        parts.push(below_thousand(rest));
    }
    parts.join(" ")
}

/// Amount in words using lakh and crore: 123456.5 → "One Lakh Twenty Three
/// Thousand Four Hundred Fifty Six and Fifty Paise".
///
/// Paise are counted in a `u128`, so amounts up to about 3.4e36 rupees are
/// spelled exactly; anything larger is clamped to that bound.
pub fn amount_in_words(amount: f64) -> String {
    let amount = if amount.is_finite() { amount.abs() } else { 0.0 };
    let total_paise = (amount * 100.0).round().min(u128::MAX as f64) as u128;
    let rupees = total_paise / 100;
    let paise = (total_paise % 100) as u64;

    let mut words = if rupees == 0 {
        "Zero".to_string()
    } else {
        integer_words(rupees)
    };
    if paise > 0 {
        words.push_str(&format!(" and {} Paise", below_hundred(paise)));
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234567.89), "12,34,567.89");
        assert_eq!(money(1234.56), "1,234.56");
        assert_eq!(money(-500.00), "-500.00");
        assert_eq!(money(0.0), "0.00");
        assert_eq!(money(100000.0), "1,00,000.00");
        assert_eq!(money(12345678901.5), "12,34,56,78,901.50");
        assert_eq!(money(999.999), "1,000.00");
        assert_eq!(money(-0.001), "0.00");
        assert_eq!(money(f64::NAN), "0.00");
    }

    #[test]
    fn test_quantity_formatting() {
        assert_eq!(quantity(2.5, "kg"), "2.5 kg");
        assert_eq!(quantity(2.0, "piece"), "2 piece");
        assert_eq!(quantity(0.125, "litre"), "0.125 litre");
        assert_eq!(quantity(3.0, " "), "3");
        assert_eq!(number(10.0), "10");
        assert_eq!(number(-0.0001), "0");
    }

    #[test]
    fn test_phone_formatting() {
        assert_eq!(phone(None), "-");
        assert_eq!(phone(Some("   ")), "-");
        assert_eq!(phone(Some("98765 43210")), "9876543210");
        assert_eq!(phone(Some("+1 (415) 555-0100")), "+14155550100");
        assert_eq!(phone(Some("022-2345678")), "0222345678");
    }

    #[test]
    fn test_date_formatting() {
        assert_eq!(date(Some("2024-03-31")), "31/03/2024");
        assert_eq!(date(Some("2024-03-31T10:15:00+05:30")), "31/03/2024");
        assert_eq!(date(Some("31 March")), "31 March");
        assert_eq!(date(None), "-");
        assert_eq!(date(Some("")), "-");
    }

    #[test]
    fn test_amount_in_words() {
        assert_eq!(amount_in_words(0.0), "Zero");
        assert_eq!(amount_in_words(7.0), "Seven");
        assert_eq!(amount_in_words(236.0), "Two Hundred Thirty Six");
        assert_eq!(amount_in_words(1000.0), "One Thousand");
        assert_eq!(
            amount_in_words(123456.5),
            "One Lakh Twenty Three Thousand Four Hundred Fifty Six and Fifty Paise"
        );
        assert_eq!(amount_in_words(10_000_000.0), "One Crore");
        assert_eq!(
            amount_in_words(1_234_567_890.0),
            "One Hundred Twenty Three Crore Forty Five Lakh Sixty Seven Thousand Eight Hundred Ninety"
        );
        assert_eq!(amount_in_words(0.05), "Zero and Five Paise");
        assert_eq!(amount_in_words(-20.0), "Twenty");
    }

    #[test]
    fn test_amount_in_words_beyond_u64_paise() {
        // 1e20 rupees is 1e22 paise, past u64::MAX.
        assert_eq!(amount_in_words(1e20), "Ten Lakh Crore Crore");
        assert_eq!(amount_in_words(2e17), "Two Thousand Crore Crore");
        assert!(amount_in_words(f64::MAX).ends_with("and Fifty Five Paise"));
    }
}
