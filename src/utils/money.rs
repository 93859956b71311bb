//! Price input helpers (Brazilian real, comma as decimal separator)

/// Reshape typed text into a `"{reais},{centavos}"` price as the user types.
///
/// Digits are read as centavos, so `"8500"` becomes `"85,00"` and `"5"` becomes
/// `"0,05"`. Returns `""` when no digit was typed.
pub fn apply_price_mask(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }

    let padded = format!("{:0>3}", digits);
    let (int_part, frac_part) = padded.split_at(padded.len() - 2);
    let int_part = int_part.trim_start_matches('0');
    format!("{},{}", if int_part.is_empty() { "0" } else { int_part }, frac_part)
}

/// Parse a typed or formatted price into centavos.
///
/// Accepts `"85,00"`, `"1.250,50"`, `"R$ 85,00"` and `"85"`. Thousands dots are
/// ignored and at most two decimal digits are allowed.
pub fn parse_price(input: &str) -> Option<i64> {
    let cleaned = input.trim().trim_start_matches("R$").trim().replace('.', "");
    if cleaned.is_empty() {
        return None;
    }

    let (reais, centavos) = match cleaned.split_once(',') {
        Some((reais, centavos)) => (reais, centavos),
        None => (cleaned.as_str(), ""),
    };
    if reais.is_empty()
        || !reais.bytes().all(|b| b.is_ascii_digit())
        || centavos.len() > 2
        || !centavos.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let reais: i64 = reais.parse().ok()?;
    let centavos: i64 = if centavos.is_empty() {
        0
    } else {
        format!("{:0<2}", centavos).parse().ok()?
    };
    reais.checked_mul(100)?.checked_add(centavos)
}

/// Format centavos as `"R$ 85,00"`
pub fn format_price(cents: i64) -> String {
    format!("R$ {}", format_price_value(cents))
}

/// Format centavos as the bare form value `"85,00"`
pub fn format_price_value(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{}{},{:02}", sign, cents / 100, cents % 100)
}

/// Centavos to the decimal amount the backend stores
pub fn cents_to_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Decimal amount back to centavos, rounding to the nearest centavo
pub fn amount_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
