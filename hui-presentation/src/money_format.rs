use hui_domain::Money;

/// Groups the integer part by thousands and trims trailing fractional zeros.
pub fn format_money(amount: Money) -> String {
    let value = amount.as_decimal().normalize();
    let negative = value.is_sign_negative() && !value.is_zero();
    let digits = value.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
