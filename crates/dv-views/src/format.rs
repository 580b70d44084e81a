//! Number formatting for labels

/// Integer with thousands separators: `12345` → `12,345`
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fraction as a percentage with one decimal: `0.1234` → `12.3%`
pub fn format_percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}
