//! Display helpers shared by the screens.

/// `m:ss`; empty for unknown or zero durations.
pub fn duration(seconds: Option<u32>) -> String {
    match seconds {
        None | Some(0) => String::new(),
        Some(s) => format!("{}:{:02}", s / 60, s % 60),
    }
}

/// `$12.50`
pub fn dollars(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// `1,234,567`
pub fn thousands(value: u64) -> String {
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

pub fn hours(value: f64) -> String {
    format!("{:.1}h", value)
}

pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}
