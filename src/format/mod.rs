use rand::Rng;

const FEET_PER_MILE: f64 = 5280.0;
const TRACKING_PREFIX: &str = "EPYC";
const TRACKING_SUFFIX_LEN: usize = 4;
const BASE36_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

/// Short hops read better in feet; everything from a tenth of a mile up is
/// shown in miles.
pub fn format_distance(miles: f64) -> String {
    if miles < 0.1 {
        let feet = (miles.max(0.0) * FEET_PER_MILE).round() as i64;
        format!("{feet} ft")
    } else {
        format!("{miles:.1} mi")
    }
}

pub fn format_duration(minutes: u32) -> String {
    if minutes <= 60 {
        return format!("{minutes} min");
    }

    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{hours} hr")
    } else {
        format!("{hours} hr {rest} min")
    }
}

/// Opaque tracking code: prefix + base36 millis + 4 random characters.
/// Uniqueness is best-effort; the persistence layer's unique constraint
/// catches the rare collision.
pub fn generate_tracking_number() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TRACKING_SUFFIX_LEN)
        .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
        .collect();

    format!("{TRACKING_PREFIX}{}{suffix}", to_base36(millis))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}
