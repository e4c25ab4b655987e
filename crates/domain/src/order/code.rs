//! Human-readable order code generation.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Generates an order code: two random uppercase letters, the date as
/// YYMMDD, and four random digits (e.g. `KQ2608061234`).
///
/// The code is a human-facing handle, not a uniqueness guarantee;
/// collision handling belongs to the persistence layer.
pub fn generate_order_code(now: DateTime<Utc>) -> String {
    let mut rng = rand::rng();
    let letters: String = (0..2)
        .map(|_| rng.random_range(b'A'..=b'Z') as char)
        .collect();
    let digits: u16 = rng.random_range(0..10_000);
    format!("{letters}{}{digits:04}", now.format("%y%m%d"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn code_has_expected_shape() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let code = generate_order_code(now);

        assert_eq!(code.len(), 12);
        assert!(code[..2].chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(&code[2..8], "260806");
        assert!(code[8..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn codes_vary() {
        let now = Utc::now();
        let codes: std::collections::HashSet<String> =
            (0..50).map(|_| generate_order_code(now)).collect();
        // 50 draws over a 6.76M space; a single repeat would be suspicious.
        assert!(codes.len() > 40);
    }
}
