//! Random test-data generation.
//!
//! Everything here is best-effort realistic, not reproducible: there is no
//! seeding hook, matching how the suite uses the data (unique emails,
//! throwaway passwords, filler records).

use chrono::{DateTime, TimeZone, Utc};
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

const PASSWORD_SPECIALS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// A generated user record for signup/login flows.
#[derive(Clone, Debug, Serialize)]
pub struct TestUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// A generated postal address.
#[derive(Clone, Debug, Serialize)]
pub struct TestAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Random alphanumeric string of `len` characters.
pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random lowercase email under `domain`.
pub fn random_email(domain: &str) -> String {
    format!("{}@{domain}", random_string(10).to_lowercase())
}

/// Random integer in `min..=max`.
pub fn random_number(min: i64, max: i64) -> i64 {
    rand::thread_rng().gen_range(min..=max)
}

/// Random US-formatted phone number, e.g. `+1 (415) 555-0134`.
pub fn random_phone() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "+1 ({}) {}-{}",
        rng.gen_range(200..=999),
        rng.gen_range(200..=999),
        rng.gen_range(1000..=9999)
    )
}

/// Fair coin flip.
pub fn random_bool() -> bool {
    rand::thread_rng().gen_bool(0.5)
}

/// Random element of `items`, or `None` when empty.
pub fn random_item<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::thread_rng())
}

/// Random CSS hex color, e.g. `#3fa0c2`.
pub fn random_color() -> String {
    format!("#{:06x}", rand::thread_rng().gen_range(0..0x100_0000))
}

/// Random timestamp in `start..end`.
pub fn random_datetime(start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
    let span = (end - start).num_seconds().max(1);
    let offset = rand::thread_rng().gen_range(0..span);
    start + chrono::Duration::seconds(offset)
}

/// Random password of at least 4 characters.
///
/// Guarantees one uppercase letter, one lowercase letter, one digit, and one
/// special character, then shuffles so the guaranteed characters are not in a
/// predictable position. Lengths below 4 are padded up to 4.
pub fn random_password(len: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut chars: Vec<char> = vec![
        rng.gen_range(b'A'..=b'Z') as char,
        rng.gen_range(b'a'..=b'z') as char,
        rng.gen_range(b'0'..=b'9') as char,
        *PASSWORD_SPECIALS.choose(&mut rng).unwrap_or(&b'!') as char,
    ];
    while chars.len() < len.max(4) {
        let class = rng.gen_range(0u8..4);
        chars.push(match class {
            0 => rng.gen_range(b'A'..=b'Z') as char,
            1 => rng.gen_range(b'a'..=b'z') as char,
            2 => rng.gen_range(b'0'..=b'9') as char,
            _ => *PASSWORD_SPECIALS.choose(&mut rng).unwrap_or(&b'!') as char,
        });
    }
    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}

/// Random [`TestUser`] with a v4 id and a creation time after 2020.
pub fn random_user() -> TestUser {
    let epoch = Utc
        .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    TestUser {
        id: Uuid::new_v4(),
        first_name: random_string(8),
        last_name: random_string(10),
        email: random_email("example.com"),
        phone: random_phone(),
        password: random_password(12),
        created_at: random_datetime(epoch, Utc::now()),
    }
}

/// Random [`TestAddress`] in the US.
pub fn random_address() -> TestAddress {
    TestAddress {
        street: format!("{} {} St", random_number(1, 9999), random_string(8)),
        city: random_string(10),
        state: random_string(2).to_uppercase(),
        zip_code: random_number(10_000, 99_999).to_string(),
        country: "USA".to_owned(),
    }
}
