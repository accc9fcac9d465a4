//! Cache key definitions and glob matching.

use uuid::Uuid;

/// Every country, projected for callers.
pub const COUNTRIES_ALL: &str = "countries:all";
/// Every stored person record.
pub const PERSONS_ALL: &str = "persons:all";
/// Matches every person entry, list and single-record alike.
pub const PERSONS_PATTERN: &str = "persons:*";

pub fn person_by_id(id: Uuid) -> String {
    format!("persons:id:{id}")
}

/// Anchored glob match where `*` stands for any run of characters, including none.
///
/// Comparison ignores ASCII case.
pub fn glob_matches(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();
    let key: Vec<char> = key.chars().map(|c| c.to_ascii_lowercase()).collect();

    let (mut p, mut k) = (0, 0);
    // Last `*` seen and the key position it is currently absorbing up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while k < key.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, k));
                p += 1;
            }
            Some(c) if *c == key[k] => {
                p += 1;
                k += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    k = absorbed + 1;
                    backtrack = Some((star, absorbed + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
