//! Sort-field dispatch over projected persons.

use std::cmp::Ordering;
use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::application::persons::types::PersonResponse;
use crate::domain::types::{SortDirection, SortField};

/// Orders two persons by one field in the given direction.
type Comparator = fn(&PersonResponse, &PersonResponse, SortDirection) -> Ordering;

static COMPARATORS: Lazy<HashMap<SortField, Comparator>> = Lazy::new(|| {
    let mut map: HashMap<SortField, Comparator> = HashMap::new();
    map.insert(SortField::Name, |a, b, dir| {
        by_text(a.name.as_deref(), b.name.as_deref(), dir)
    });
    map.insert(SortField::Email, |a, b, dir| {
        by_text(a.email.as_deref(), b.email.as_deref(), dir)
    });
    map.insert(SortField::DateOfBirth, |a, b, dir| {
        nulls_last(a.date_of_birth, b.date_of_birth, dir)
    });
    map.insert(SortField::Age, |a, b, dir| nulls_last(a.age, b.age, dir));
    map.insert(SortField::Gender, |a, b, dir| {
        by_text(a.gender.as_deref(), b.gender.as_deref(), dir)
    });
    map.insert(SortField::Country, |a, b, dir| {
        by_text(a.country.as_deref(), b.country.as_deref(), dir)
    });
    map.insert(SortField::Address, |a, b, dir| {
        by_text(a.address.as_deref(), b.address.as_deref(), dir)
    });
    map.insert(SortField::ReceiveNewsletters, |a, b, dir| {
        directed(a.receive_newsletters.cmp(&b.receive_newsletters), dir)
    });
    map
});

/// Stable sort of `persons` by `field`. Without a field, or for a field with no
/// registered comparator, the input comes back unchanged.
pub fn sort_persons(
    mut persons: Vec<PersonResponse>,
    field: Option<SortField>,
    direction: SortDirection,
) -> Vec<PersonResponse> {
    let Some(compare) = field.and_then(|field| COMPARATORS.get(&field)) else {
        return persons;
    };
    persons.sort_by(|a, b| compare(a, b, direction));
    persons
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Absent values go after present ones whichever the direction.
fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_text(a: Option<&str>, b: Option<&str>, direction: SortDirection) -> Ordering {
    nulls_last(a.map(CaseFolded), b.map(CaseFolded), direction)
}

/// Ordinal comparison of the upper-cased characters, so punctuation between
/// `Z` and `a` (such as `_`) sorts after letters.
struct CaseFolded<'a>(&'a str);

impl PartialEq for CaseFolded<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CaseFolded<'_> {}

impl Ord for CaseFolded<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .chars()
            .flat_map(char::to_uppercase)
            .cmp(other.0.chars().flat_map(char::to_uppercase))
    }
}

impl PartialOrd for CaseFolded<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
