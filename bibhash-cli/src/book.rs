//! Book records with reservation and due-date handling
//!
//! A book's hash is the byte sum of its name, its author or both,
//! selected once by the search mode; the engine sees nothing else.

use std::fmt;

use bibhash_core::HashKey;
use chrono::{Duration, NaiveDate};

/// Date format used everywhere in the catalog
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Length of one lending period in days
pub const LOAN_DAYS: i64 = 30;

/// Days between placing a reservation and picking the book up
const PICKUP_DELAY_DAYS: i64 = 3;

/// Which fields feed a book's hash value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    Name,
    Author,
    NameAndAuthor,
}

impl SearchMode {
    fn hash_of(self, name: &str, author: &str) -> u64 {
        let byte_sum = |s: &str| s.bytes().map(u64::from).sum::<u64>();
        match self {
            SearchMode::Name => byte_sum(name),
            SearchMode::Author => byte_sum(author),
            SearchMode::NameAndAuthor => byte_sum(name) + byte_sum(author),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Name => write!(f, "Name"),
            SearchMode::Author => write!(f, "Author"),
            SearchMode::NameAndAuthor => write!(f, "Name and Author"),
        }
    }
}

/// One reservation held on a book
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    pub holder: String,
    pub start_date: NaiveDate,
    pub return_date: NaiveDate,
}

/// A catalog entry
#[derive(Clone, Debug)]
pub struct Book {
    name: String,
    author: String,
    price: f64,
    hash: u64,
    reservations: Vec<Reservation>,
}

impl Book {
    /// Create a book, fixing its hash from the search mode
    pub fn new(name: String, author: String, price: f64, mode: SearchMode) -> Self {
        let hash = mode.hash_of(&name, &author);
        Book {
            name,
            author,
            price,
            hash,
            reservations: Vec::new(),
        }
    }

    /// Lookup key carrying only the fields that matter for hashing
    pub fn probe(name: &str, author: &str, mode: SearchMode) -> Self {
        Book::new(name.to_string(), author.to_string(), 0.0, mode)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// A book is available while nobody holds a reservation on it
    pub fn is_available(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Attach an already-dated reservation (used when loading the catalog)
    pub fn add_reservation(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    /// Reserve the book for `holder` counting from `today`.
    ///
    /// A first reservation starts after the pickup delay; a holder who
    /// already has one queues after their previous return date. Returns
    /// the reservation that was recorded.
    pub fn reserve(&mut self, holder: &str, today: NaiveDate) -> Reservation {
        let start_date = match self.reservations.iter().rev().find(|r| r.holder == holder) {
            Some(previous) => previous.return_date,
            None => today + Duration::days(PICKUP_DELAY_DAYS),
        };
        let reservation = Reservation {
            holder: holder.to_string(),
            start_date,
            return_date: start_date + Duration::days(LOAN_DAYS),
        };
        self.reservations.push(reservation.clone());
        reservation
    }

    /// Push `holder`'s return date later; earlier dates are rejected
    pub fn extend_return_date(&mut self, holder: &str, new_date: NaiveDate) -> bool {
        match self.reservations.iter_mut().find(|r| r.holder == holder) {
            Some(reservation) if new_date > reservation.return_date => {
                reservation.return_date = new_date;
                true
            }
            _ => false,
        }
    }
}

/// Books compare by name, matching how the catalog is searched
impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl HashKey for Book {
    fn hash_value(&self) -> u64 {
        self.hash
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} -> {:.2}€", self.name, self.author, self.price)
    }
}
