//! Pipe-delimited catalog persistence
//!
//! `library.dat` layout: two header lines, then one row per stored book:
//!
//! ```text
//! Name | Author | Status | Price | Reservations
//! ------------------------------------------------------
//! Dune | Frank Herbert | Reserved | 9.95€ | Ana @ 03/04/2024
//! ```
//!
//! Reservation cells are `holder @ return-date` joined by `, `, or `-`
//! when the book is available. Malformed rows fail here, at the parsing
//! boundary; the engine only ever receives well-formed books.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use bibhash_core::Table;
use chrono::{Duration, NaiveDate};
use log::info;

use crate::book::{Book, Reservation, SearchMode, DATE_FORMAT, LOAN_DAYS};

const HEADER: &str = "Name | Author | Status | Price | Reservations";
const SEPARATOR: &str = "------------------------------------------------------";

/// Error type for catalog file handling
#[derive(Debug)]
pub enum CatalogError {
    Io(io::Error),
    MissingField { line: usize },
    InvalidPrice { line: usize, value: String },
    InvalidDate { line: usize, value: String },
}

impl From<io::Error> for CatalogError {
    fn from(err: io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "catalog I/O error: {}", err),
            CatalogError::MissingField { line } => {
                write!(f, "line {}: missing field", line)
            }
            CatalogError::InvalidPrice { line, value } => {
                write!(f, "line {}: invalid price '{}'", line, value)
            }
            CatalogError::InvalidDate { line, value } => {
                write!(f, "line {}: invalid date '{}'", line, value)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Parse the catalog rows from `reader`, in file order.
///
/// The two header lines and blank lines are skipped; the caller feeds
/// the books through the table's bulk-load path.
pub fn read_catalog<R: BufRead>(reader: R, mode: SearchMode) -> Result<Vec<Book>, CatalogError> {
    let mut books = Vec::new();
    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        if line_index < 2 || line.trim().is_empty() {
            continue;
        }
        books.push(parse_row(&line, line_index + 1, mode)?);
    }
    Ok(books)
}

fn parse_row(line: &str, line_number: usize, mode: SearchMode) -> Result<Book, CatalogError> {
    let missing = || CatalogError::MissingField { line: line_number };
    let mut fields = line.splitn(5, '|').map(str::trim);

    let name = fields.next().filter(|f| !f.is_empty()).ok_or_else(missing)?;
    let author = fields.next().filter(|f| !f.is_empty()).ok_or_else(missing)?;
    let _status = fields.next().ok_or_else(missing)?; // derived from reservations
    let price_field = fields.next().ok_or_else(missing)?;
    let reservations_field = fields.next().ok_or_else(missing)?;

    let price_text = price_field.strip_suffix('€').unwrap_or(price_field).trim();
    let price: f64 = price_text.parse().map_err(|_| CatalogError::InvalidPrice {
        line: line_number,
        value: price_field.to_string(),
    })?;

    let mut book = Book::new(name.to_string(), author.to_string(), price, mode);
    if reservations_field != "-" {
        for cell in reservations_field.split(',') {
            let cell = cell.trim();
            let (holder, date_text) = cell.split_once(" @ ").ok_or_else(missing)?;
            let return_date = NaiveDate::parse_from_str(date_text.trim(), DATE_FORMAT)
                .map_err(|_| CatalogError::InvalidDate {
                    line: line_number,
                    value: date_text.trim().to_string(),
                })?;
            // Start dates are not stored; a loan is one lending period long
            book.add_reservation(Reservation {
                holder: holder.trim().to_string(),
                start_date: return_date - Duration::days(LOAN_DAYS),
                return_date,
            });
        }
    }
    Ok(book)
}

/// Write every stored book as one catalog row
pub fn write_catalog<W: Write>(out: &mut W, table: &Table<Book>) -> io::Result<()> {
    writeln!(out, "{}", HEADER)?;
    writeln!(out, "{}", SEPARATOR)?;
    for book in table.iter() {
        let status = if book.is_available() { "Available" } else { "Reserved" };
        let reservations = if book.is_available() {
            "-".to_string()
        } else {
            book.reservations()
                .iter()
                .map(|r| format!("{} @ {}", r.holder, r.return_date.format(DATE_FORMAT)))
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(
            out,
            "{} | {} | {} | {:.2}€ | {}",
            book.name(),
            book.author(),
            status,
            book.price(),
            reservations
        )?;
    }
    Ok(())
}

/// Load the catalog file into `table` through the normal insert path.
///
/// Returns how many books the table accepted. A missing file is not an
/// error: the catalog starts empty and is created on the first save.
pub fn load_into_table(
    path: &Path,
    mode: SearchMode,
    table: &mut Table<Book>,
) -> Result<usize, CatalogError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!("catalog file {} not found, starting empty", path.display());
            return Ok(0);
        }
        Err(err) => return Err(err.into()),
    };
    let books = read_catalog(BufReader::new(file), mode)?;
    let total = books.len();
    let accepted = table.load(books);
    info!(
        "loaded {}/{} books from {}",
        accepted,
        total,
        path.display()
    );
    Ok(accepted)
}

/// Persist the table to the catalog file
pub fn save_to_file(path: &Path, table: &Table<Book>) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_catalog(&mut file, table)?;
    info!("saved {} books to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibhash_core::{DispersionFunction, TableConfig};
    use std::io::Cursor;

    fn sample_file() -> String {
        [
            HEADER,
            SEPARATOR,
            "Dune | Frank Herbert | Reserved | 9.95€ | Ana @ 03/04/2024, Luis @ 03/05/2024",
            "Solaris | Stanislaw Lem | Available | 7.50€ | -",
        ]
        .join("\n")
    }

    #[test]
    fn test_read_catalog_parses_rows_and_reservations() {
        let books = read_catalog(Cursor::new(sample_file()), SearchMode::Name).unwrap();
        assert_eq!(books.len(), 2);

        let dune = &books[0];
        assert_eq!(dune.name(), "Dune");
        assert_eq!(dune.author(), "Frank Herbert");
        assert_eq!(dune.reservations().len(), 2);
        assert_eq!(dune.reservations()[0].holder, "Ana");
        assert_eq!(
            dune.reservations()[0].return_date,
            NaiveDate::parse_from_str("03/04/2024", DATE_FORMAT).unwrap()
        );
        // Start dates are reconstructed one lending period back
        assert_eq!(
            dune.reservations()[0].start_date,
            NaiveDate::parse_from_str("04/03/2024", DATE_FORMAT).unwrap()
        );

        assert!(books[1].is_available());
        assert_eq!(books[1].price(), 7.5);
    }

    #[test]
    fn test_read_catalog_rejects_bad_price() {
        let text = format!("{}\n{}\nDune | Herbert | Available | cheap | -", HEADER, SEPARATOR);
        let err = read_catalog(Cursor::new(text), SearchMode::Name).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPrice { line: 3, .. }));
    }

    #[test]
    fn test_read_catalog_rejects_bad_date() {
        let text = format!(
            "{}\n{}\nDune | Herbert | Reserved | 1.00€ | Ana @ someday",
            HEADER, SEPARATOR
        );
        let err = read_catalog(Cursor::new(text), SearchMode::Name).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDate { line: 3, .. }));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let config = TableConfig::open(7, DispersionFunction::Mod);
        let mut table: Table<Book> = Table::new(&config).unwrap();
        let books = read_catalog(Cursor::new(sample_file()), SearchMode::Name).unwrap();
        assert_eq!(table.load(books), 2);

        let mut written = Vec::new();
        write_catalog(&mut written, &table).unwrap();
        let reread = read_catalog(Cursor::new(written), SearchMode::Name).unwrap();
        assert_eq!(reread.len(), 2);
        let dune = reread.iter().find(|b| b.name() == "Dune").unwrap();
        assert_eq!(dune.reservations().len(), 2);
        assert_eq!(dune.reservations()[1].holder, "Luis");
    }

    #[test]
    fn test_load_into_table_with_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.dat");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", sample_file()).unwrap();

        let config = TableConfig::open(7, DispersionFunction::Mod);
        let mut table: Table<Book> = Table::new(&config).unwrap();
        let accepted = load_into_table(&path, SearchMode::Name, &mut table).unwrap();
        assert_eq!(accepted, 2);

        let probe = Book::probe("Solaris", "", SearchMode::Name);
        assert!(table.search(&probe).is_some());
    }

    #[test]
    fn test_missing_catalog_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.dat");
        let config = TableConfig::open(3, DispersionFunction::Mod);
        let mut table: Table<Book> = Table::new(&config).unwrap();
        assert_eq!(load_into_table(&path, SearchMode::Name, &mut table).unwrap(), 0);
        assert!(table.is_empty());
    }
}
