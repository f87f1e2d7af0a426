//! Interactive catalog menu
//!
//! Mirrors the librarian/visitor console: visitors search, reserve and
//! extend reservations; a logged-in librarian inserts, deletes and saves
//! the catalog. The table contents are printed between rounds.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bibhash_core::Table;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use log::{info, warn};

use crate::book::{Book, SearchMode, DATE_FORMAT};
use crate::catalog;

const LIBRARIAN_USER: &str = "librarian";
const LIBRARIAN_PASSWORD: &str = "password";

pub struct Menu {
    table: Table<Book>,
    search_mode: SearchMode,
    catalog_path: PathBuf,
    librarian: bool,
}

impl Menu {
    pub fn new(table: Table<Book>, search_mode: SearchMode, catalog_path: PathBuf) -> Self {
        Menu {
            table,
            search_mode,
            catalog_path,
            librarian: false,
        }
    }

    /// Run the menu against stdin until quit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        self.run_with(&mut input)
    }

    fn run_with<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        loop {
            self.print_table();
            self.print_options();
            let choice = match prompt(input, "Select an option: ")? {
                Some(choice) => choice,
                None => break,
            };
            println!();
            match choice.as_str() {
                "0" if self.librarian => self.insert_book(input)?,
                "1" => self.search_book(input)?,
                "2" if self.librarian => self.log_out(),
                "2" => self.reserve_book(input)?,
                "3" if self.librarian => self.delete_book(input)?,
                "3" => self.extend_reservation(input)?,
                "4" => break,
                "5" if !self.librarian => self.log_in(input)?,
                "8" if self.librarian => self.save(),
                _ => println!("{}", "Incorrect option".red()),
            }
        }
        Ok(())
    }

    fn print_table(&self) {
        println!();
        for index in 0..self.table.table_size() {
            let row = self
                .table
                .bucket_keys(index)
                .iter()
                .map(|book| book.to_string())
                .collect::<Vec<_>>()
                .join(" | ");
            println!("{}", format!("Table[{}]: {}", index, row).yellow());
        }
        println!();
    }

    fn print_options(&self) {
        if self.librarian {
            println!("0. Insert a book");
            println!("1. Search a book");
            println!("2. Log out");
            println!("3. Delete a book");
            println!("8. Save the catalog");
        } else {
            println!("1. Search a book");
            println!("2. Reserve a book not available now");
            println!("3. Extend a reservation");
            println!("5. Log in as librarian");
        }
        println!("4. Quit");
    }

    fn read_probe<R: BufRead>(&self, input: &mut R, verb: &str) -> io::Result<Option<Book>> {
        let name = match prompt(input, &format!("Enter the name of the book to {}: ", verb))? {
            Some(name) => name,
            None => return Ok(None),
        };
        let author = match prompt(input, &format!("Enter the author of the book to {}: ", verb))? {
            Some(author) => author,
            None => return Ok(None),
        };
        Ok(Some(Book::probe(&name, &author, self.search_mode)))
    }

    fn insert_book<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        let name = match prompt(input, "Insert the book's name: ")? {
            Some(name) => name,
            None => return Ok(()),
        };
        let author = match prompt(input, "Insert the book's author: ")? {
            Some(author) => author,
            None => return Ok(()),
        };
        let price_text = match prompt(input, "Insert the book's price: ")? {
            Some(price) => price,
            None => return Ok(()),
        };
        let price: f64 = match price_text.parse() {
            Ok(price) => price,
            Err(_) => {
                println!("{}", "The price is not a number".red());
                return Ok(());
            }
        };
        let book = Book::new(name, author, price, self.search_mode);
        if self.table.is_full() {
            println!("{}", "The table is full!".red());
        } else if self.table.insert(&book) {
            println!("{}", "The book has been inserted successfully".green());
        } else {
            println!(
                "{}",
                "It wasn't possible to insert the book in the table".red()
            );
        }
        Ok(())
    }

    fn search_book<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        let probe = match self.read_probe(input, "search")? {
            Some(probe) => probe,
            None => return Ok(()),
        };
        match self.table.search(&probe) {
            Some(index) => {
                println!("{}", "The book is in the catalog".green());
                println!("{}", format!("Position: {}", index).green());
            }
            None => println!("{}", "The book is not in the catalog".red()),
        }
        Ok(())
    }

    fn reserve_book<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        let probe = match self.read_probe(input, "reserve")? {
            Some(probe) => probe,
            None => return Ok(()),
        };
        let holder = match prompt(input, "Who is the reservation for? ")? {
            Some(holder) => holder,
            None => return Ok(()),
        };
        let today = Local::now().date_naive();
        match self.table.find_mut(&probe) {
            Some(book) => {
                let reservation = book.reserve(&holder, today);
                println!(
                    "{}",
                    format!(
                        "New reservation for: {}. From {} to {}",
                        book.name(),
                        reservation.start_date.format(DATE_FORMAT),
                        reservation.return_date.format(DATE_FORMAT)
                    )
                    .green()
                );
                for reservation in book.reservations() {
                    println!(
                        "Start date: {} | Return date: {}",
                        reservation.start_date.format(DATE_FORMAT),
                        reservation.return_date.format(DATE_FORMAT)
                    );
                }
                info!("reservation recorded for {}", holder);
            }
            None => println!(
                "{}",
                "You can't reserve a book that doesn't exist in the catalog".red()
            ),
        }
        Ok(())
    }

    fn extend_reservation<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        let probe = match self.read_probe(input, "modify")? {
            Some(probe) => probe,
            None => return Ok(()),
        };
        let holder = match prompt(input, "Whose reservation is it? ")? {
            Some(holder) => holder,
            None => return Ok(()),
        };
        let date_text = match prompt(input, "Enter the new return date (dd/mm/yyyy): ")? {
            Some(date) => date,
            None => return Ok(()),
        };
        let new_date = match NaiveDate::parse_from_str(&date_text, DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                println!("{}", "The date is not valid".red());
                return Ok(());
            }
        };
        match self.table.find_mut(&probe) {
            Some(book) => {
                if book.extend_return_date(&holder, new_date) {
                    println!(
                        "{}",
                        format!("Return date moved to {}", new_date.format(DATE_FORMAT)).green()
                    );
                } else {
                    println!(
                        "{}",
                        "The date must be later than the current return date".red()
                    );
                }
            }
            None => println!("{}", "The book is not in the catalog".red()),
        }
        Ok(())
    }

    fn delete_book<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        let probe = match self.read_probe(input, "delete")? {
            Some(probe) => probe,
            None => return Ok(()),
        };
        if self.table.delete(&probe) {
            println!("{}", "The book has been deleted successfully".green());
        } else {
            println!(
                "{}",
                "It wasn't possible to delete the book from the table".red()
            );
        }
        Ok(())
    }

    fn log_in<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        let username = match prompt(input, "Introduce the username: ")? {
            Some(username) => username,
            None => return Ok(()),
        };
        if username != LIBRARIAN_USER {
            println!("{}", "Incorrect username".red());
            warn!("failed librarian login for '{}'", username);
            return Ok(());
        }
        let password = match prompt(input, "Introduce the password: ")? {
            Some(password) => password,
            None => return Ok(()),
        };
        if password == LIBRARIAN_PASSWORD {
            println!("{}", "Logged in as librarian".green());
            info!("librarian logged in");
            self.librarian = true;
        } else {
            println!("{}", "Incorrect password".red());
            warn!("failed librarian login for '{}'", username);
        }
        Ok(())
    }

    fn log_out(&mut self) {
        self.librarian = false;
        println!("{}", "Logged out".green());
        info!("librarian logged out");
    }

    fn save(&self) {
        match catalog::save_to_file(&self.catalog_path, &self.table) {
            Ok(()) => println!("{}", "Data saved successfully".green()),
            Err(err) => println!("{}", format!("Could not save the catalog: {}", err).red()),
        }
    }
}

/// Print a prompt and read one trimmed line; `None` at end of input
fn prompt<R: BufRead>(input: &mut R, text: &str) -> io::Result<Option<String>> {
    print!("{}", text.blue());
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibhash_core::{DispersionFunction, TableConfig};
    use std::io::Cursor;

    fn menu_with_book() -> Menu {
        let config = TableConfig::open(5, DispersionFunction::Mod);
        let mut table: Table<Book> = Table::new(&config).unwrap();
        let book = Book::new("Dune".into(), "Herbert".into(), 9.95, SearchMode::Name);
        assert!(table.insert(&book));
        Menu::new(table, SearchMode::Name, PathBuf::from("unused.dat"))
    }

    #[test]
    fn test_visitor_can_search_and_quit() {
        let mut menu = menu_with_book();
        let mut input = Cursor::new("1\nDune\nHerbert\n4\n");
        menu.run_with(&mut input).unwrap();
        assert!(!menu.librarian);
    }

    #[test]
    fn test_librarian_login_logout_round_trip() {
        let mut menu = menu_with_book();
        let mut input = Cursor::new("5\nlibrarian\npassword\n2\n4\n");
        menu.run_with(&mut input).unwrap();
        assert!(!menu.librarian);
    }

    #[test]
    fn test_wrong_password_keeps_visitor_role() {
        let mut menu = menu_with_book();
        let mut input = Cursor::new("5\nlibrarian\nhunter2\n4\n");
        menu.run_with(&mut input).unwrap();
        assert!(!menu.librarian);
    }

    #[test]
    fn test_librarian_can_insert_and_delete() {
        let mut menu = menu_with_book();
        let mut input = Cursor::new(
            "5\nlibrarian\npassword\n0\nSolaris\nLem\n7.50\n3\nDune\nHerbert\n4\n",
        );
        menu.run_with(&mut input).unwrap();
        let solaris = Book::probe("Solaris", "", SearchMode::Name);
        let dune = Book::probe("Dune", "", SearchMode::Name);
        assert!(menu.table.search(&solaris).is_some());
        assert_eq!(menu.table.search(&dune), None);
    }

    #[test]
    fn test_reservation_via_menu_marks_the_book() {
        let mut menu = menu_with_book();
        let mut input = Cursor::new("2\nDune\nHerbert\nAna\n4\n");
        menu.run_with(&mut input).unwrap();
        let probe = Book::probe("Dune", "", SearchMode::Name);
        let book = menu.table.find(&probe).unwrap();
        assert!(!book.is_available());
        assert_eq!(book.reservations()[0].holder, "Ana");
    }

    #[test]
    fn test_end_of_input_quits_cleanly() {
        let mut menu = menu_with_book();
        let mut input = Cursor::new("");
        menu.run_with(&mut input).unwrap();
    }
}
