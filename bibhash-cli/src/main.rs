use std::process::ExitCode;

use bibhash_core::{Table, TableLayout};
use colored::Colorize;
use log::info;

use bibhash_cli::args::Args;
use bibhash_cli::book::Book;
use bibhash_cli::catalog;
use bibhash_cli::logger::init_logger;
use bibhash_cli::menu::Menu;

fn main() -> ExitCode {
    init_logger();

    let args = match Args::resolve() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("bibhash: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let config = match args.table_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("bibhash: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let mode = args.search_mode();

    let mut table: Table<Book> = match Table::new(&config) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("bibhash: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", format!("Searching by: {}", mode).magenta());
    println!("{}", format!("Table size: {}", config.table_size).green());
    println!("{}", format!("Dispersion function: {:?}", config.dispersion).green());
    match &config.layout {
        TableLayout::Open => println!("{}", "Hash table: Open".magenta()),
        TableLayout::Closed {
            block_size,
            exploration,
        } => {
            println!("{}", format!("Block size: {}", block_size).green());
            println!("{}", format!("Exploration function: {:?}", exploration).green());
            println!("{}", "Hash table: Closed".magenta());
        }
    }

    match catalog::load_into_table(&args.file, mode, &mut table) {
        Ok(accepted) => info!("catalog ready with {} books", accepted),
        Err(err) => {
            eprintln!("bibhash: {}", err);
            return ExitCode::FAILURE;
        }
    }

    let mut menu = Menu::new(table, mode, args.file.clone());
    if let Err(err) = menu.run() {
        eprintln!("bibhash: {}", err);
        return ExitCode::FAILURE;
    }

    println!("{}", "Program ended.".magenta());
    ExitCode::SUCCESS
}
