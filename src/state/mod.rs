mod book;
mod export;
mod persistence;
mod repository;

pub use book::CostBook;
pub use export::export_recipes_csv;
pub use persistence::{load_book, save_book};
pub use repository::{MemoryRepository, Record, Repository};
