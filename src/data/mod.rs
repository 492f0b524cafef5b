mod load;
mod rows;

pub use load::{filter_rows, load_rows, MIN_POPULATION};
pub use rows::CountryRow;
