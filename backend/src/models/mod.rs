mod product;

pub use product::{PriceFilter, Product};
