pub mod isbn;
pub mod one_or_many;
pub mod record;
