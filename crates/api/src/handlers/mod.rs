pub mod evaluate;
pub mod form;
pub mod results;
