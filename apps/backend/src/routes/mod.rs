pub mod documents;
pub mod evaluate;
