pub mod engine;
pub mod header;
pub mod window;

#[cfg(test)]
mod unit_tests;
