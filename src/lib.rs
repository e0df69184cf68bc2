pub mod engine;
pub mod logging;
pub mod shared;

#[cfg(test)]
mod logging_test;

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
