pub mod error;
pub mod grid;
pub mod persistence;
pub mod project;
pub mod sequencer;
pub mod transport;

#[cfg(test)]
pub mod test_fixture;
