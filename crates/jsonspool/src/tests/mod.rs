mod roundtrip;
pub mod utils;
