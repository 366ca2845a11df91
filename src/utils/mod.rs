pub mod log;
pub mod prng;
pub mod pv_runner;
