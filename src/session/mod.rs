pub mod quiz;
pub mod result;
pub mod study;
pub mod timer;
