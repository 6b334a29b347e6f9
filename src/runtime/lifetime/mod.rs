pub mod demo;
pub mod shutdown;
pub mod startup;
