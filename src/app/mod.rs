pub mod cli;
pub mod startup;
