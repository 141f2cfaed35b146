pub mod superpose;
