pub mod employee;
pub mod salary;
