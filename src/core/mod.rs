pub mod backdate;
pub mod clock;
pub mod hours;
pub mod modify;
pub mod payperiod;
pub mod report;
pub mod sheet;
