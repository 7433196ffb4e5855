pub mod df;
pub mod du;
pub mod probe;
pub mod table;
