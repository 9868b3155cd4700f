pub mod beirut;
