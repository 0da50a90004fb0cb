pub mod serve;
pub mod stdio;
