//--------------------------------------------------------------------------------------------------

pub mod raw;
pub mod unixtime;

//--------------------------------------------------------------------------------------------------
