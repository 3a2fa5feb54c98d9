pub mod export;
pub mod match_log;
pub mod roster;
pub mod storage_structs;
