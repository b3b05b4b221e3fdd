pub mod ask;
pub mod bugs;
pub mod docs;
pub mod map;
