pub mod fill;
pub mod generate;
pub mod playthrough;
pub mod spoiler_log;
