pub mod opencage;
pub mod track;
