pub mod evidence;
pub mod profile;
pub mod report;
pub mod schema;
