pub mod app;
pub mod districts;
pub mod entrypoints;
pub mod map;
