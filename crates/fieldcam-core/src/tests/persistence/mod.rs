mod file_store;
mod platform;
mod resolver;
