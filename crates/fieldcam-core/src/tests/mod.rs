mod overlay;
mod persistence;
