mod local;
mod properties;
