mod loader;
mod splitter;
