mod assets;
mod history;
mod network;
