mod builder;
mod wire;
