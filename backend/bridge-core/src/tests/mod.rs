mod command;
mod config;
mod routes;
