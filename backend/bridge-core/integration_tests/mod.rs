mod dispatcher;
mod download_route;
mod lifecycle;
mod supervisor;
mod support;
