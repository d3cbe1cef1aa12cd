mod structs;
mod support;
mod type_resolution;
