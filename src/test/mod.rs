mod controller;
mod profile_config;
mod viz_meta;
