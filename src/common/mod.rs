mod fs;
mod json;

pub(crate) use fs::ensure_parent_dir_exists;
pub(crate) use json::{read_json, write_json};
