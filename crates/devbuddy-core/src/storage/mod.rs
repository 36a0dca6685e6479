//! Flat-file YAML persistence shared by the services.

mod lenient;
mod yaml;

pub use lenient::{
    lenient_bool, lenient_string_list, lenient_text, lenient_timestamp, lenient_value_list,
};
pub use yaml::{ensure_dir, list_yaml_files, read_yaml, write_yaml};
