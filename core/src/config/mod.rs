mod load;
mod types;

pub use load::{
    env_file_candidates, get_datachore_data_dir, get_datachore_env_file_path, load_default,
    load_from_path,
};
pub use types::*;
