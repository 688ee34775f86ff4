pub mod files;
pub mod run_store;
pub mod templates;

pub use files::{
    atomic_write, ensure_cadence_dir, get_cadence_dir, init_local_cadence, read_file, run_file,
    templates_file,
};
pub use run_store::{clear_run, load_run, save_run};
pub use templates::{load_templates, save_templates};
