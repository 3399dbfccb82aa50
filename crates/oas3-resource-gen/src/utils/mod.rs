pub mod spec;

pub use spec::{SpecFormat, SpecLoader, load_model, load_template, write_spec};
